//! SQLite-backed directory store (the SAM database).

mod account;
mod connection;
mod error;
mod guid;
mod records;
mod repo;
mod schema;
mod session;
mod transaction;
mod url;


pub use account::{AccountName, MAX_ACCOUNT_NAME_LEN, ParseAccountNameError};
pub use error::{DirectoryError, DirectoryResult};
pub use guid::{ObjectGuid, ParseObjectGuidError};
pub use records::{DomainInfo, NewUser, ServerRecord, ServerRole, UserRecord};
pub use schema::{SCHEMA_VERSION, create_schema};
pub use session::{SessionInfo, system_session};
pub use transaction::Transaction;
pub use url::DirectoryUrl;

use rusqlite::Connection;

use crate::options::Credentials;

/// Name of the built-in administrator account.
pub const ADMINISTRATOR: &str = "Administrator";

/// A live handle to a directory database.
///
/// Owns the SQLite connection. Dropping the handle closes it.
pub struct DirectoryDb {
    pub(crate) conn: Connection,
    url: DirectoryUrl,
    session: SessionInfo,
    credentials: Credentials,
}

impl std::fmt::Debug for DirectoryDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryDb")
            .field("url", &self.url)
            .field("session", &self.session)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
