//! Connection management for DirectoryDb.

use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{
    DirectoryDb, DirectoryError, DirectoryResult, DirectoryUrl, SessionInfo, Transaction,
    create_schema,
};
use crate::options::{Credentials, LoadParm};

impl DirectoryDb {
    /// Connects to the directory at `url`.
    ///
    /// The schema is created on first open. An [`SessionInfo::Anonymous`]
    /// handle is read-only. The credentials are recorded on the handle as
    /// given.
    pub fn connect(
        url: &str,
        session: SessionInfo,
        credentials: Credentials,
        lp: &LoadParm,
    ) -> DirectoryResult<Self> {
        let parsed = DirectoryUrl::parse(url)?;
        let conn = match &parsed {
            DirectoryUrl::File(path) => open_file(path)?,
            DirectoryUrl::Memory => Connection::open_in_memory()?,
        };
        create_schema(&conn)?;
        if !session.is_system() {
            conn.execute_batch("PRAGMA query_only = ON;")?;
        }

        debug!(
            url = %parsed,
            session = ?session,
            principal = %credentials.principal(),
            host = %lp.netbios_name(),
            "connected to directory"
        );
        Ok(Self {
            conn,
            url: parsed,
            session,
            credentials,
        })
    }

    /// Opens a database file with the system session and default loadparm.
    pub fn open(path: &Path) -> DirectoryResult<Self> {
        Self::connect(
            &path.to_string_lossy(),
            SessionInfo::System,
            Credentials::anonymous(),
            &LoadParm::default(),
        )
    }

    /// Opens a private in-memory database with the system session.
    pub fn open_in_memory() -> DirectoryResult<Self> {
        Self::connect(
            ":memory:",
            SessionInfo::System,
            Credentials::anonymous(),
            &LoadParm::default(),
        )
    }

    /// Returns the URL this handle was opened with.
    pub fn url(&self) -> &DirectoryUrl {
        &self.url
    }

    /// Returns the session the handle acts as.
    pub fn session(&self) -> SessionInfo {
        self.session
    }

    /// Returns the credentials supplied at connect time.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begins a new transaction.
    ///
    /// The transaction will automatically rollback on drop unless `commit()` is called.
    pub fn transaction(&self) -> DirectoryResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }
}

fn open_file(path: &Path) -> DirectoryResult<Connection> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| DirectoryError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(Connection::open(path)?)
}
