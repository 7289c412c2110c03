//! Error type for directory operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the directory database.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The requested object does not exist.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// An object with the same name or identifier already exists.
    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: &'static str, name: String },

    /// An account name failed validation.
    #[error(transparent)]
    InvalidName(#[from] crate::directory::ParseAccountNameError),

    /// The `-H` URL names something this store cannot open.
    #[error("unsupported directory URL '{url}': {reason}")]
    UnsupportedUrl { url: String, reason: String },

    /// The database exists but no domain has been provisioned in it.
    #[error("directory at {0} has not been provisioned")]
    NotProvisioned(String),

    /// A domain is already provisioned in this database.
    #[error("directory at {0} is already provisioned")]
    AlreadyProvisioned(String),

    /// A stored value could not be decoded.
    #[error("corrupt directory entry: {0}")]
    Corrupt(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
