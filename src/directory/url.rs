//! Parsing of `-H` directory URLs.

use std::fmt;
use std::path::PathBuf;

use super::{DirectoryError, DirectoryResult};

/// Location of a directory database.
///
/// Accepts a bare filesystem path, `sqlite://`, `tdb://` or `ldb://`
/// prefixed paths, and `:memory:` for a throwaway in-memory database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryUrl {
    /// A database file on disk.
    File(PathBuf),
    /// A private in-memory database.
    Memory,
}

const FILE_SCHEMES: &[&str] = &["sqlite://", "tdb://", "ldb://"];
const REMOTE_SCHEMES: &[&str] = &["ldap://", "ldaps://", "ldapi://"];

impl DirectoryUrl {
    /// Parses a URL as given on the command line.
    pub fn parse(url: &str) -> DirectoryResult<Self> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(DirectoryError::UnsupportedUrl {
                url: url.to_string(),
                reason: "URL is empty".to_string(),
            });
        }

        if trimmed == ":memory:" {
            return Ok(Self::Memory);
        }

        let lower = trimmed.to_ascii_lowercase();
        if REMOTE_SCHEMES.iter().any(|s| lower.starts_with(s)) {
            return Err(DirectoryError::UnsupportedUrl {
                url: url.to_string(),
                reason: "remote directory servers are not supported; pass a database path"
                    .to_string(),
            });
        }

        let path = FILE_SCHEMES
            .iter()
            .find(|s| lower.starts_with(*s))
            .map(|s| &trimmed[s.len()..])
            .unwrap_or(trimmed);

        if path.is_empty() {
            return Err(DirectoryError::UnsupportedUrl {
                url: url.to_string(),
                reason: "URL has no path".to_string(),
            });
        }

        if let Some((scheme, _)) = path.split_once("://") {
            return Err(DirectoryError::UnsupportedUrl {
                url: url.to_string(),
                reason: format!("unknown scheme '{}'", scheme),
            });
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

impl fmt::Display for DirectoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Memory => write!(f, ":memory:"),
        }
    }
}
