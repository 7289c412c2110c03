//! ULID-based object identifiers.

use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier attached to every directory object (objectGUID).
///
/// Backed by a ULID so identifiers sort in creation order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectGuid(Ulid);

impl ObjectGuid {
    /// Creates a new identifier stamped with the current time.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ObjectGuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ObjectGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectGuid(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid object identifier.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid object GUID '{value}': {reason}")]
pub struct ParseObjectGuidError {
    value: String,
    reason: String,
}

impl FromStr for ObjectGuid {
    type Err = ParseObjectGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| ParseObjectGuidError {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}
