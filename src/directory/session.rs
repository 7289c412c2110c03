//! Session identity attached to a directory handle.

/// Who a directory handle acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInfo {
    /// Local administration with full access.
    System,
    /// Read-only; the connection is opened with `query_only`.
    Anonymous,
}

impl SessionInfo {
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

/// Full-access session used for local database work.
pub fn system_session() -> SessionInfo {
    SessionInfo::System
}
