//! RAII-based transaction support for SQLite.

use super::DirectoryResult;
use rusqlite::{Connection, Params};

/// A database transaction with RAII-based automatic rollback.
///
/// The transaction will automatically rollback when dropped unless
/// `commit()` is called explicitly.
pub struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(conn: &'a Connection) -> DirectoryResult<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Returns the connection the transaction runs on.
    pub fn conn(&self) -> &Connection {
        self.conn
    }

    /// Executes a SQL statement within the transaction.
    pub fn execute(&self, sql: &str, params: impl Params) -> DirectoryResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Commits the transaction.
    pub fn commit(mut self) -> DirectoryResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
