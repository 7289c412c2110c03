//! SQLite schema for the directory database.

use rusqlite::Connection;

/// Current schema version written to `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the directory schema.
///
/// Idempotent; safe to call on every open.
///
/// # Tables Created
/// - `domain_info` - Key/value domain settings (realm, NetBIOS domain)
/// - `users` - User and machine accounts
/// - `servers` - Domain controllers and member servers
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS domain_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            name TEXT PRIMARY KEY COLLATE NOCASE,
            guid TEXT NOT NULL UNIQUE,
            uid_number INTEGER UNIQUE,
            gid_number INTEGER,
            created TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS servers (
            name TEXT PRIMARY KEY COLLATE NOCASE,
            guid TEXT NOT NULL UNIQUE,
            dns_name TEXT NOT NULL,
            role TEXT NOT NULL,
            created TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );",
    )?;

    let existing: i64 =
        conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))?;
    if existing == 0 {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
    }

    Ok(())
}
