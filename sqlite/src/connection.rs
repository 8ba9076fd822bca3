//! Scoped ownership of one live SQLite connection.
//!
//! [`Database`] is the leaf component of the crate: it opens and closes the
//! underlying engine handle and executes statements against it. The handle is
//! exclusive — it is never shared across threads, and a replacement `open`
//! releases the previous connection before acquiring the new one. Dropping
//! the handle releases the connection on every exit path, including after an
//! execution failure.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Owns at most one live connection to a single-file SQLite database.
///
/// Created closed; [`open`](Self::open) acquires a connection to a file,
/// creating the file if absent. Statement execution is crate-internal and
/// used only by the [`SchemaEditor`](crate::SchemaEditor); execution failures
/// are returned as [`StoreError::Database`] values rather than panics.
#[derive(Debug, Default)]
pub struct Database {
    conn: Option<Connection>,
}

impl Database {
    /// Creates a closed handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the database file at `path`, creating it if absent.
    ///
    /// Any previously held connection is released unconditionally before the
    /// replacement is acquired, so a failed re-open leaves the handle closed
    /// rather than pointing at the old file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the engine cannot open the path
    /// (permissions, corruption, invalid path).
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.conn = None;
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened database");
        self.conn = Some(conn);
        Ok(())
    }

    /// Returns whether a connection is currently held.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Releases the held connection, if any.
    pub fn close(&mut self) {
        self.conn = None;
    }

    /// Borrows the live connection.
    pub(crate) fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotOpen)
    }

    /// Mutably borrows the live connection (required for transactions).
    pub(crate) fn connection_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or(StoreError::NotOpen)
    }

    /// Executes a single statement against the open database.
    pub(crate) fn execute(&self, sql: &str) -> Result<()> {
        debug!(%sql, "executing statement");
        self.connection()?.execute_batch(sql)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_closed() {
        let db = Database::new();
        assert!(!db.is_open());
        assert!(matches!(db.connection(), Err(StoreError::NotOpen)));
    }

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let mut db = Database::new();
        db.open(&path).unwrap();
        assert!(db.is_open());
        assert!(path.exists());
    }

    #[test]
    fn test_open_invalid_path_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::new();
        // A directory is not a valid database path.
        assert!(db.open(dir.path()).is_err());
        assert!(!db.is_open());
    }

    #[test]
    fn test_reopen_replaces_previous_connection() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::new();
        db.open(dir.path().join("a.db")).unwrap();
        db.execute("CREATE TABLE t (x int)").unwrap();

        db.open(dir.path().join("b.db")).unwrap();
        // The new target has no such table; the old connection is gone.
        assert!(db.execute("INSERT INTO t VALUES (1)").is_err());
    }

    #[test]
    fn test_execute_failure_is_an_error_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::new();
        db.open(dir.path().join("t.db")).unwrap();
        let err = db.execute("NOT VALID SQL").unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        // The handle survives the failure and remains usable.
        db.execute("CREATE TABLE t (x int)").unwrap();
    }

    #[test]
    fn test_close_releases_connection() {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::new();
        db.open(dir.path().join("t.db")).unwrap();
        db.close();
        assert!(!db.is_open());
    }
}
