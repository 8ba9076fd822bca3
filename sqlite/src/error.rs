//! Error types for schema-edit operations.
//!
//! Precondition violations (missing table, blank name, name collision) are
//! not errors — they are silently absorbed as no-ops by the editor. The
//! variants here cover the remaining failure class: the underlying engine
//! refusing to open a file or execute a statement.

use thiserror::Error;

/// Errors that can occur while editing a database's schema.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite refused to open the file or execute a statement.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A statement-issuing operation was invoked with no open database.
    #[error("no database is open")]
    NotOpen,

    /// A step of the column-removal rewrite failed; the enclosing
    /// transaction was rolled back and the database left unchanged.
    #[error("column rewrite failed: {0}")]
    Rewrite(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
