//! The schema mutation engine.
//!
//! [`SchemaEditor`] exposes the public schema-edit operations. Each one
//! validates its preconditions against a fresh snapshot of the live schema,
//! then issues statements: a single statement for the operations SQLite
//! supports directly, and a multi-statement transactional rewrite for column
//! removal, which it does not.
//!
//! Precondition violations are silently absorbed — the call returns `Ok(())`
//! without issuing any statement, leaving the database exactly as it was.
//! Engine execution failures are returned as errors, with any in-flight
//! transaction rolled back first.
//!
//! # Example
//!
//! ```no_run
//! use schema_edit_core::{ColumnDefinition, TableDefinition};
//! use schema_edit_sqlite::SchemaEditor;
//!
//! let mut editor = SchemaEditor::new();
//! editor.open("game.db").unwrap();
//!
//! editor.add_column("npcs", &ColumnDefinition::new("hp", "int")).unwrap();
//! editor.rename_table("npcs", "people").unwrap();
//!
//! // Missing table: silent no-op, nothing issued.
//! editor.rename_table("ghosts", "spirits").unwrap();
//! ```

use std::path::Path;

use schema_edit_core::{ColumnDefinition, TableDefinition, TableDefinitions};
use tracing::debug;

use crate::connection::Database;
use crate::error::{Result, StoreError};
use crate::introspect;
use crate::sql;

/// Schema-edit operations over one open SQLite database file.
///
/// Owns a [`Database`] connection handle; [`open`](Self::open) targets it at
/// a file (creating the file if absent) and releases any previously held
/// connection. Not safe for concurrent use from multiple threads — callers
/// needing that must serialize externally or use independent editors.
#[derive(Debug, Default)]
pub struct SchemaEditor {
    db: Database,
}

impl SchemaEditor {
    /// Creates an editor with no open database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the database file at `path`, creating it if absent.
    ///
    /// Replaces any previously open connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the engine cannot open the path.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.db.open(path)
    }

    /// Returns whether a database is currently open.
    pub fn is_open(&self) -> bool {
        self.db.is_open()
    }

    /// Returns the full schema snapshot of the open database.
    ///
    /// System tables are excluded; columns appear in declaration order with
    /// their declared types as stored and their primary-key flags. Returns an
    /// empty snapshot when no database is open or no user tables exist.
    /// Read-only and idempotent.
    pub fn describe_tables(&self) -> Result<TableDefinitions> {
        if !self.db.is_open() {
            return Ok(TableDefinitions::new());
        }
        introspect::describe_tables(self.db.connection()?)
    }

    /// Creates a table from the given definition.
    ///
    /// Silent no-op when `name` is blank, a table named `name` already
    /// exists, or `definition` has no columns. Otherwise issues a single
    /// `CREATE TABLE` statement with the columns in declaration order and
    /// types passed through opaquely.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if statement execution fails, or
    /// [`StoreError::NotOpen`] if no database is open.
    pub fn create_table(&mut self, name: &str, definition: &TableDefinition) -> Result<()> {
        if name.trim().is_empty() {
            debug!("create_table skipped: blank table name");
            return Ok(());
        }
        if definition.columns.is_empty() {
            debug!(table = name, "create_table skipped: no columns");
            return Ok(());
        }
        if self.describe_tables()?.contains_key(name) {
            debug!(table = name, "create_table skipped: table already exists");
            return Ok(());
        }
        self.db.execute(&sql::create_table(name, definition))
    }

    /// Renames a table, leaving row data and every other table untouched.
    ///
    /// Silent no-op when `old_name` does not exist, `new_name` is blank, or
    /// `new_name` already names a table. Otherwise issues a single rename
    /// statement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if statement execution fails.
    pub fn rename_table(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let schema = self.describe_tables()?;
        if !schema.contains_key(old_name) {
            debug!(table = old_name, "rename_table skipped: no such table");
            return Ok(());
        }
        if new_name.trim().is_empty() {
            debug!(table = old_name, "rename_table skipped: blank new name");
            return Ok(());
        }
        if schema.contains_key(new_name) {
            debug!(
                table = old_name,
                new_name, "rename_table skipped: new name in use"
            );
            return Ok(());
        }
        self.db.execute(&sql::rename_table(old_name, new_name))
    }

    /// Appends a column to the end of a table's column list.
    ///
    /// Silent no-op when `table` does not exist. Existing rows receive the
    /// engine's default value for the new column (null, since this layer
    /// supplies no defaults).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if statement execution fails — for
    /// example a duplicate column name, which SQLite rejects.
    pub fn add_column(&mut self, table: &str, column: &ColumnDefinition) -> Result<()> {
        if !self.describe_tables()?.contains_key(table) {
            debug!(table, "add_column skipped: no such table");
            return Ok(());
        }
        self.db.execute(&sql::add_column(table, column))
    }

    /// Removes a column via a full table rewrite under one transaction.
    ///
    /// SQLite has no direct drop-column statement, so removal copies the
    /// retained columns out to a temporary scratch table, drops and
    /// re-creates the original table with the retained columns and their
    /// original primary-key constraints, copies the rows back, and drops the
    /// scratch table. The whole sequence runs inside a single transaction:
    /// either every step takes effect or none does, and no intermediate
    /// state is visible to other readers of the file.
    ///
    /// Silent no-op when `table` does not exist or `column` is not one of
    /// its columns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rewrite`] if any step fails; the transaction is
    /// rolled back and the database left byte-identical to its state before
    /// the call.
    pub fn destroy_column(&mut self, table: &str, column: &str) -> Result<()> {
        let schema = self.describe_tables()?;
        let Some(definition) = schema.get(table) else {
            debug!(table, "destroy_column skipped: no such table");
            return Ok(());
        };
        if !definition.has_column(column) {
            debug!(table, column, "destroy_column skipped: no such column");
            return Ok(());
        }

        let retained = definition.without_column(column);
        let scratch = sql::scratch_table_name(table, &schema);
        let statements = sql::destroy_column(table, &retained, &scratch);

        debug!(table, column, %scratch, "rewriting table to remove column");
        let conn = self.db.connection_mut()?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Rewrite(format!("begin: {e}")))?;
        for statement in &statements {
            // Dropping `tx` on the error path rolls the rewrite back.
            tx.execute_batch(statement)
                .map_err(|e| StoreError::Rewrite(format!("{statement}: {e}")))?;
        }
        tx.commit()
            .map_err(|e| StoreError::Rewrite(format!("commit: {e}")))?;
        Ok(())
    }
}
