//! Transactional schema editing for single-file SQLite databases.
//!
//! This crate lets a caller introspect and mutate the structure of tables in
//! a persisted SQLite file while respecting the dialect's restrictive
//! `ALTER TABLE` semantics. Operations that SQLite supports directly (create,
//! rename, add column) are issued as single statements; column removal, which
//! has no direct statement, is performed as a multi-statement table rewrite
//! inside one atomic transaction.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`connection`** — [`Database`], a scoped handle owning one live
//!   connection to a database file
//! - **`introspect`** — on-demand schema snapshots from the live database
//! - **`sql`** — statement rendering for every mutation
//! - **`editor`** — [`SchemaEditor`], the public schema-edit operations with
//!   their precondition checks
//!
//! # Behavior contract
//!
//! Every operation is all-or-nothing: on invalid input (missing table,
//! missing column, name collision, blank name) it is a silent no-op, and on
//! an engine execution failure mid-rewrite the enclosing transaction rolls
//! back, leaving the file byte-identical to its pre-operation state. No
//! intermediate state is ever observable by other readers of the same file.
//!
//! # Quick start
//!
//! ```no_run
//! use schema_edit_core::{ColumnDefinition, TableDefinition};
//! use schema_edit_sqlite::SchemaEditor;
//!
//! let mut editor = SchemaEditor::new();
//! editor.open("game.db").unwrap();
//!
//! editor.create_table(
//!     "npcs",
//!     &TableDefinition::new(vec![
//!         ColumnDefinition::primary_key("entity", "int"),
//!         ColumnDefinition::new("name", "text"),
//!         ColumnDefinition::new("job", "text"),
//!     ]),
//! ).unwrap();
//!
//! // Full table rewrite under one transaction:
//! editor.destroy_column("npcs", "job").unwrap();
//!
//! let schema = editor.describe_tables().unwrap();
//! assert_eq!(schema["npcs"].column_names(), vec!["entity", "name"]);
//! ```

mod connection;
mod editor;
mod error;
mod introspect;
mod sql;

pub use connection::Database;
pub use editor::SchemaEditor;
pub use error::{Result, StoreError};
