//! Core types for modeling SQLite table structure.
//!
//! This crate defines the data model shared by the schema-edit workspace:
//!
//! - [`ColumnDefinition`] — a single column (name, declared type, primary-key
//!   flag).
//! - [`TableDefinition`] — an ordered sequence of column definitions; order is
//!   declaration order and is significant for rewrite operations.
//! - [`TableDefinitions`] — a schema snapshot mapping table names to their
//!   definitions.
//!
//! # Example
//!
//! ```
//! use schema_edit_core::{ColumnDefinition, TableDefinition};
//!
//! let npcs = TableDefinition::new(vec![
//!     ColumnDefinition::primary_key("entity", "int"),
//!     ColumnDefinition::new("name", "text"),
//!     ColumnDefinition::new("job", "text"),
//! ]);
//!
//! assert!(npcs.has_column("job"));
//! let without_job = npcs.without_column("job");
//! assert_eq!(without_job.column_names(), vec!["entity", "name"]);
//! assert!(without_job.column("entity").unwrap().is_primary_key);
//! ```

mod types;

pub use types::{ColumnDefinition, TableDefinition, TableDefinitions};
