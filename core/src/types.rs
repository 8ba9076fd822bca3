//! Table and column definition types.
//!
//! These types describe table structure only — no row data. They are designed
//! for serialization with [`serde`] and round-trip cleanly through JSON and
//! the SQLite introspection layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A schema snapshot: every user-defined table in a database, keyed by name.
///
/// Table names are unique and case-sensitive. Snapshots are produced on
/// demand by introspecting a live database and are never cached — every
/// mutation implicitly invalidates any snapshot taken before it.
pub type TableDefinitions = BTreeMap<String, TableDefinition>;

/// Definition of a single table column.
///
/// The declared type is carried as an opaque string exactly as stored by the
/// engine (`int`, `text`, ...); no dialect translation or normalization is
/// applied anywhere in the workspace.
///
/// # Examples
///
/// ```
/// use schema_edit_core::ColumnDefinition;
///
/// let key = ColumnDefinition::primary_key("key", "text");
/// assert!(key.is_primary_key);
///
/// let value = ColumnDefinition::new("value", "text");
/// assert!(!value.is_primary_key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name, unique within its owning table definition.
    pub name: String,
    /// Declared type, passed through opaquely.
    pub column_type: String,
    /// Whether the column participates in the table's primary key.
    pub is_primary_key: bool,
}

impl ColumnDefinition {
    /// Creates a plain (non-primary-key) column definition.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            is_primary_key: false,
        }
    }

    /// Creates a primary-key column definition.
    ///
    /// At most one column per table may carry this flag; the underlying
    /// engine rejects violations, this layer does not pre-check them.
    pub fn primary_key(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            is_primary_key: true,
        }
    }
}

/// Definition of a table: its columns in declaration order.
///
/// Order is significant: the column-removal rewrite reproduces it exactly,
/// and introspection reports it as stored.
///
/// # Examples
///
/// ```
/// use schema_edit_core::{ColumnDefinition, TableDefinition};
///
/// let kv = TableDefinition::new(vec![
///     ColumnDefinition::primary_key("key", "text"),
///     ColumnDefinition::new("value", "text"),
/// ]);
/// assert_eq!(kv.columns.len(), 2);
/// assert!(kv.column("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Column definitions in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Creates a table definition from columns in declaration order.
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self { columns }
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns whether a column with the given name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns a copy of this definition with the named column excluded.
    ///
    /// Declaration order and primary-key flags of the retained columns are
    /// preserved. If no column matches, the result equals `self`.
    pub fn without_column(&self, name: &str) -> TableDefinition {
        TableDefinition {
            columns: self
                .columns
                .iter()
                .filter(|c| c.name != name)
                .cloned()
                .collect(),
        }
    }
}
