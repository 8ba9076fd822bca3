//! Statement rendering for schema mutations.
//!
//! Every statement the editor issues is generated here, so the exact SQL text
//! for each operation lives in one place. The shapes matter: SQLite persists
//! `CREATE TABLE` text verbatim in `sqlite_schema`, so two databases reach
//! byte-identical serializations only when the statement text matches too.
//!
//! Table and column names are interpolated verbatim, with no quoting or
//! escaping. Names originate from the caller, which is responsible for
//! supplying identifiers the dialect accepts bare.

use schema_edit_core::{ColumnDefinition, TableDefinition, TableDefinitions};

/// Renders a single column definition: `name type` plus a `PRIMARY KEY`
/// suffix when flagged.
fn render_column(column: &ColumnDefinition) -> String {
    if column.is_primary_key {
        format!("{} {} PRIMARY KEY", column.name, column.column_type)
    } else {
        format!("{} {}", column.name, column.column_type)
    }
}

/// Renders the column list of a `CREATE TABLE` statement, in declaration
/// order.
fn render_column_list(definition: &TableDefinition) -> String {
    definition
        .columns
        .iter()
        .map(render_column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined bare column names, used in the rewrite's copy statements.
fn render_name_list(definition: &TableDefinition) -> String {
    definition.column_names().join(",")
}

/// `CREATE TABLE` statement for a new table with full constraints.
pub(crate) fn create_table(name: &str, definition: &TableDefinition) -> String {
    format!("CREATE TABLE {} ({})", name, render_column_list(definition))
}

/// `ALTER TABLE ... RENAME TO ...` statement.
pub(crate) fn rename_table(old_name: &str, new_name: &str) -> String {
    format!("ALTER TABLE {old_name} RENAME TO {new_name}")
}

/// `ALTER TABLE ... ADD COLUMN ...` statement appending one column.
pub(crate) fn add_column(table: &str, column: &ColumnDefinition) -> String {
    format!("ALTER TABLE {} ADD COLUMN {}", table, render_column(column))
}

/// Derives a scratch table name for the rewrite that collides with nothing
/// in the snapshot: the table name with underscores appended until unique.
pub(crate) fn scratch_table_name(table: &str, schema: &TableDefinitions) -> String {
    let mut candidate = format!("{table}_");
    while schema.contains_key(&candidate) {
        candidate.push('_');
    }
    candidate
}

/// The column-removal rewrite as an ordered statement sequence.
///
/// `retained` is the original definition minus the removed column, with
/// primary-key flags carried over. The sequence copies data out to a
/// temporary scratch table (bare columns, no constraints — it only holds
/// data in flight), drops and re-creates the original table with the
/// retained columns and their original constraints, copies the data back,
/// and drops the scratch table. The caller wraps the whole sequence in one
/// transaction.
pub(crate) fn destroy_column(
    table: &str,
    retained: &TableDefinition,
    scratch: &str,
) -> Vec<String> {
    let names = render_name_list(retained);
    vec![
        format!("CREATE TEMPORARY TABLE {scratch}({names})"),
        format!("INSERT INTO {scratch} SELECT {names} FROM {table}"),
        format!("DROP TABLE {table}"),
        create_table(table, retained),
        format!("INSERT INTO {table} SELECT {names} FROM {scratch}"),
        format!("DROP TABLE {scratch}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npcs_without_job() -> TableDefinition {
        TableDefinition::new(vec![
            ColumnDefinition::primary_key("entity", "int"),
            ColumnDefinition::new("name", "text"),
        ])
    }

    #[test]
    fn test_create_table_statement_shape() {
        let def = TableDefinition::new(vec![
            ColumnDefinition::primary_key("entity", "int"),
            ColumnDefinition::new("favorite_color", "text"),
        ]);
        assert_eq!(
            create_table("ktulu", &def),
            "CREATE TABLE ktulu (entity int PRIMARY KEY, favorite_color text)"
        );
    }

    #[test]
    fn test_rename_table_statement_shape() {
        assert_eq!(
            rename_table("npcs", "people"),
            "ALTER TABLE npcs RENAME TO people"
        );
    }

    #[test]
    fn test_add_column_statement_shape() {
        assert_eq!(
            add_column("npcs", &ColumnDefinition::new("hp", "int")),
            "ALTER TABLE npcs ADD COLUMN hp int"
        );
    }

    #[test]
    fn test_destroy_column_statement_sequence() {
        let statements = destroy_column("npcs", &npcs_without_job(), "npcs_");
        assert_eq!(
            statements,
            vec![
                "CREATE TEMPORARY TABLE npcs_(entity,name)",
                "INSERT INTO npcs_ SELECT entity,name FROM npcs",
                "DROP TABLE npcs",
                "CREATE TABLE npcs (entity int PRIMARY KEY, name text)",
                "INSERT INTO npcs SELECT entity,name FROM npcs_",
                "DROP TABLE npcs_",
            ]
        );
    }

    #[test]
    fn test_scratch_name_is_table_plus_underscore() {
        let schema = TableDefinitions::new();
        assert_eq!(scratch_table_name("npcs", &schema), "npcs_");
    }

    #[test]
    fn test_scratch_name_probes_past_collisions() {
        let mut schema = TableDefinitions::new();
        schema.insert("npcs_".to_string(), TableDefinition::default());
        schema.insert("npcs__".to_string(), TableDefinition::default());
        assert_eq!(scratch_table_name("npcs", &schema), "npcs___");
    }
}
