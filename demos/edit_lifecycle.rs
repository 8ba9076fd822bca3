//! Full schema-edit lifecycle example.
//!
//! Demonstrates opening a database file, creating a table, appending a
//! column, renaming, and removing a column via the transactional rewrite.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p schema-edit-demos --example edit_lifecycle
//! ```

use schema_edit_core::{ColumnDefinition, TableDefinition};
use schema_edit_sqlite::SchemaEditor;

fn main() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("game.db");

    let mut editor = SchemaEditor::new();
    editor.open(&db_path).unwrap();

    // === Step 1: Create a table ===
    println!("=== Create ===");
    editor
        .create_table(
            "npcs",
            &TableDefinition::new(vec![
                ColumnDefinition::primary_key("entity", "int"),
                ColumnDefinition::new("name", "text"),
                ColumnDefinition::new("job", "text"),
            ]),
        )
        .unwrap();
    print_schema(&editor);

    // Seed a couple of rows through a plain connection; the editor only
    // manages structure.
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "INSERT INTO npcs VALUES (1, 'Alex', 'Armorer');
         INSERT INTO npcs VALUES (2, 'Bob', 'Banker');",
    )
    .unwrap();
    drop(conn);

    // === Step 2: Append a column ===
    println!("\n=== Add column ===");
    editor
        .add_column("npcs", &ColumnDefinition::new("hp", "int"))
        .unwrap();
    print_schema(&editor);

    // === Step 3: Rename ===
    println!("\n=== Rename ===");
    editor.rename_table("npcs", "people").unwrap();
    print_schema(&editor);

    // A collision is silently absorbed as a no-op:
    editor.rename_table("people", "people").unwrap();

    // === Step 4: Remove a column (transactional table rewrite) ===
    println!("\n=== Destroy column ===");
    editor.destroy_column("people", "job").unwrap();
    print_schema(&editor);

    // Row data for the retained columns survived the rewrite.
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT entity, name FROM people ORDER BY entity")
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .unwrap();
    println!("\nRows after rewrite:");
    for row in rows {
        let (entity, name) = row.unwrap();
        println!("  {entity}: {name}");
    }
}

fn print_schema(editor: &SchemaEditor) {
    for (table, definition) in editor.describe_tables().unwrap() {
        let columns: Vec<String> = definition
            .columns
            .iter()
            .map(|c| {
                if c.is_primary_key {
                    format!("{} {} PK", c.name, c.column_type)
                } else {
                    format!("{} {}", c.name, c.column_type)
                }
            })
            .collect();
        println!("  {table}({})", columns.join(", "));
    }
}
