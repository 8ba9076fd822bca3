//! On-demand schema snapshots from a live database.
//!
//! Reads `sqlite_schema` for the table list and `PRAGMA table_info` for each
//! table's column order and primary-key flags. System tables (names starting
//! with `sqlite_`) are excluded.
//!
//! Declared types are reported as stored, not normalized. `table_info`
//! cannot supply them: recent SQLite versions canonicalize the type text it
//! reports (`int` becomes `INT`). The stored `CREATE TABLE` text in
//! `sqlite_schema` keeps the declaration verbatim, so types are read from
//! its column list, with the `table_info` text as a fallback when a segment
//! cannot be matched. Purely read-only: no statement issued here mutates
//! anything.

use std::collections::HashMap;

use rusqlite::Connection;
use schema_edit_core::{ColumnDefinition, TableDefinition, TableDefinitions};

use crate::error::Result;

/// Column-constraint keywords that terminate the type text in a column
/// definition segment.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "PRIMARY",
    "NOT",
    "NULL",
    "UNIQUE",
    "CHECK",
    "DEFAULT",
    "COLLATE",
    "REFERENCES",
    "GENERATED",
    "AS",
    "CONSTRAINT",
    "FOREIGN",
];

/// Produces the full schema snapshot of the given database.
pub(crate) fn describe_tables(conn: &Connection) -> Result<TableDefinitions> {
    let mut stmt = conn.prepare(
        "SELECT name, sql FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut schema = TableDefinitions::new();
    for (name, create_sql) in tables {
        let definition = describe_table(conn, &name, create_sql.as_deref())?;
        schema.insert(name, definition);
    }
    Ok(schema)
}

/// Reads one table's column definitions in declaration order.
///
/// Order and primary-key membership come from `PRAGMA table_info`; the
/// declared type text comes from the stored `CREATE TABLE` statement.
fn describe_table(
    conn: &Connection,
    table: &str,
    create_sql: Option<&str>,
) -> Result<TableDefinition> {
    let declared = create_sql.map(declared_column_types).unwrap_or_default();

    // table_info columns: cid, name, type, notnull, dflt_value, pk.
    // Rows arrive ordered by cid. pk > 0 marks primary-key membership.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| {
            let name: String = row.get(1)?;
            let reported: String = row.get(2)?;
            let column_type = declared.get(&name).cloned().unwrap_or(reported);
            Ok(ColumnDefinition {
                name,
                column_type,
                is_primary_key: row.get::<_, i64>(5)? > 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(TableDefinition::new(columns))
}

/// Extracts each column's declared type text, verbatim, from a stored
/// `CREATE TABLE` statement.
///
/// Table-level constraint segments (`PRIMARY KEY (...)`, `FOREIGN KEY ...`)
/// carry no column name and are skipped; the caller falls back to the
/// `table_info` text for any column this map does not cover.
fn declared_column_types(create_sql: &str) -> HashMap<String, String> {
    let mut types = HashMap::new();
    let Some(list) = column_list(create_sql) else {
        return types;
    };
    for segment in split_top_level(list) {
        if let Some((name, column_type)) = parse_column_segment(segment) {
            types.insert(name, column_type);
        }
    }
    types
}

/// Returns the text between the outermost parentheses of a `CREATE TABLE`
/// statement.
fn column_list(create_sql: &str) -> Option<&str> {
    let start = create_sql.find('(')?;
    let mut depth = 0usize;
    for (offset, ch) in create_sql[start..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&create_sql[start + 1..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits a column list on commas, ignoring commas nested in parentheses
/// (`VARCHAR(8,2)`) or single-quoted literals (`DEFAULT 'a,b'`).
fn split_top_level(list: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut begin = 0usize;
    for (offset, ch) in list.char_indices() {
        match ch {
            '\'' => in_string = !in_string,
            _ if in_string => {}
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&list[begin..offset]);
                begin = offset + 1;
            }
            _ => {}
        }
    }
    segments.push(&list[begin..]);
    segments
}

/// Parses one column definition segment into its name and declared type.
///
/// The type is every token after the name up to the first constraint
/// keyword; a typeless column yields an empty string, matching what
/// `table_info` reports for it.
fn parse_column_segment(segment: &str) -> Option<(String, String)> {
    let mut tokens = segment.split_whitespace();
    let name = unquote(tokens.next()?);
    if name.is_empty() || is_constraint_keyword(&name) {
        return None;
    }
    let type_tokens: Vec<&str> = tokens
        .take_while(|token| !is_constraint_keyword(token))
        .collect();
    Some((name, type_tokens.join(" ")))
}

fn is_constraint_keyword(token: &str) -> bool {
    CONSTRAINT_KEYWORDS
        .iter()
        .any(|keyword| token.eq_ignore_ascii_case(keyword))
}

/// Strips the identifier quoting styles SQLite accepts.
fn unquote(token: &str) -> String {
    let token = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| token.strip_prefix('`').and_then(|t| t.strip_suffix('`')))
        .or_else(|| token.strip_prefix('[').and_then(|t| t.strip_suffix(']')))
        .unwrap_or(token);
    token.to_string()
}
