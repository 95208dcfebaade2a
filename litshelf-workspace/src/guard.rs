// SPDX-License-Identifier: MIT

//! Schema guard: keeps a library database provably in sync with the
//! canonical schema.
//!
//! Two independent checks run on every open, marker first (cheap, via
//! the `schema_meta` version/hash rows), shape second (introspects
//! tables and columns). The marker is write-once: stamping uses
//! `INSERT OR IGNORE` so a second stamp never overwrites the first.

use std::collections::BTreeMap;
use std::fmt;

use litshelf_schema::ExpectedSchema;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{Result, WorkspaceError};

/// Applies the full canonical DDL to a freshly opened database.
///
/// The DDL is idempotent (`CREATE TABLE IF NOT EXISTS`), but the
/// creation path only ever runs this against an empty database.
pub fn apply_canonical_schema(conn: &Connection, schema_sql: &str) -> Result<()> {
    conn.execute_batch(schema_sql)?;
    debug!("applied canonical schema");
    Ok(())
}

/// Writes the `schema_version` and `schema_hash` marker rows.
///
/// Insert-or-ignore semantics make the stamp write-once even if called
/// twice; an existing marker is never overwritten in v1.
pub fn stamp_schema_meta(conn: &Connection, version: &str, hash: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", version],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta(key, value) VALUES (?1, ?2)",
        params!["schema_hash", hash],
    )?;
    Ok(())
}

/// Verifies both marker rows against the expected version and hash.
pub fn verify_schema_meta(conn: &Connection, expected_version: &str, expected_hash: &str) -> Result<()> {
    let version = meta_value(conn, "schema_version")?;
    match version {
        None => {
            return Err(WorkspaceError::schema_mismatch(
                "schema_meta missing schema_version.",
                "schema_meta.schema_version missing",
            ));
        }
        Some(v) if v != expected_version => {
            return Err(WorkspaceError::schema_mismatch(
                "Unsupported schema_version in library.db.",
                format!("expected schema_version='{expected_version}' got '{v}'"),
            ));
        }
        Some(_) => {}
    }

    let hash = meta_value(conn, "schema_hash")?;
    match hash {
        None => Err(WorkspaceError::schema_mismatch(
            "schema_meta missing schema_hash.",
            "schema_meta.schema_hash missing",
        )),
        Some(h) if h != expected_hash => Err(WorkspaceError::schema_mismatch(
            "schema_hash mismatch.",
            format!("expected schema_hash={expected_hash} got {h}"),
        )),
        Some(_) => Ok(()),
    }
}

fn meta_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM schema_meta WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Structural difference between the live database and the expected shape.
///
/// Empty means the shapes agree; [`fmt::Display`] renders the
/// multi-section mismatch report (sections omitted when empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDiff {
    pub missing_tables: Vec<String>,
    pub unexpected_tables: Vec<String>,
    pub column_diffs: Vec<ColumnDiff>,
}

/// Column-level mismatch for a table present on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDiff {
    pub table: String,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl ShapeDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_tables.is_empty()
            && self.unexpected_tables.is_empty()
            && self.column_diffs.is_empty()
    }
}

impl fmt::Display for ShapeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SCHEMA_MISMATCH")?;
        if !self.missing_tables.is_empty() {
            writeln!(f)?;
            writeln!(f, "Missing tables:")?;
            for t in &self.missing_tables {
                writeln!(f, "  - {t}")?;
            }
        }
        if !self.unexpected_tables.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unexpected tables:")?;
            for t in &self.unexpected_tables {
                writeln!(f, "  - {t}")?;
            }
        }
        if !self.column_diffs.is_empty() {
            writeln!(f)?;
            writeln!(f, "Column mismatches:")?;
            for diff in &self.column_diffs {
                writeln!(f, "  - {}:", diff.table)?;
                writeln!(f, "      missing: {:?}", diff.missing)?;
                writeln!(f, "      unexpected: {:?}", diff.unexpected)?;
            }
        }
        Ok(())
    }
}

/// Computes the structural diff between the live database and `expected`.
///
/// Column comparison is membership-only: order and declared types are
/// not part of shape validation in v1.
pub fn diff_schema(conn: &Connection, expected: &ExpectedSchema) -> Result<ShapeDiff> {
    let actual = introspect_schema(conn)?;

    let mut diff = ShapeDiff::default();

    for table in &expected.tables {
        if !actual.contains_key(table.name) {
            diff.missing_tables.push(table.name.to_string());
        }
    }
    for name in actual.keys() {
        if !expected.tables.iter().any(|t| t.name == name) {
            diff.unexpected_tables.push(name.clone());
        }
    }

    for table in &expected.tables {
        let Some(actual_cols) = actual.get(table.name) else {
            continue;
        };
        let missing: Vec<String> = table
            .columns
            .iter()
            .filter(|c| !actual_cols.iter().any(|a| a == *c))
            .map(|c| c.to_string())
            .collect();
        let unexpected: Vec<String> = actual_cols
            .iter()
            .filter(|a| !table.columns.contains(&a.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            diff.column_diffs.push(ColumnDiff {
                table: table.name.to_string(),
                missing,
                unexpected,
            });
        }
    }

    Ok(diff)
}

/// Fails with `SchemaMismatch` if the live shape differs from `expected`.
pub fn validate_schema_shape(conn: &Connection, expected: &ExpectedSchema) -> Result<()> {
    let diff = diff_schema(conn, expected)?;
    if diff.is_empty() {
        debug!("schema shape validated");
        Ok(())
    } else {
        Err(WorkspaceError::schema_mismatch(
            "Database schema mismatch.",
            diff.to_string(),
        ))
    }
}

/// Non-system tables and their column names, sorted by table name.
fn introspect_schema(conn: &Connection) -> Result<BTreeMap<String, Vec<String>>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type='table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<_>>()?;

    let mut out = BTreeMap::new();
    for table in tables {
        let mut info = conn.prepare(&format!("PRAGMA table_info({table})"))?;
        let columns: Vec<String> = info
            .query_map([], |row| row.get(1))?
            .collect::<rusqlite::Result<_>>()?;
        out.insert(table, columns);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use litshelf_schema::ExpectedTable;

    const TEST_SQL: &str = "
        CREATE TABLE IF NOT EXISTS schema_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE IF NOT EXISTS papers (paper_id TEXT PRIMARY KEY, title TEXT NOT NULL);
    ";

    fn test_expected() -> ExpectedSchema {
        ExpectedSchema {
            tables: vec![
                ExpectedTable {
                    name: "schema_meta",
                    columns: &["key", "value"],
                },
                ExpectedTable {
                    name: "papers",
                    columns: &["paper_id", "title"],
                },
            ],
        }
    }

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_canonical_schema(&conn, TEST_SQL).unwrap();
        conn
    }

    #[test]
    fn stamp_is_write_once() {
        let conn = test_db();
        stamp_schema_meta(&conn, "v1", "aaaa").unwrap();
        stamp_schema_meta(&conn, "v2", "bbbb").unwrap();

        verify_schema_meta(&conn, "v1", "aaaa").unwrap();
    }

    #[test]
    fn verify_reports_version_mismatch() {
        let conn = test_db();
        stamp_schema_meta(&conn, "v2", "aaaa").unwrap();

        let err = verify_schema_meta(&conn, "v1", "aaaa").unwrap_err();
        assert_eq!(err.kind(), "SchemaMismatch");
        assert_eq!(err.diagnostic(), "expected schema_version='v1' got 'v2'");
    }

    #[test]
    fn verify_reports_missing_marker() {
        let conn = test_db();
        let err = verify_schema_meta(&conn, "v1", "aaaa").unwrap_err();
        assert_eq!(err.diagnostic(), "schema_meta.schema_version missing");
    }

    #[test]
    fn verify_reports_hash_mismatch() {
        let conn = test_db();
        stamp_schema_meta(&conn, "v1", "bbbb").unwrap();

        let err = verify_schema_meta(&conn, "v1", "aaaa").unwrap_err();
        assert_eq!(err.diagnostic(), "expected schema_hash=aaaa got bbbb");
    }

    #[test]
    fn matching_shape_validates() {
        let conn = test_db();
        validate_schema_shape(&conn, &test_expected()).unwrap();
    }

    #[test]
    fn missing_table_detected() {
        let conn = test_db();
        conn.execute_batch("DROP TABLE papers;").unwrap();

        let diff = diff_schema(&conn, &test_expected()).unwrap();
        assert_eq!(diff.missing_tables, ["papers"]);
        assert!(diff.to_string().contains("Missing tables:"));
    }

    #[test]
    fn unexpected_table_detected() {
        let conn = test_db();
        conn.execute_batch("CREATE TABLE rogue (x);").unwrap();

        let diff = diff_schema(&conn, &test_expected()).unwrap();
        assert_eq!(diff.unexpected_tables, ["rogue"]);
        assert!(diff.to_string().contains("Unexpected tables:"));
    }

    #[test]
    fn column_drift_detected_per_table() {
        let conn = test_db();
        conn.execute_batch("ALTER TABLE papers ADD COLUMN extra TEXT;")
            .unwrap();

        let err = validate_schema_shape(&conn, &test_expected()).unwrap_err();
        let diff = err.diagnostic();
        assert!(diff.contains("SCHEMA_MISMATCH"));
        assert!(diff.contains("Column mismatches:"));
        assert!(diff.contains("papers"));
        assert!(diff.contains("extra"));
    }

    #[test]
    fn column_comparison_is_order_independent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_meta (value TEXT NOT NULL, key TEXT PRIMARY KEY);
             CREATE TABLE papers (title TEXT, paper_id TEXT);",
        )
        .unwrap();

        validate_schema_shape(&conn, &test_expected()).unwrap();
    }
}
