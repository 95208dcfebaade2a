// SPDX-License-Identifier: MIT

//! Creation-path tests: full workspace build, uniqueness checks and
//! rollback guarantees.

mod common;

use litshelf_schema::{CANONICAL_SCHEMA_SQL, expected_schema, schema_hash};
use litshelf_workspace::{
    PROJECT_LOG, ProjectStatus, WORKSPACE_SUBDIRS, WorkspaceError, create_project,
};
use rusqlite::Connection;

use common::{staging_leftovers, valid_config};

#[test]
fn create_builds_complete_workspace() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let config = valid_config(&base);

    let info = create_project(&config, &expected_schema(), CANONICAL_SCHEMA_SQL).unwrap();

    assert_eq!(info.status, ProjectStatus::Created);
    assert!(info.project_dir.exists());
    assert!(info.manifest_path.exists());
    assert!(info.database_path.exists());
    assert!(info.project_id.ends_with("_bladder_smc_strain"));
    for sub in WORKSPACE_SUBDIRS {
        assert!(info.project_dir.join(sub).is_dir(), "missing {sub}/");
    }

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&info.manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["version"], "v1");
    assert_eq!(
        manifest["project_id"],
        info.project_dir.file_name().unwrap().to_str().unwrap()
    );
    assert_eq!(manifest["project_name"], "bladder_smc_strain");
    assert_eq!(manifest["citation_style"], "vancouver");
    assert_eq!(manifest["status"], "active");
    assert_eq!(
        manifest["notes"],
        "Initial literature exploration for review paper"
    );

    let log = std::fs::read_to_string(info.project_dir.join("logs").join(PROJECT_LOG)).unwrap();
    assert!(log.contains("create.start"));
    assert!(log.contains("create.schema_validated"));
    assert!(log.contains("create.finalized"));

    // Marker rows stamped with the version literal and the DDL hash.
    let conn = Connection::open(&info.database_path).unwrap();
    let version: String = conn
        .query_row(
            "SELECT value FROM schema_meta WHERE key='schema_version'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let hash: String = conn
        .query_row(
            "SELECT value FROM schema_meta WHERE key='schema_hash'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(version, "v1");
    assert_eq!(hash, schema_hash(CANONICAL_SCHEMA_SQL));
}

#[test]
fn manifest_ends_with_trailing_newline() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");

    let info = create_project(&valid_config(&base), &expected_schema(), CANONICAL_SCHEMA_SQL)
        .unwrap();

    let text = std::fs::read_to_string(&info.manifest_path).unwrap();
    assert!(text.ends_with('\n'));
}

#[test]
fn duplicate_name_blocked_without_leftovers() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let config = valid_config(&base);

    create_project(&config, &expected_schema(), CANONICAL_SCHEMA_SQL).unwrap();
    let err = create_project(&config, &expected_schema(), CANONICAL_SCHEMA_SQL).unwrap_err();

    assert!(matches!(err, WorkspaceError::DuplicateName { .. }));
    assert!(err.diagnostic().starts_with("found_in="));

    let dirs: Vec<_> = std::fs::read_dir(&base)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    assert_eq!(dirs.len(), 1);
    assert!(staging_leftovers(&base).is_empty());
}

#[test]
fn duplicate_id_blocked() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let config = valid_config(&base);

    // An id-colliding directory without a manifest escapes the name
    // scan but must still trip the id existence check.
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let colliding = base.join(format!("{today}_bladder_smc_strain"));
    std::fs::create_dir_all(&colliding).unwrap();

    let err = create_project(&config, &expected_schema(), CANONICAL_SCHEMA_SQL).unwrap_err();
    assert!(matches!(err, WorkspaceError::DuplicateId { .. }));
}

#[test]
fn invalid_name_leaves_base_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let mut config = valid_config(&base);
    config.project_name = "Bad Name!".into();

    let err = create_project(&config, &expected_schema(), CANONICAL_SCHEMA_SQL).unwrap_err();

    assert!(matches!(err, WorkspaceError::InvalidName { .. }));
    assert!(!base.exists(), "validation failure must not touch disk");
}

#[test]
fn bad_schema_sql_rolls_back_completely() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let config = valid_config(&base);

    let err = create_project(&config, &expected_schema(), "THIS IS NOT SQL;").unwrap_err();
    assert!(matches!(err, WorkspaceError::Sqlite(_)));

    // No finalized directory and no staging remnants.
    if base.exists() {
        let dirs: Vec<_> = std::fs::read_dir(&base)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .collect();
        assert!(dirs.is_empty(), "leftover dirs: {dirs:?}");
    }
}

#[test]
fn schema_not_matching_descriptor_rolls_back() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("projects");
    let config = valid_config(&base);

    // Valid SQL producing the marker table only; the shape re-check
    // inside creation must reject it and roll back.
    let sql = "CREATE TABLE IF NOT EXISTS schema_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);";
    let err = create_project(&config, &expected_schema(), sql).unwrap_err();

    assert!(matches!(err, WorkspaceError::SchemaMismatch { .. }));
    assert!(err.diagnostic().contains("Missing tables:"));
    assert!(staging_leftovers(&base).is_empty());
}
