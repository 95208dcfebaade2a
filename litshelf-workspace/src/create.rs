// SPDX-License-Identifier: MIT

//! Atomic workspace creation.
//!
//! The transaction builds everything under a uniquely named staging
//! directory and promotes it with one same-volume rename:
//!
//! 1. validate config (nothing touched on failure)
//! 2. uniqueness checks (name scan, id existence)
//! 3. staging directory + fixed subfolders (exclusive create)
//! 4. database init: apply schema, stamp marker, re-verify marker + shape
//! 5. manifest written last, re-read and re-validated
//! 6. rename staging -> final
//!
//! Rollback on any failure after staging exists: best-effort `create.failed`
//! log line, then recursive removal of the staging directory. A workspace
//! directory is therefore never visible under its final name in a
//! half-built state. The rename is atomic only within one filesystem;
//! base directory and staging must not span a volume boundary.

use std::fs;
use std::path::{Path, PathBuf};

use litshelf_schema::{ExpectedSchema, SCHEMA_VERSION, schema_hash};
use rusqlite::Connection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ProjectConfig;
use crate::error::{IoContext, Result, WorkspaceError};
use crate::guard;
use crate::journal::{self, PROJECT_LOG};
use crate::manifest::{MANIFEST_FILE, MANIFEST_VERSION, Manifest, STATUS_ACTIVE};
use crate::types::{DB_FILE, ProjectInfo, ProjectStatus, WORKSPACE_SUBDIRS};

/// Creates a new workspace under `config.base_dir`.
///
/// The registry (canonical DDL plus expected shape) is passed in
/// explicitly; the core never hardcodes a schema.
pub fn create_project(
    config: &ProjectConfig,
    expected_schema: &ExpectedSchema,
    canonical_schema_sql: &str,
) -> Result<ProjectInfo> {
    config.validate()?;

    let project_id = format!("{}_{}", journal::utc_today(), config.project_name);
    let final_dir = config.base_dir.join(&project_id);

    let collisions = scan_for_project_name(&config.base_dir, &config.project_name);
    if !collisions.is_empty() {
        let found: Vec<String> = collisions
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Err(WorkspaceError::DuplicateName {
            message: format!(
                "Duplicate project_name '{}' already exists.",
                config.project_name
            ),
            diagnostic: format!("found_in={}", found.join(",")),
        });
    }
    if final_dir.exists() {
        return Err(WorkspaceError::DuplicateId {
            message: format!("Duplicate project_id '{project_id}' already exists."),
            diagnostic: final_dir.display().to_string(),
        });
    }

    let staging_dir = config
        .base_dir
        .join(format!(".tmp_{project_id}_{}", Uuid::new_v4().simple()));
    let log_path = staging_dir.join("logs").join(PROJECT_LOG);

    match build_and_promote(
        config,
        expected_schema,
        canonical_schema_sql,
        &project_id,
        &staging_dir,
        &final_dir,
    ) {
        Ok(()) => {}
        Err(err) => return Err(roll_back(&staging_dir, &log_path, err)),
    }

    info!("created workspace {project_id} at {}", final_dir.display());
    Ok(ProjectInfo {
        project_id,
        manifest_path: final_dir.join(MANIFEST_FILE),
        database_path: final_dir.join(DB_FILE),
        project_dir: final_dir,
        status: ProjectStatus::Created,
    })
}

fn build_and_promote(
    config: &ProjectConfig,
    expected_schema: &ExpectedSchema,
    canonical_schema_sql: &str,
    project_id: &str,
    staging_dir: &Path,
    final_dir: &Path,
) -> Result<()> {
    let created_at = journal::utc_now_iso();
    let log_path = staging_dir.join("logs").join(PROJECT_LOG);
    let db_path = staging_dir.join(DB_FILE);
    let manifest_path = staging_dir.join(MANIFEST_FILE);

    fs::create_dir_all(&config.base_dir).io_context(|| {
        format!(
            "Failed to create base directory {}",
            config.base_dir.display()
        )
    })?;
    ensure_staging_tree(staging_dir)?;

    journal::log_event(
        &log_path,
        "INFO",
        "create.start",
        &format!(
            "project_name={} sources={} citation_style={}",
            config.project_name,
            config.sources.join(","),
            config.citation_style
        ),
    )?;
    journal::log_event(&log_path, "INFO", "create.dirs_created", "")?;

    journal::log_event(
        &log_path,
        "INFO",
        "create.db_init",
        &format!("path={}", db_path.display()),
    )?;
    let hash = schema_hash(canonical_schema_sql);
    let conn = Connection::open(&db_path)?;
    guard::apply_canonical_schema(&conn, canonical_schema_sql)?;
    guard::stamp_schema_meta(&conn, SCHEMA_VERSION, &hash)?;
    // Immediate re-verification defends against a DDL script that does
    // not actually produce the declared shape.
    guard::verify_schema_meta(&conn, SCHEMA_VERSION, &hash)?;
    guard::validate_schema_shape(&conn, expected_schema)?;
    journal::log_event(&log_path, "INFO", "create.schema_validated", "")?;

    // No handle may be held across the rename.
    conn.close().map_err(|(_, e)| WorkspaceError::from(e))?;

    // Manifest last: a directory containing a manifest is guaranteed to
    // already hold a verified database.
    let manifest = Manifest {
        project_id: project_id.to_string(),
        project_name: config.project_name.clone(),
        topic_prompt: config.topic_prompt.clone(),
        created_at,
        sources: config.sources.clone(),
        citation_style: config.citation_style.clone(),
        status: STATUS_ACTIVE.to_string(),
        version: MANIFEST_VERSION.to_string(),
        notes: config.notes.clone(),
    };
    manifest.write(&manifest_path)?;
    journal::log_event(
        &log_path,
        "INFO",
        "create.manifest_written",
        &format!("path={}", manifest_path.display()),
    )?;

    // Re-read to defend against serialization bugs.
    Manifest::load(&manifest_path)?.validate_v1(final_dir)?;

    fs::rename(staging_dir, final_dir).io_context(|| {
        format!(
            "Failed to promote staging directory to {}",
            final_dir.display()
        )
    })?;
    debug!("promoted staging to {}", final_dir.display());

    journal::log_event(
        &final_dir.join("logs").join(PROJECT_LOG),
        "INFO",
        "create.finalized",
        &format!("project_dir={}", final_dir.display()),
    )?;

    Ok(())
}

/// Exclusive creation of the staging directory and its fixed subfolders.
fn ensure_staging_tree(staging_dir: &Path) -> Result<()> {
    fs::create_dir(staging_dir).io_context(|| {
        format!(
            "Failed to create staging directory {}",
            staging_dir.display()
        )
    })?;
    for sub in WORKSPACE_SUBDIRS {
        let dir = staging_dir.join(sub);
        fs::create_dir(&dir)
            .io_context(|| format!("Failed to create subdirectory {}", dir.display()))?;
    }
    Ok(())
}

/// Best-effort failure logging, then guaranteed staging removal.
///
/// Returns the error the caller should propagate: the original one, or
/// `Filesystem` wrapping it when the removal itself failed.
fn roll_back(staging_dir: &Path, log_path: &Path, err: WorkspaceError) -> WorkspaceError {
    if !staging_dir.exists() {
        return err;
    }

    // Logging failures are swallowed; rollback must still run.
    let _ = journal::log_event(
        log_path,
        "ERROR",
        "create.failed",
        &format!("error={} detail={err}", err.kind()),
    );
    let _ = journal::append_line(log_path, &error_chain(&err));

    if let Err(rm_err) = fs::remove_dir_all(staging_dir) {
        return WorkspaceError::Filesystem {
            message: "Creation failed and rollback also failed.".into(),
            diagnostic: rm_err.to_string(),
            source: Box::new(err),
        };
    }
    err
}

fn error_chain(err: &WorkspaceError) -> String {
    let mut out = String::from("error chain:");
    let mut current: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = current {
        out.push_str(&format!("\n  {e}"));
        current = e.source();
    }
    out
}

/// Directories under `base_dir` whose parsable v1 manifest declares
/// `project_name`. Corrupt manifests are skipped here; the listing
/// path is responsible for flagging them.
fn scan_for_project_name(base_dir: &Path, project_name: &str) -> Vec<PathBuf> {
    let mut hits = Vec::new();
    let Ok(entries) = fs::read_dir(base_dir) else {
        return hits;
    };
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Ok(text) = fs::read_to_string(dir.join(MANIFEST_FILE)) else {
            continue;
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            continue;
        };
        if value.get("version").and_then(|v| v.as_str()) == Some(MANIFEST_VERSION)
            && value.get("project_name").and_then(|v| v.as_str()) == Some(project_name)
        {
            hits.push(dir);
        }
    }
    hits
}
