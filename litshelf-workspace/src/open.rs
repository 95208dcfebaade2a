// SPDX-License-Identifier: MIT

//! Read-only verification open of an existing workspace.

use std::path::Path;

use litshelf_schema::{ExpectedSchema, SCHEMA_VERSION, schema_hash};
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, WorkspaceError};
use crate::guard;
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::types::{DB_FILE, ProjectInfo, ProjectStatus};

/// Opens a workspace directory: validates the manifest, then runs the
/// schema guard (marker first, shape second) against `library.db`.
///
/// Never mutates the manifest or the database; the connection is opened
/// read-only and dropped before returning.
pub fn open_project(
    project_dir: &Path,
    expected_schema: &ExpectedSchema,
    canonical_schema_sql: &str,
) -> Result<ProjectInfo> {
    let manifest_path = project_dir.join(MANIFEST_FILE);
    let database_path = project_dir.join(DB_FILE);

    let manifest = Manifest::load(&manifest_path)?;
    manifest.validate_v1(project_dir)?;

    if !database_path.exists() {
        return Err(WorkspaceError::open(
            "library.db not found.",
            database_path.display().to_string(),
        ));
    }

    let hash = schema_hash(canonical_schema_sql);
    let conn = Connection::open_with_flags(&database_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    guard::verify_schema_meta(&conn, SCHEMA_VERSION, &hash)?;
    guard::validate_schema_shape(&conn, expected_schema)?;
    drop(conn);

    debug!("opened workspace {}", manifest.project_id);
    Ok(ProjectInfo {
        project_id: manifest.project_id,
        project_dir: project_dir.to_path_buf(),
        manifest_path,
        database_path,
        status: ProjectStatus::Opened,
    })
}
