// SPDX-License-Identifier: MIT

//! Result types returned to callers (CLI, GUI).

use std::path::PathBuf;

use serde::Serialize;

/// File name of the SQLite database inside a workspace directory.
pub const DB_FILE: &str = "library.db";

/// Fixed subfolder set created inside every workspace.
pub const WORKSPACE_SUBDIRS: [&str; 6] =
    ["pdfs", "ingested", "indexes", "drafts", "exports", "logs"];

/// Whether [`ProjectInfo`] came from a creation or a verification open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Created,
    Opened,
}

/// Metadata for a successfully created or opened workspace.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub project_id: String,
    pub project_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub database_path: PathBuf,
    pub status: ProjectStatus,
}

/// Read-only listing entry; recomputed on every scan, never persisted.
///
/// Invalid entries are a display aid: `valid` is false, `project_id`
/// falls back to the directory name and `error` carries the reason.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub project_name: String,
    pub project_dir: PathBuf,
    pub created_at: String,
    pub topic_prompt: String,
    pub valid: bool,
    pub error: Option<String>,
}
