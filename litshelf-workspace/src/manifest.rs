// SPDX-License-Identifier: MIT

//! The per-workspace `manifest.json` document (v1, strict).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoContext, Result, WorkspaceError};

/// File name of the manifest inside a workspace directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Version literal every v1 manifest must declare.
pub const MANIFEST_VERSION: &str = "v1";

/// Lifecycle status written at creation time.
pub const STATUS_ACTIVE: &str = "active";

/// Persisted JSON manifest. Written exactly once, after the database
/// has been fully built and verified; never rewritten on open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project_id: String,
    pub project_name: String,
    pub topic_prompt: String,
    /// ISO-8601 UTC, second precision, `Z`-suffixed
    pub created_at: String,
    pub sources: Vec<String>,
    pub citation_style: String,
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Manifest {
    /// Reads and parses a manifest, mapping absence and corruption to
    /// distinct `OpenError` diagnostics. Required keys are enforced by
    /// deserialization.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WorkspaceError::open("manifest.json not found.", e.to_string())
            } else {
                WorkspaceError::open("manifest.json is corrupt or unreadable.", e.to_string())
            }
        })?;
        serde_json::from_str(&text).map_err(|e| {
            WorkspaceError::open("manifest.json is corrupt or unreadable.", e.to_string())
        })
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            WorkspaceError::Creation {
                message: "Failed to serialize manifest.".into(),
                diagnostic: e.to_string(),
            }
        })?;
        fs::write(path, json + "\n")
            .io_context(|| format!("Failed to write manifest at {}", path.display()))
    }

    /// Checks the v1 invariants: version literal and the id/directory
    /// agreement that every open and listing relies on.
    pub fn validate_v1(&self, expected_project_dir: &Path) -> Result<()> {
        if self.version != MANIFEST_VERSION {
            return Err(WorkspaceError::open(
                "Unsupported manifest version. Expected v1.",
                format!("version={:?}", self.version),
            ));
        }

        let dir_name = expected_project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.project_id != dir_name {
            return Err(WorkspaceError::open(
                "Manifest project_id does not match folder name.",
                format!("manifest={:?} folder={:?}", self.project_id, dir_name),
            ));
        }

        Ok(())
    }
}
