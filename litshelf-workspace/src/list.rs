// SPDX-License-Identifier: MIT

//! Directory index: manifest-level scan of a base directory.
//!
//! Validity here is purely manifest-level, a cheap pre-filter before a
//! caller decides to attempt a full open; the database is never touched.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{IoContext, Result};
use crate::manifest::{MANIFEST_FILE, MANIFEST_VERSION, Manifest};
use crate::types::ProjectSummary;

/// Scans `base_dir` for workspaces, in stable directory-name order.
///
/// A missing base directory yields an empty list. Directories without a
/// manifest are skipped entirely. A manifest that fails to parse, or
/// declares the wrong version, or an id that differs from its directory
/// name, yields a flagged entry (`valid=false`) instead of an error so
/// one corrupt workspace never hides the others.
pub fn list_projects(base_dir: &Path) -> Result<Vec<ProjectSummary>> {
    let mut out = Vec::new();
    if !base_dir.exists() {
        return Ok(out);
    }

    let mut dirs: Vec<_> = fs::read_dir(base_dir)
        .io_context(|| format!("Failed to read base directory {}", base_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            continue;
        }
        match summarize(&dir, &manifest_path) {
            Ok(summary) => out.push(summary),
            Err(reason) => out.push(ProjectSummary {
                project_id: dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                project_name: "(unknown)".to_string(),
                project_dir: dir,
                created_at: String::new(),
                topic_prompt: String::new(),
                valid: false,
                error: Some(reason),
            }),
        }
    }

    debug!("listed {} workspace(s) under {}", out.len(), base_dir.display());
    Ok(out)
}

fn summarize(dir: &Path, manifest_path: &Path) -> std::result::Result<ProjectSummary, String> {
    let text = fs::read_to_string(manifest_path).map_err(|e| e.to_string())?;
    let manifest: Manifest = serde_json::from_str(&text).map_err(|e| e.to_string())?;

    if manifest.version != MANIFEST_VERSION {
        return Err(format!("Unsupported version: {:?}", manifest.version));
    }
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if manifest.project_id != dir_name {
        return Err("project_id mismatch".to_string());
    }

    Ok(ProjectSummary {
        project_id: manifest.project_id,
        project_name: manifest.project_name,
        project_dir: dir.to_path_buf(),
        created_at: manifest.created_at,
        topic_prompt: manifest.topic_prompt,
        valid: true,
        error: None,
    })
}
