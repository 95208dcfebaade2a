// SPDX-License-Identifier: MIT

//! Creation request and its validation rules.

use std::path::PathBuf;

use crate::error::{Result, WorkspaceError};

/// Source tags accepted in v1.
pub const ALLOWED_SOURCES: [&str; 2] = ["pmc", "biorxiv"];

/// The only citation style supported in v1.
pub const CITATION_STYLE_V1: &str = "vancouver";

/// Input to [`crate::create_project`]. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Lowercase snake_case identifier, unique per base directory
    pub project_name: String,
    /// Free-text research topic
    pub topic_prompt: String,
    /// Directory under which workspaces live
    pub base_dir: PathBuf,
    /// Must be "vancouver" in v1
    pub citation_style: String,
    /// Subset of [`ALLOWED_SOURCES`]
    pub sources: Vec<String>,
    /// Optional free-text notes, copied into the manifest
    pub notes: Option<String>,
}

impl ProjectConfig {
    /// Convenience constructor with the v1 defaults filled in.
    pub fn new(
        project_name: impl Into<String>,
        topic_prompt: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            topic_prompt: topic_prompt.into(),
            base_dir: base_dir.into(),
            citation_style: CITATION_STYLE_V1.to_string(),
            sources: ALLOWED_SOURCES.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    /// Fail-fast validation; first rule violation wins, no side effects.
    pub fn validate(&self) -> Result<()> {
        if self.project_name.is_empty() || !is_valid_name(&self.project_name) {
            return Err(WorkspaceError::invalid_name(
                "Invalid project_name. Use lowercase snake_case: a-z, 0-9, underscore.",
                format!("project_name={:?}", self.project_name),
            ));
        }
        // Redundant with the pattern above, but checked explicitly so a
        // future pattern change cannot silently admit uppercase names.
        if self.project_name != self.project_name.to_lowercase() {
            return Err(WorkspaceError::invalid_name(
                "project_name must be lowercase.",
                self.project_name.clone(),
            ));
        }

        if self.topic_prompt.trim().is_empty() {
            return Err(WorkspaceError::invalid_config(
                "topic_prompt must be non-empty.",
                "",
            ));
        }

        if self.citation_style != CITATION_STYLE_V1 {
            return Err(WorkspaceError::invalid_config(
                "citation_style must be 'vancouver' in v1.",
                self.citation_style.clone(),
            ));
        }

        let bad: Vec<&str> = self
            .sources
            .iter()
            .map(String::as_str)
            .filter(|s| !ALLOWED_SOURCES.contains(s))
            .collect();
        if !bad.is_empty() {
            return Err(WorkspaceError::invalid_config(
                format!("Invalid sources in v1: {bad:?}. Allowed: {ALLOWED_SOURCES:?}"),
                format!("sources={}", self.sources.join(",")),
            ));
        }

        Ok(())
    }
}

/// `^[a-z0-9_]+$`
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
