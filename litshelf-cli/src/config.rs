// SPDX-License-Identifier: MIT

//! Optional defaults file for the CLI, pointed at by `LITSHELF_CONFIG`.
//! Command-line flags always override these values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory workspaces are created under and listed from
    pub base_dir: PathBuf,

    /// Default source tags for new workspaces
    pub sources: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./projects"),
            sources: vec!["pmc".to_string(), "biorxiv".to_string()],
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(
                format!("Failed to read config file at {}", path.display()),
                e.to_string(),
            )
        })?;
        toml::from_str(&contents).map_err(|e| {
            CliError::config(
                format!("Failed to parse config file at {}", path.display()),
                e.to_string(),
            )
        })
    }

    pub fn load() -> Result<Self> {
        match std::env::var("LITSHELF_CONFIG") {
            Ok(path) => Self::from_file(&PathBuf::from(path)),
            Err(_) => Ok(Self::default()),
        }
    }
}
