// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use litshelf_workspace::ProjectConfig;

pub fn valid_config(base_dir: &Path) -> ProjectConfig {
    let mut config = ProjectConfig::new(
        "bladder_smc_strain",
        "Effects of cyclic mechanical strain on bladder smooth muscle cells",
        base_dir,
    );
    config.notes = Some("Initial literature exploration for review paper".into());
    config
}

/// Temp-prefixed staging leftovers under `base_dir`.
pub fn staging_leftovers(base_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(base_dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with(".tmp_"))
        })
        .collect()
}
