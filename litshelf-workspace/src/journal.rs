// SPDX-License-Identifier: MIT

//! Append-only per-workspace event log (`logs/project.log`).
//!
//! One plain-text line per event: `{ISO-8601-UTC} [LEVEL] event detail`.
//! This is a domain artifact that travels with the workspace and is
//! unrelated to process-level `tracing` output.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::error::{IoContext, Result};

/// Log file name under the workspace `logs/` directory.
pub const PROJECT_LOG: &str = "project.log";

/// ISO-8601 UTC with second precision and `Z` suffix.
pub(crate) fn utc_now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// UTC calendar date, `yyyy-mm-dd`.
pub(crate) fn utc_today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub(crate) fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .io_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .io_context(|| format!("Failed to open log file {}", path.display()))?;
    writeln!(file, "{}", line.trim_end_matches('\n'))
        .io_context(|| format!("Failed to append to log file {}", path.display()))
}

pub(crate) fn log_event(path: &Path, level: &str, event: &str, detail: &str) -> Result<()> {
    let tail = if detail.is_empty() {
        String::new()
    } else {
        format!(" {detail}")
    };
    append_line(path, &format!("{} [{level}] {event}{tail}", utc_now_iso()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_second_precision_zulu() {
        let ts = utc_now_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }

    #[test]
    fn events_append_one_line_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join(PROJECT_LOG);

        log_event(&path, "INFO", "create.start", "project_name=x").unwrap();
        log_event(&path, "INFO", "create.dirs_created", "").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO] create.start project_name=x"));
        assert!(lines[1].ends_with("create.dirs_created"));
    }
}
