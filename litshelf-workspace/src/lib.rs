// SPDX-License-Identifier: MIT

//! Lifecycle management for self-contained project workspaces.
//!
//! A workspace is a directory holding a fixed subfolder layout, a JSON
//! manifest and a SQLite library database whose schema is pinned to a
//! known version. This crate implements the atomic creation protocol
//! (stage, build, verify, promote-by-rename) and the schema guard that
//! detects drift between the on-disk database and the schema the
//! running code expects.
//!
//! Single-threaded, synchronous, blocking I/O throughout. Operations
//! either complete or fail with a typed [`WorkspaceError`]; creation
//! rolls its staging directory back on any failure, so a half-built
//! workspace is never visible under its final name.
//!
//! The canonical schema and expected shape come from an external
//! registry (`litshelf-schema`) and are passed into every operation.

mod config;
mod create;
mod error;
pub mod guard;
mod journal;
mod list;
mod manifest;
mod open;
mod types;

pub use config::{ALLOWED_SOURCES, CITATION_STYLE_V1, ProjectConfig};
pub use create::create_project;
pub use error::{IoContext, Result, WorkspaceError};
pub use journal::PROJECT_LOG;
pub use list::list_projects;
pub use manifest::{MANIFEST_FILE, MANIFEST_VERSION, Manifest, STATUS_ACTIVE};
pub use open::open_project;
pub use types::{DB_FILE, ProjectInfo, ProjectStatus, ProjectSummary, WORKSPACE_SUBDIRS};
