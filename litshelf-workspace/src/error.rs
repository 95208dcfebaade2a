// SPDX-License-Identifier: MIT

//! Error types for workspace operations.
//!
//! Every variant carries a short user-facing message plus a developer
//! diagnostic (possibly multi-line); the CLI and GUI layers split the
//! two via [`WorkspaceError::message`] and [`WorkspaceError::diagnostic`].

use thiserror::Error;

/// Result type for workspace operations.
pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// Errors that can occur while creating, opening or listing workspaces.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Project name failed the identifier rules
    #[error("{message}")]
    InvalidName { message: String, diagnostic: String },

    /// Config invalid beyond the name (topic, citation style, sources)
    #[error("{message}")]
    InvalidConfig { message: String, diagnostic: String },

    /// Another workspace already declares this project name
    #[error("{message}")]
    DuplicateName { message: String, diagnostic: String },

    /// A directory with the exact workspace id already exists
    #[error("{message}")]
    DuplicateId { message: String, diagnostic: String },

    /// Manifest missing, corrupt, or inconsistent with its directory
    #[error("{message}")]
    Open { message: String, diagnostic: String },

    /// Database structure drifted from the canonical schema
    #[error("{message}")]
    SchemaMismatch { message: String, diff: String },

    /// Rollback failed; the original failure stays inspectable as source
    #[error("{message}")]
    Filesystem {
        message: String,
        diagnostic: String,
        #[source]
        source: Box<WorkspaceError>,
    },

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error with context
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Anything unanticipated during creation
    #[error("{message}")]
    Creation { message: String, diagnostic: String },
}

impl WorkspaceError {
    pub fn invalid_name(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn open(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::Open {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn schema_mismatch(message: impl Into<String>, diff: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
            diff: diff.into(),
        }
    }

    /// Stable variant tag, used in workspace log lines and by callers
    /// mapping errors to exit codes or dialogs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "InvalidName",
            Self::InvalidConfig { .. } => "InvalidConfig",
            Self::DuplicateName { .. } => "DuplicateName",
            Self::DuplicateId { .. } => "DuplicateId",
            Self::Open { .. } => "OpenError",
            Self::SchemaMismatch { .. } => "SchemaMismatch",
            Self::Filesystem { .. } => "FilesystemError",
            Self::Sqlite(_) => "SqliteError",
            Self::Io { .. } => "IoError",
            Self::Creation { .. } => "CreationError",
        }
    }

    /// Short user-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidName { message, .. }
            | Self::InvalidConfig { message, .. }
            | Self::DuplicateName { message, .. }
            | Self::DuplicateId { message, .. }
            | Self::Open { message, .. }
            | Self::SchemaMismatch { message, .. }
            | Self::Filesystem { message, .. }
            | Self::Creation { message, .. }
            | Self::Io { message, .. } => message.clone(),
            Self::Sqlite(_) => "SQLite error".to_string(),
        }
    }

    /// Developer-facing diagnostic; may be large and multi-line.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::InvalidName { diagnostic, .. }
            | Self::InvalidConfig { diagnostic, .. }
            | Self::DuplicateName { diagnostic, .. }
            | Self::DuplicateId { diagnostic, .. }
            | Self::Open { diagnostic, .. }
            | Self::Filesystem { diagnostic, .. }
            | Self::Creation { diagnostic, .. } => diagnostic.clone(),
            Self::SchemaMismatch { diff, .. } => diff.clone(),
            Self::Sqlite(e) => e.to_string(),
            Self::Io { source, .. } => source.to_string(),
        }
    }
}

/// Helper trait for adding context to IO errors
pub trait IoContext<T> {
    fn io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| WorkspaceError::Io {
            message: f(),
            source: e,
        })
    }
}
