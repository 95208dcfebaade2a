// SPDX-License-Identifier: MIT

use litshelf_workspace::WorkspaceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        diagnostic: String,
    },
}

impl CliError {
    pub fn config(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Short user-facing message for the JSON error payload.
    pub fn message(&self) -> String {
        match self {
            Self::Workspace(e) => e.message(),
            Self::Config { message, .. } => message.clone(),
        }
    }

    /// Developer-facing diagnostic for the JSON error payload.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Workspace(e) => e.diagnostic(),
            Self::Config { diagnostic, .. } => diagnostic.clone(),
        }
    }
}
