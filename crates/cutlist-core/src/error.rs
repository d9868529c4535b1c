// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Cutlist plugin system.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error carried as the `source` of a [`CutlistError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, CutlistError>;

/// The primary error type for manifest discovery, parsing, and loading.
#[derive(Debug, Error)]
pub enum CutlistError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A manifest file is missing, unreadable, or structurally malformed.
    #[error("failed to parse manifest {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
        source: Option<BoxError>,
    },

    /// An installed package declared a manifest contribution that could not be resolved.
    #[error("plugin package `{package}`: {message}")]
    Plugin {
        package: String,
        message: String,
        source: Option<BoxError>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CutlistError {
    /// Builds a [`CutlistError::Parse`] without an underlying cause.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`CutlistError::Plugin`] without an underlying cause.
    pub fn plugin(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            package: package.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Re-labels a parse failure as a failure of the given package.
    ///
    /// Non-parse errors are returned unchanged.
    pub fn into_plugin(self, package: &str) -> Self {
        match self {
            Self::Parse {
                path,
                message,
                source,
            } => Self::Plugin {
                package: package.to_string(),
                message: format!("{}: {message}", path.display()),
                source,
            },
            other => other,
        }
    }
}
