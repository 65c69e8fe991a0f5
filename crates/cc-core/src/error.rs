//! Error types for cc-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using cc-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for claude-commit
#[derive(Error, Debug)]
pub enum Error {
    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// Configuration file exists but is not valid JSON for [`crate::Config`]
    #[error("Invalid configuration file {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}
