//! Error types for cc-git

use thiserror::Error;

/// Result type alias using cc-git's error type
pub type Result<T> = std::result::Result<T, GitError>;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable is not installed or not on PATH
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    NotFound,

    /// Git ran but exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Process execution error
    #[error("Failed to run git")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Create a command failed error
    pub fn command_failed(args: &[&str], stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: args.join(" "),
            stderr: stderr.into(),
        }
    }
}
