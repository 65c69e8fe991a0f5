//! Error types for cc-review

use thiserror::Error;

/// Result type alias using cc-review's error type
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Reviewer invocation errors
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Nothing to review
    #[error("no changes detected")]
    EmptyDiff,

    /// The reviewer CLI is not installed or not on PATH
    #[error("Reviewer command not found: {program}")]
    NotFound { program: String },

    /// The reviewer CLI exited unsuccessfully
    #[error("{program} command failed (exit code: {code}), stderr: {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    /// Process execution error
    #[error("Failed to run reviewer")]
    Io(#[from] std::io::Error),
}
