//! Reviewer CLI invocation

use crate::error::{Result, ReviewError};
use crate::prompt::build_prompt;
use crate::verdict::Verdict;
use std::ffi::OsString;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::{debug, info};

/// Reviewer executable looked up on PATH
pub const DEFAULT_REVIEWER_PROGRAM: &str = "claude";

/// Runs `claude --model <model> -p <prompt>` and classifies the reply
#[derive(Debug, Clone)]
pub struct ClaudeReviewer {
    program: OsString,
    model: String,
}

impl ClaudeReviewer {
    /// Create a reviewer using the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            program: OsString::from(DEFAULT_REVIEWER_PROGRAM),
            model: model.into(),
        }
    }

    /// Use a different reviewer executable
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Model passed to the reviewer
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Review a diff and return the verdict
    pub async fn review(&self, diff: &str, summary_mode: bool) -> Result<Verdict> {
        if diff.is_empty() {
            return Err(ReviewError::EmptyDiff);
        }

        let output = self.run(&build_prompt(diff, summary_mode)).await?;
        let verdict = Verdict::parse(&output);

        info!(
            "Review finished with model {} (issues: {})",
            self.model,
            verdict.has_issues()
        );
        Ok(verdict)
    }

    async fn run(&self, prompt: &str) -> Result<String> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(
            "Running: {} --model {} -p <{} byte prompt>",
            program,
            self.model,
            prompt.len()
        );

        let output = Command::new(&self.program)
            .arg("--model")
            .arg(&self.model)
            .arg("-p")
            .arg(prompt)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ReviewError::NotFound {
                    program: program.clone(),
                },
                _ => ReviewError::Io(e),
            })?;

        if !output.status.success() {
            return Err(ReviewError::CommandFailed {
                program,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
