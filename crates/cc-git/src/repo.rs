//! Working-tree inspection, staging, committing and pushing

use crate::error::{GitError, Result};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

const UNSTAGED_HEADER: &str = "--- UNSTAGED CHANGES ---";
const STAGED_HEADER: &str = "--- STAGED CHANGES ---";

/// Handle on a git working tree
#[derive(Debug, Clone, Default)]
pub struct GitRepo {
    /// Directory git runs in; `None` means the process working directory
    workdir: Option<PathBuf>,
}

impl GitRepo {
    /// Repository containing the current working directory
    pub fn current_dir() -> Self {
        Self { workdir: None }
    }

    /// Repository rooted at (or containing) `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(path.into()),
        }
    }

    /// Directory git commands run in, if set explicitly
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Files with staged or unstaged changes, de-duplicated and sorted
    pub async fn changed_files(&self) -> Result<Vec<String>> {
        let unstaged = self.run(&["diff", "--name-only"]).await?;
        let staged = self.run(&["diff", "--cached", "--name-only"]).await?;

        Ok(merge_file_lists(&unstaged, &staged))
    }

    /// Combined unstaged and staged diff, or an empty string when clean
    pub async fn diff(&self) -> Result<String> {
        let unstaged = self.run(&["diff"]).await?;
        let staged = self.run(&["diff", "--cached"]).await?;

        Ok(combine_diffs(&unstaged, &staged))
    }

    /// Per-file stat summary of unstaged and staged changes
    ///
    /// Used instead of [`GitRepo::diff`] when the change set is too large to
    /// send in full.
    pub async fn diff_summary(&self) -> Result<String> {
        let unstaged = self.run(&["diff", "--stat"]).await?;
        let staged = self.run(&["diff", "--cached", "--stat"]).await?;

        Ok(combine_diffs(&unstaged, &staged))
    }

    /// Stage every change in the working tree (`git add .`)
    pub async fn stage_all(&self) -> Result<()> {
        self.run(&["add", "."]).await.map(|_| ())
    }

    /// Create a commit with the given message
    pub async fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).await.map(|_| ())
    }

    /// Push the current branch to its upstream
    pub async fn push(&self) -> Result<()> {
        self.run(&["push"]).await.map(|_| ())
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        debug!("Running: git {}", args.join(" "));
        let output = cmd.output().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => GitError::NotFound,
            _ => GitError::Io(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::command_failed(args, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Union of two newline-separated file lists
fn merge_file_lists(unstaged: &str, staged: &str) -> Vec<String> {
    unstaged
        .lines()
        .chain(staged.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn combine_diffs(unstaged: &str, staged: &str) -> String {
    if unstaged.is_empty() && staged.is_empty() {
        return String::new();
    }

    format!("{UNSTAGED_HEADER}\n{unstaged}\n{STAGED_HEADER}\n{staged}")
}
