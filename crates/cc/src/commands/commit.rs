//! Review-and-commit command (`cc`, `cc plan`)

use anyhow::{bail, Context, Result};
use cc_git::GitRepo;
use cc_review::{ClaudeReviewer, Verdict};
use dialoguer::Confirm;

use crate::commands::load_config;
use crate::output;

/// Options shared by `cc` and `cc plan`
#[derive(Debug, Clone, Copy)]
pub struct CommitOptions {
    /// Ask for confirmation before committing
    pub plan: bool,

    /// Commit even when the review reports issues
    pub force: bool,

    /// Push after committing
    pub push: bool,
}

pub async fn run(options: CommitOptions) -> Result<()> {
    let config = load_config();
    let repo = GitRepo::current_dir();

    output::info("Checking for changes...");
    let files = repo
        .changed_files()
        .await
        .context("Failed to get changed files")?;

    if files.is_empty() {
        output::success("No changes to commit");
        return Ok(());
    }

    let summary_mode = config.use_summary_mode(files.len());
    let diff = if summary_mode {
        repo.diff_summary().await.context("Failed to get git diff summary")?
    } else {
        repo.diff().await.context("Failed to get git diff")?
    };

    if diff.is_empty() {
        output::success("No changes to commit");
        return Ok(());
    }

    let spinner = output::spinner(&review_status(files.len(), summary_mode));
    let review = ClaudeReviewer::new(&config.model)
        .review(&diff, summary_mode)
        .await;
    spinner.finish_and_clear();
    let verdict = review.context("Failed to get a review from Claude")?;
    output::success("Claude finished reviewing your changes");

    if let Verdict::Issues { report } = &verdict {
        output::warning("Claude found potential issues in your code:");
        println!("{}\n", report);
    }

    let message = commit_message(&verdict, options.force)?;
    if verdict.has_issues() {
        output::warning("Force mode enabled. Proceeding with commit despite issues.");
    }

    output::kv("Commit message", &message);

    if options.plan && !confirm(options.push)? {
        output::info("Aborted. No changes were committed.");
        return Ok(());
    }

    output::info("Staging all changes...");
    repo.stage_all().await.context("Failed to stage changes")?;

    output::info("Committing...");
    repo.commit(&message).await.context("Failed to commit")?;

    if options.push {
        output::info("Pushing...");
        repo.push().await.context("Failed to push")?;
        output::success("Done! Your changes have been reviewed, committed, and pushed.");
    } else {
        output::success("Done! Your changes have been reviewed and committed (not pushed).");
    }

    Ok(())
}

/// Spinner text shown while the reviewer runs
fn review_status(file_count: usize, summary_mode: bool) -> String {
    let mode = if summary_mode { ", summary mode" } else { "" };
    format!(
        "Claude is reviewing your changes ({} files{})",
        file_count, mode
    )
}

/// Commit message for a verdict, refusing issue reports unless forced
fn commit_message(verdict: &Verdict, force: bool) -> Result<String> {
    match verdict {
        Verdict::Approved { message } if message.is_empty() => {
            bail!("Claude returned an empty commit message")
        }
        Verdict::Approved { message } => Ok(message.clone()),
        Verdict::Issues { .. } if !force => bail!(
            "Please fix these issues before committing. Use --force or -f to commit anyway."
        ),
        Verdict::Issues { .. } => Ok(verdict.forced_message()),
    }
}

fn confirm(push: bool) -> Result<bool> {
    let prompt = if push {
        "Do you want to commit and push these changes?"
    } else {
        "Do you want to commit these changes?"
    };

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
