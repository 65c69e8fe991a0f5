//! Self-update command

use anyhow::{Context, Result};
use cc_core::VERSION_TAG;
use cc_update::{SelfUpdater, UpdateErrorKind, UpdateEvent, UpdateOutcome};
use indicatif::ProgressBar;

use crate::cli::UpdateArgs;
use crate::output;

pub async fn run(args: UpdateArgs) -> Result<()> {
    let updater = SelfUpdater::new(VERSION_TAG)
        .context("Failed to initialize updater")?
        .with_progress(true);

    if args.check {
        return check_for_updates(&updater).await;
    }

    output::kv("Current version", VERSION_TAG);

    let mut spinner = None;
    let result = updater
        .update_with(|event| report(event, &mut spinner))
        .await;
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }

    match result {
        Ok(UpdateOutcome::AlreadyCurrent { tag }) => {
            output::success(&format!("You are already on the latest version ({})", tag));
        }
        Ok(UpdateOutcome::Installed { to, .. }) => {
            output::success(&format!("Updated to {} successfully!", to));
        }
        Ok(UpdateOutcome::HandedOff { to, .. }) => {
            output::success(&format!("Update to {} ready!", to));
            output::info("Completing update... (this will restart cc)");
        }
        Err(e) => {
            if e.kind() == UpdateErrorKind::Integrity {
                output::warning("Cannot verify download integrity. Aborting for security.");
            }
            if e.needs_elevation() {
                output::info("You may need to run with elevated privileges: sudo cc update");
            }
            return Err(e.into());
        }
    }

    Ok(())
}

/// Check for updates only
async fn check_for_updates(updater: &SelfUpdater) -> Result<()> {
    output::kv("Current version", VERSION_TAG);

    let spinner = output::spinner("Checking for updates...");
    let check = updater.check().await;
    spinner.finish_and_clear();
    let check = check.context("Failed to check for updates")?;

    if check.update_available() {
        output::success(&format!("Update available: {}", check.latest));
        output::info("Run 'cc update' to install the update");
    } else {
        output::success("Already on the latest version");
    }

    Ok(())
}

fn report(event: UpdateEvent, spinner: &mut Option<ProgressBar>) {
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }

    match event {
        UpdateEvent::Checking => *spinner = Some(output::spinner("Checking for updates...")),
        UpdateEvent::NewVersion { current, latest } => {
            output::info(&format!("New version available: {} (current: {})", latest, current));
        }
        UpdateEvent::DownloadingManifest => output::info("Downloading checksums..."),
        UpdateEvent::DownloadingBinary { asset } => {
            output::info(&format!("Downloading {}...", asset));
        }
        UpdateEvent::Verifying => output::info("Verifying checksum..."),
        UpdateEvent::Verified { .. } => output::success("Checksum verified"),
        UpdateEvent::Installing => output::info("Installing update..."),
    }
}
