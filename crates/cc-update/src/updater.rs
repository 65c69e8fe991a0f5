//! Self-update flow: discover, resolve, verify, replace
//!
//! Every step is terminal on failure and nothing is retried. The installed
//! executable is only touched after the downloaded binary matched its
//! manifest digest.

use cc_core::APP_NAME;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::checksum::ChecksumManifest;
use crate::download::Downloader;
use crate::error::{Result, UpdateError};
use crate::install::{InstallMethod, InstallOutcome, Installer, ReplaceStrategy};
use crate::platform::Platform;
use crate::releases::{Release, ReleaseClient};

/// Progress notifications emitted by [`SelfUpdater::update_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    Checking,
    NewVersion { current: String, latest: String },
    DownloadingManifest,
    DownloadingBinary { asset: String },
    Verifying,
    Verified { digest: String },
    Installing,
}

/// Final state of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The latest release tag equals the running tag
    AlreadyCurrent { tag: String },

    /// The new binary replaced the executable at `path`
    Installed {
        from: String,
        to: String,
        path: PathBuf,
        method: InstallMethod,
    },

    /// The swap completes after this process exits
    HandedOff {
        from: String,
        to: String,
        script: PathBuf,
    },
}

/// Result of a version check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub current: String,
    pub latest: String,
}

impl UpdateCheck {
    pub fn update_available(&self) -> bool {
        self.current != self.latest
    }
}

/// Replaces the running binary with the latest GitHub release
pub struct SelfUpdater {
    /// Tag of the running binary (e.g. "v1.0.10")
    current_tag: String,

    platform: Platform,

    releases: ReleaseClient,

    downloader: Downloader,

    /// Executable to replace; the running one when unset
    target: Option<PathBuf>,

    strategy: ReplaceStrategy,
}

impl SelfUpdater {
    /// Create an updater for a binary running `current_tag`
    pub fn new(current_tag: impl Into<String>) -> Result<Self> {
        let current_tag = current_tag.into();

        let client = reqwest::Client::builder()
            .user_agent(format!("cc-cli/{}", current_tag))
            .build()
            .map_err(|e| UpdateError::network("creating HTTP client", e))?;

        Ok(Self {
            releases: ReleaseClient::new(client.clone()),
            downloader: Downloader::new(client),
            platform: Platform::current(),
            target: None,
            strategy: ReplaceStrategy::for_current_platform(),
            current_tag,
        })
    }

    /// Query a different releases API
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.releases = self.releases.with_api_url(api_url);
        self
    }

    /// Resolve assets for a different platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace `path` instead of the running executable
    pub fn with_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    /// Download into `dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloader = self.downloader.with_temp_dir(dir);
        self
    }

    /// Enable or disable the download progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.downloader = self.downloader.with_progress(show);
        self
    }

    pub fn with_strategy(mut self, strategy: ReplaceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn current_tag(&self) -> &str {
        &self.current_tag
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Compare the running tag with the latest release
    pub async fn check(&self) -> Result<UpdateCheck> {
        let latest = self.releases.get_latest().await?;
        Ok(UpdateCheck {
            current: self.current_tag.clone(),
            latest: latest.tag_name,
        })
    }

    /// Run the update without progress notifications
    pub async fn update(&self) -> Result<UpdateOutcome> {
        self.update_with(|_| {}).await
    }

    /// Run the update, reporting each stage to `on_event`
    pub async fn update_with<E>(&self, mut on_event: E) -> Result<UpdateOutcome>
    where
        E: FnMut(UpdateEvent),
    {
        on_event(UpdateEvent::Checking);
        let Some(release) = self.releases.check_update(&self.current_tag).await? else {
            return Ok(UpdateOutcome::AlreadyCurrent {
                tag: self.current_tag.clone(),
            });
        };

        on_event(UpdateEvent::NewVersion {
            current: self.current_tag.clone(),
            latest: release.tag_name.clone(),
        });

        self.install_release(&release, &mut on_event).await
    }

    async fn install_release<E>(&self, release: &Release, on_event: &mut E) -> Result<UpdateOutcome>
    where
        E: FnMut(UpdateEvent),
    {
        let binary_name = self.platform.binary_asset_name(APP_NAME);
        let assets = release.resolve_assets(&binary_name, &self.platform.to_string())?;

        on_event(UpdateEvent::DownloadingManifest);
        let manifest = ChecksumManifest::parse(&self.downloader.fetch_manifest(assets.manifest).await?);
        let expected = manifest
            .get(&binary_name)
            .ok_or_else(|| UpdateError::ChecksumNotFound {
                asset: binary_name.clone(),
            })?;

        on_event(UpdateEvent::DownloadingBinary {
            asset: binary_name.clone(),
        });
        let pending = self.downloader.download_binary(assets.binary).await?;

        on_event(UpdateEvent::Verifying);
        let verified = pending.verify(expected)?;
        on_event(UpdateEvent::Verified {
            digest: verified.digest().to_string(),
        });

        let target = match &self.target {
            Some(path) => path.clone(),
            None => std::env::current_exe()?,
        };
        debug!("Replacing executable at {}", target.display());

        on_event(UpdateEvent::Installing);
        let outcome = Installer::new(self.strategy).install(verified, &target)?;

        let from = self.current_tag.clone();
        let to = release.tag_name.clone();
        info!("Update {} -> {} finished: {:?}", from, to, outcome);

        Ok(match outcome {
            InstallOutcome::Installed { path, method } => UpdateOutcome::Installed {
                from,
                to,
                path,
                method,
            },
            InstallOutcome::HandedOff { script } => UpdateOutcome::HandedOff { from, to, script },
        })
    }
}
