//! GitHub release discovery and asset resolution

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, UpdateError};

/// GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub repository owner
pub const REPO_OWNER: &str = "quaywin";

/// GitHub repository name
pub const REPO_NAME: &str = "claude-commit";

/// Exact name of the checksum manifest attached to every release
pub const CHECKSUM_MANIFEST_NAME: &str = "checksums.txt";

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v1.0.10"), compared by string equality only
    pub tag_name: String,

    /// Release assets
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Release asset
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,
}

/// Assets needed to install a release on one platform
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAssets<'a> {
    /// The platform binary
    pub binary: &'a ReleaseAsset,

    /// The `checksums.txt` manifest
    pub manifest: &'a ReleaseAsset,
}

impl Release {
    /// Asset whose name equals `name` exactly
    pub fn asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }

    /// Find the platform binary and the checksum manifest
    ///
    /// Both are required: a release without `checksums.txt` is rejected even
    /// when the binary is present.
    pub fn resolve_assets(&self, binary_name: &str, platform: &str) -> Result<ResolvedAssets<'_>> {
        let binary = self
            .asset(binary_name)
            .ok_or_else(|| UpdateError::NoPlatformAsset {
                platform: platform.to_string(),
                asset: binary_name.to_string(),
            })?;

        let manifest = self
            .asset(CHECKSUM_MANIFEST_NAME)
            .ok_or(UpdateError::MissingChecksumManifest)?;

        debug!(
            "Resolved assets: binary={} manifest={}",
            binary.browser_download_url, manifest.browser_download_url
        );
        Ok(ResolvedAssets { binary, manifest })
    }
}

/// Fetches release metadata from the GitHub releases API
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    /// HTTP client
    client: reqwest::Client,

    /// API base URL
    api_url: String,
}

impl ReleaseClient {
    /// Create a release client using the given HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Use a different API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the "latest release" endpoint
    pub fn latest_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, REPO_OWNER, REPO_NAME
        )
    }

    /// Get latest release
    pub async fn get_latest(&self) -> Result<Release> {
        let url = self.latest_url();
        debug!("Fetching latest release from: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpdateError::network("checking for updates", e))?;

        if !response.status().is_success() {
            return Err(UpdateError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpdateError::network("reading release info", e))?;

        let release: Release = serde_json::from_slice(&body)?;
        Ok(release)
    }

    /// Latest release, or `None` when its tag equals `current_tag`
    pub async fn check_update(&self, current_tag: &str) -> Result<Option<Release>> {
        let latest = self.get_latest().await?;

        if latest.tag_name == current_tag {
            debug!("Already on latest version: {}", current_tag);
            Ok(None)
        } else {
            info!("Update available: {} -> {}", current_tag, latest.tag_name);
            Ok(Some(latest))
        }
    }
}
