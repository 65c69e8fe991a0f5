//! Builder for release metadata payloads served by the mock API

use serde_json::{json, Value};

use super::constants::*;

/// Builds the JSON body of a GitHub "latest release" response
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    base_url: String,
    assets: Vec<(String, String)>,
}

impl ReleaseBuilder {
    /// Release whose asset URLs point at `base_url/download/<name>`
    pub fn new(base_url: &str) -> Self {
        Self {
            tag_name: TAG_LATEST.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            assets: Vec::new(),
        }
    }

    /// Set the tag name
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    /// Add an asset served by the mock server
    pub fn asset(mut self, name: &str) -> Self {
        let url = format!("{}{}", self.base_url, download_path(name));
        self.assets.push((name.to_string(), url));
        self
    }

    /// Add the standard set: every platform binary plus `checksums.txt`
    pub fn with_standard_assets(self) -> Self {
        self.asset(ASSET_LINUX_AMD64)
            .asset(ASSET_DARWIN_ARM64)
            .asset(ASSET_WINDOWS_AMD64)
            .asset(ASSET_CHECKSUMS)
    }

    /// Build the JSON payload, with extra fields GitHub sends
    pub fn build(self) -> Value {
        let assets: Vec<Value> = self
            .assets
            .into_iter()
            .map(|(name, url)| {
                json!({
                    "name": name,
                    "browser_download_url": url,
                    "content_type": "application/octet-stream",
                    "size": 0,
                })
            })
            .collect();

        json!({
            "tag_name": self.tag_name,
            "name": self.tag_name,
            "draft": false,
            "prerelease": false,
            "assets": assets,
        })
    }
}

/// Request path an asset is served from
pub fn download_path(name: &str) -> String {
    format!("/download/{}", name)
}
