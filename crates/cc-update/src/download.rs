//! Asset download with progress tracking and checksum verification
//!
//! Binaries are streamed into a temporary file and come back as a
//! [`PendingBinary`]. The only way to get something the installer accepts
//! ([`VerifiedBinary`]) is [`PendingBinary::verify`], so an unverified
//! download can never be installed. A pending binary that fails verification
//! or is dropped deletes its temporary file.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::checksum::{digests_match, sha256_file};
use crate::error::{Result, UpdateError};
use crate::releases::ReleaseAsset;

/// Prefix of temporary download files
const TEMP_PREFIX: &str = "cc-update-";

const PROGRESS_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Downloaded binary whose checksum has not been checked yet
#[derive(Debug)]
pub struct PendingBinary {
    asset: String,
    path: TempPath,
}

/// Downloaded binary whose digest matched the release manifest
#[derive(Debug)]
pub struct VerifiedBinary {
    path: TempPath,
    digest: String,
}

impl PendingBinary {
    /// Asset name the binary was downloaded from
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Location of the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the file against `expected` (hex SHA-256, any case)
    ///
    /// On mismatch the temporary file is removed and the error carries both
    /// digests.
    pub fn verify(self, expected: &str) -> Result<VerifiedBinary> {
        let actual = sha256_file(&self.path)?;

        if !digests_match(expected, &actual) {
            return Err(UpdateError::ChecksumMismatch {
                asset: self.asset,
                expected: expected.to_string(),
                actual,
            });
        }

        debug!("Checksum verified for {}: {}", self.asset, actual);
        mark_executable(&self.path)?;

        Ok(VerifiedBinary {
            path: self.path,
            digest: actual,
        })
    }
}

impl VerifiedBinary {
    /// Location of the verified file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase hex SHA-256 of the file
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// Fetches release assets over HTTP
#[derive(Debug, Clone)]
pub struct Downloader {
    /// HTTP client
    client: reqwest::Client,

    /// Directory for temporary files (system temp dir when unset)
    temp_dir: Option<PathBuf>,

    /// Enable progress bars
    show_progress: bool,
}

impl Downloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            temp_dir: None,
            show_progress: false,
        }
    }

    /// Create temporary files in `dir`
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download the checksum manifest as text
    pub async fn fetch_manifest(&self, asset: &ReleaseAsset) -> Result<String> {
        debug!("Downloading checksum manifest {}", asset.browser_download_url);
        let response = self.get(asset, "downloading checksums").await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| UpdateError::network("downloading checksums", e))?;

        String::from_utf8(body.to_vec()).map_err(|_| UpdateError::ManifestEncoding)
    }

    /// Stream a binary asset into a temporary file
    pub async fn download_binary(&self, asset: &ReleaseAsset) -> Result<PendingBinary> {
        info!("Downloading {}", asset.name);
        let response = self.get(asset, "downloading update").await?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX);
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        let progress = self.progress_bar(response.content_length(), &asset.name);

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes =
                chunk.map_err(|e| UpdateError::network("downloading update", e))?;
            file.write_all(&chunk)?;

            downloaded += chunk.len() as u64;
            progress.set_position(downloaded);
        }
        file.flush()?;

        progress.finish_and_clear();
        debug!("Downloaded {} bytes to {}", downloaded, file.path().display());

        Ok(PendingBinary {
            asset: asset.name.clone(),
            path: file.into_temp_path(),
        })
    }

    async fn get(&self, asset: &ReleaseAsset, context: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(&asset.browser_download_url)
            .send()
            .await
            .map_err(|e| UpdateError::network(context, e))?;

        if !response.status().is_success() {
            return Err(UpdateError::HttpStatus {
                url: asset.browser_download_url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    fn progress_bar(&self, total: Option<u64>, name: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total.unwrap_or(0));
        match ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => warn!("Invalid progress bar template: {}", e),
        }
        pb.set_message(format!("Downloading {}", name));
        pb
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
