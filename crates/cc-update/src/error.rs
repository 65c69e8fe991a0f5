//! Error types for cc-update

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using cc-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Broad failure classes of an update run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateErrorKind {
    /// Endpoint unreachable or non-success HTTP status
    Network,
    /// Malformed release metadata or checksum manifest
    Parse,
    /// No binary asset for this OS/architecture
    PlatformUnsupported,
    /// Missing manifest, missing entry, or digest mismatch
    Integrity,
    /// The installed binary could not be replaced
    Permission,
    /// The old binary was moved aside but the new one could not be installed
    PartialInstall,
    /// Local filesystem failure outside the replacement step
    Io,
}

/// Errors that can occur during an update run
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Network error while {context}")]
    Network {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse release info")]
    ReleaseMetadata(#[from] serde_json::Error),

    #[error("Checksum manifest is not valid UTF-8")]
    ManifestEncoding,

    #[error("No binary found for {platform} (expected release asset {asset})")]
    NoPlatformAsset { platform: String, asset: String },

    #[error("No checksums file found in release; refusing to install unverified binaries")]
    MissingChecksumManifest,

    #[error("No checksum found for {asset}")]
    ChecksumNotFound { asset: String },

    #[error(
        "Checksum mismatch for {asset}: expected {expected}, got {actual}. \
         The download may have been corrupted or tampered with"
    )]
    ChecksumMismatch {
        asset: String,
        expected: String,
        actual: String,
    },

    #[error("Cannot replace {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error installing new binary at {} ({})", .path.display(), rollback_note(.rolled_back))]
    PartialInstall {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        rolled_back: bool,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

fn rollback_note(rolled_back: &bool) -> &'static str {
    if *rolled_back {
        "previous version restored"
    } else {
        "restoring the previous version also failed"
    }
}

impl UpdateError {
    /// Wrap a transport error with what was being fetched
    pub fn network(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            context: context.into(),
            source,
        }
    }

    /// Failure class of this error
    pub fn kind(&self) -> UpdateErrorKind {
        match self {
            Self::Network { .. } | Self::HttpStatus { .. } => UpdateErrorKind::Network,
            Self::ReleaseMetadata(_) | Self::ManifestEncoding => UpdateErrorKind::Parse,
            Self::NoPlatformAsset { .. } => UpdateErrorKind::PlatformUnsupported,
            Self::MissingChecksumManifest
            | Self::ChecksumNotFound { .. }
            | Self::ChecksumMismatch { .. } => UpdateErrorKind::Integrity,
            Self::PermissionDenied { .. } => UpdateErrorKind::Permission,
            Self::PartialInstall { .. } => UpdateErrorKind::PartialInstall,
            Self::Io(_) => UpdateErrorKind::Io,
        }
    }

    /// Whether re-running with elevated privileges may help
    pub fn needs_elevation(&self) -> bool {
        matches!(
            self.kind(),
            UpdateErrorKind::Permission | UpdateErrorKind::PartialInstall
        )
    }
}
