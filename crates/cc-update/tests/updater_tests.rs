//! End-to-end tests for SelfUpdater against a mock releases API

mod common;

use cc_update::{
    sha256_hex, Platform, ReplaceStrategy, SelfUpdater, UpdateError, UpdateErrorKind,
    UpdateEvent, UpdateOutcome,
};
use common::*;
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use wiremock::MockServer;

struct Harness {
    server: MockServer,
    installed: InstalledBinary,
    downloads: TempDir,
}

impl Harness {
    async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            installed: InstalledBinary::new(),
            downloads: TempDir::new().unwrap(),
        }
    }

    fn release(&self) -> ReleaseBuilder {
        ReleaseBuilder::new(&self.server.uri())
    }

    fn updater(&self) -> SelfUpdater {
        SelfUpdater::new(TAG_CURRENT)
            .unwrap()
            .with_api_url(self.server.uri())
            .with_platform(test_platform())
            .with_target(&self.installed.path)
            .with_temp_dir(self.downloads.path())
            .with_strategy(ReplaceStrategy::RenameSwap)
    }

    fn assert_untouched(&self) {
        assert_eq!(self.installed.contents(), OLD_BINARY_CONTENT);
        assert!(!self.installed.backup_path().exists());
        assert!(leftover_downloads(self.downloads.path()).is_empty());
    }
}

fn off_by_one(digest: &str) -> String {
    let mut chars: Vec<char> = digest.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

#[tokio::test]
async fn test_already_current_downloads_nothing() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().tag(TAG_CURRENT).with_standard_assets().build()).await;
    mock_checksums(&h.server, &[], 0).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 0).await;

    let outcome = h.updater().update().await.unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::AlreadyCurrent {
            tag: TAG_CURRENT.to_string()
        }
    );
    h.assert_untouched();
}

#[tokio::test]
async fn test_successful_update_replaces_binary() {
    let h = Harness::new().await;
    let digest = sha256_hex(NEW_BINARY_CONTENT);
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    let darwin_digest = sha256_hex(b"darwin build");
    mock_checksums(
        &h.server,
        &[
            (darwin_digest.as_str(), ASSET_DARWIN_ARM64),
            (digest.as_str(), ASSET_LINUX_AMD64),
        ],
        1,
    )
    .await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 1).await;

    let mut events = Vec::new();
    let outcome = h
        .updater()
        .update_with(|event| events.push(event))
        .await
        .unwrap();

    match outcome {
        UpdateOutcome::Installed { from, to, path, .. } => {
            assert_eq!(from, TAG_CURRENT);
            assert_eq!(to, TAG_LATEST);
            assert_eq!(path, h.installed.path);
        }
        other => panic!("Expected Installed, got {:?}", other),
    }
    assert_eq!(h.installed.contents(), NEW_BINARY_CONTENT);
    assert!(!h.installed.backup_path().exists());
    assert!(leftover_downloads(h.downloads.path()).is_empty());

    assert_eq!(
        events,
        vec![
            UpdateEvent::Checking,
            UpdateEvent::NewVersion {
                current: TAG_CURRENT.to_string(),
                latest: TAG_LATEST.to_string(),
            },
            UpdateEvent::DownloadingManifest,
            UpdateEvent::DownloadingBinary {
                asset: ASSET_LINUX_AMD64.to_string(),
            },
            UpdateEvent::Verifying,
            UpdateEvent::Verified { digest },
            UpdateEvent::Installing,
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_installed_binary_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    let digest = sha256_hex(NEW_BINARY_CONTENT);
    mock_checksums(&h.server, &[(digest.as_str(), ASSET_LINUX_AMD64)], 1).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 1).await;

    h.updater().update().await.unwrap();

    let mode = std::fs::metadata(&h.installed.path).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[tokio::test]
async fn test_uppercase_manifest_digest_is_accepted() {
    let h = Harness::new().await;
    let digest = sha256_hex(NEW_BINARY_CONTENT).to_uppercase();
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    mock_checksums(&h.server, &[(digest.as_str(), ASSET_LINUX_AMD64)], 1).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 1).await;

    let outcome = h.updater().update().await.unwrap();

    assert!(matches!(outcome, UpdateOutcome::Installed { .. }));
    assert_eq!(h.installed.contents(), NEW_BINARY_CONTENT);
}

#[tokio::test]
async fn test_missing_manifest_refuses_install() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().asset(ASSET_LINUX_AMD64).build()).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 0).await;

    let err = h.updater().update().await.unwrap_err();

    assert!(matches!(err, UpdateError::MissingChecksumManifest));
    assert_eq!(err.kind(), UpdateErrorKind::Integrity);
    h.assert_untouched();
}

#[tokio::test]
async fn test_manifest_without_entry_fails_closed() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    let digest = sha256_hex(NEW_BINARY_CONTENT);
    mock_checksums(&h.server, &[(digest.as_str(), ASSET_DARWIN_ARM64)], 1).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 0).await;

    let err = h.updater().update().await.unwrap_err();

    match &err {
        UpdateError::ChecksumNotFound { asset } => assert_eq!(asset, ASSET_LINUX_AMD64),
        other => panic!("Expected ChecksumNotFound, got {:?}", other),
    }
    assert_eq!(err.kind(), UpdateErrorKind::Integrity);
    h.assert_untouched();
}

#[tokio::test]
async fn test_checksum_mismatch_leaves_binary_untouched() {
    let h = Harness::new().await;
    let wrong = off_by_one(&sha256_hex(NEW_BINARY_CONTENT));
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    mock_checksums(&h.server, &[(wrong.as_str(), ASSET_LINUX_AMD64)], 1).await;
    mock_asset(&h.server, ASSET_LINUX_AMD64, NEW_BINARY_CONTENT, 1).await;

    let err = h.updater().update().await.unwrap_err();

    match &err {
        UpdateError::ChecksumMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, &wrong);
            assert_eq!(actual, &sha256_hex(NEW_BINARY_CONTENT));
        }
        other => panic!("Expected ChecksumMismatch, got {:?}", other),
    }
    assert_eq!(err.kind(), UpdateErrorKind::Integrity);
    h.assert_untouched();
}

#[tokio::test]
async fn test_unsupported_platform_downloads_nothing() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    mock_checksums(&h.server, &[], 0).await;

    let err = h
        .updater()
        .with_platform(Platform::new("plan9", "mips"))
        .update()
        .await
        .unwrap_err();

    match &err {
        UpdateError::NoPlatformAsset { platform, asset } => {
            assert_eq!(platform, "plan9/mips");
            assert_eq!(asset, "cc-plan9-mips");
        }
        other => panic!("Expected NoPlatformAsset, got {:?}", other),
    }
    assert_eq!(err.kind(), UpdateErrorKind::PlatformUnsupported);
    h.assert_untouched();
}

#[tokio::test]
async fn test_near_miss_asset_name_does_not_match() {
    let h = Harness::new().await;
    mock_latest_release(
        &h.server,
        h.release()
            .asset("cc-linux-amd64-v2")
            .asset("cc-linux-amd64.tar.gz")
            .asset(ASSET_CHECKSUMS)
            .build(),
    )
    .await;
    mock_checksums(&h.server, &[], 0).await;
    mock_asset(&h.server, "cc-linux-amd64-v2", NEW_BINARY_CONTENT, 0).await;

    let err = h.updater().update().await.unwrap_err();

    assert_eq!(err.kind(), UpdateErrorKind::PlatformUnsupported);
    h.assert_untouched();
}

#[tokio::test]
async fn test_api_error_status_is_network_failure() {
    let h = Harness::new().await;
    mock_latest_release_raw(&h.server, 500, "internal error").await;

    let err = h.updater().update().await.unwrap_err();

    match &err {
        UpdateError::HttpStatus { status, .. } => assert_eq!(*status, 500),
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
    assert_eq!(err.kind(), UpdateErrorKind::Network);
    assert!(!err.needs_elevation());
    h.assert_untouched();
}

#[tokio::test]
async fn test_malformed_metadata_is_parse_failure() {
    let h = Harness::new().await;
    mock_latest_release_raw(&h.server, 200, r#"{"assets": "nope""#).await;

    let err = h.updater().update().await.unwrap_err();

    assert_eq!(err.kind(), UpdateErrorKind::Parse);
    h.assert_untouched();
}

#[tokio::test]
async fn test_unreachable_api_is_network_failure() {
    let h = Harness::new().await;

    let err = h
        .updater()
        .with_api_url("http://127.0.0.1:1")
        .update()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), UpdateErrorKind::Network);
    h.assert_untouched();
}

#[tokio::test]
async fn test_missing_binary_download_is_network_failure() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;
    let digest = sha256_hex(NEW_BINARY_CONTENT);
    mock_checksums(&h.server, &[(digest.as_str(), ASSET_LINUX_AMD64)], 1).await;

    let err = h.updater().update().await.unwrap_err();

    assert!(matches!(err, UpdateError::HttpStatus { status: 404, .. }));
    h.assert_untouched();
}

#[tokio::test]
async fn test_check_reports_latest_tag() {
    let h = Harness::new().await;
    mock_latest_release(&h.server, h.release().with_standard_assets().build()).await;

    let check = h.updater().check().await.unwrap();

    assert_eq!(check.current, TAG_CURRENT);
    assert_eq!(check.latest, TAG_LATEST);
    assert!(check.update_available());
}

#[test]
fn test_digest_is_deterministic_and_byte_sensitive() {
    let digest = sha256_hex(NEW_BINARY_CONTENT);
    assert_eq!(digest, sha256_hex(NEW_BINARY_CONTENT));
    assert_eq!(digest, hex::encode(Sha256::digest(NEW_BINARY_CONTENT)));

    let mut flipped = NEW_BINARY_CONTENT.to_vec();
    flipped[0] ^= 0x01;
    assert_ne!(digest, sha256_hex(&flipped));
}
