//! Shared constants for test infrastructure

use cc_update::Platform;

// Tag constants
pub const TAG_CURRENT: &str = "v1.0.10";
pub const TAG_LATEST: &str = "v1.0.11";

// Asset names
pub const ASSET_LINUX_AMD64: &str = "cc-linux-amd64";
pub const ASSET_DARWIN_ARM64: &str = "cc-darwin-arm64";
pub const ASSET_WINDOWS_AMD64: &str = "cc-windows-amd64.exe";
pub const ASSET_CHECKSUMS: &str = "checksums.txt";

// Binary contents
pub const OLD_BINARY_CONTENT: &[u8] = b"#!/bin/sh\necho old\n";
pub const NEW_BINARY_CONTENT: &[u8] = b"#!/bin/sh\necho new\n";

/// Request path of the "latest release" endpoint
pub const LATEST_RELEASE_PATH: &str = "/repos/quaywin/claude-commit/releases/latest";

/// Platform every integration test resolves assets for
pub fn test_platform() -> Platform {
    Platform::new("linux", "amd64")
}
