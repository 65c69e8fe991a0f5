//! Platform identification for release assets
//!
//! Release assets use Go-style identifiers (`darwin`, `amd64`, ...), so the
//! Rust runtime names from [`std::env::consts`] are mapped onto those.

use std::fmt;

/// Operating system family and CPU architecture of a release asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    /// Platform with explicit identifiers, used as given
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Platform of the running binary
    pub fn current() -> Self {
        Self::new(
            canonical_os(std::env::consts::OS),
            canonical_arch(std::env::consts::ARCH),
        )
    }

    /// Operating system family (e.g. `linux`, `darwin`, `windows`)
    pub fn os(&self) -> &str {
        &self.os
    }

    /// CPU architecture (e.g. `amd64`, `arm64`)
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Whether executables on this platform need an `.exe` suffix
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Executable file suffix for this platform
    pub fn exe_suffix(&self) -> &'static str {
        if self.is_windows() {
            ".exe"
        } else {
            ""
        }
    }

    /// Release asset name of `app` for this platform: `<app>-<os>-<arch>[.exe]`
    pub fn binary_asset_name(&self, app: &str) -> String {
        format!("{}-{}-{}{}", app, self.os, self.arch, self.exe_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

fn canonical_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn canonical_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
