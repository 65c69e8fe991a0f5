//! Installed-binary fixtures

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::constants::*;

/// A fake installed `cc` binary inside a temp directory
pub struct InstalledBinary {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl InstalledBinary {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("cc");
        fs::write(&path, OLD_BINARY_CONTENT).expect("Failed to write installed binary");
        Self { dir, path }
    }

    pub fn contents(&self) -> Vec<u8> {
        fs::read(&self.path).expect("Failed to read installed binary")
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.path().join("cc.old")
    }
}

/// Files in `dir` whose name starts with the download prefix
pub fn leftover_downloads(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to list temp dir")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("cc-update-"))
        })
        .collect()
}
