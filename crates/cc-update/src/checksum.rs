//! SHA-256 checksum manifest parsing and digest helpers
//!
//! A release carries a `checksums.txt` manifest in the `sha256sum` format:
//! one `<hex-digest> <filename>` pair per line. Downloaded binaries are hashed
//! and compared against the manifest entry for their asset name before they
//! may be installed.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Read buffer size used when hashing files (1MB)
const HASH_CHUNK_SIZE: usize = 1024 * 1024;

/// Parsed `checksums.txt` manifest mapping filename to expected digest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parse manifest text
    ///
    /// Only lines with exactly two whitespace-separated fields count. Anything
    /// else (blank lines, comments, filenames containing spaces) is skipped.
    /// When a filename appears twice the first entry wins.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let (Some(digest), Some(name), None) = (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };

            // sha256sum marks binary-mode entries with a leading '*'
            let name = name.strip_prefix('*').unwrap_or(name);
            entries
                .entry(name.to_string())
                .or_insert_with(|| digest.to_string());
        }

        debug!("Parsed checksum manifest with {} entries", entries.len());
        Self { entries }
    }

    /// Expected digest for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase hex SHA-256 of a byte slice
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Lowercase hex SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Compare two hex digests, ignoring ASCII case
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.eq_ignore_ascii_case(actual)
}
