//! # cc-core
//!
//! Core library for claude-commit providing:
//! - The persisted user configuration (`~/.claude-commit/config.json`)
//! - Shared error types
//! - The running release tag used by `cc version` and `cc update`

pub mod config;
pub mod error;

pub use config::{Config, ConfigStore};
pub use error::{Error, Result};

/// Release tag of the running binary.
///
/// Release tags are compared byte-for-byte against published tags, so this
/// must match the tag naming used when cutting a release (`v<semver>`).
pub const VERSION_TAG: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Name of the installed binary, also the prefix of every release asset.
pub const APP_NAME: &str = "cc";
