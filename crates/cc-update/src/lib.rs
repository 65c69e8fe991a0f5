//! Self-update functionality for claude-commit
//!
//! Provides:
//! - Latest-release discovery against GitHub releases
//! - Exact platform asset resolution (`cc-<os>-<arch>[.exe]`)
//! - Mandatory SHA-256 verification against the release's `checksums.txt`
//! - Binary replacement with backup and rollback (Unix) or a deferred swap
//!   script (Windows)
//!
//! # Example
//!
//! ```no_run
//! use cc_update::{SelfUpdater, UpdateOutcome};
//!
//! # async fn run() -> cc_update::Result<()> {
//! let updater = SelfUpdater::new("v1.0.10")?.with_progress(true);
//! match updater.update().await? {
//!     UpdateOutcome::AlreadyCurrent { tag } => println!("Already on {tag}"),
//!     UpdateOutcome::Installed { to, .. } => println!("Updated to {to}"),
//!     UpdateOutcome::HandedOff { to, .. } => println!("Finishing update to {to}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod download;
pub mod error;
pub mod install;
pub mod platform;
pub mod releases;
pub mod updater;

pub use checksum::{sha256_file, sha256_hex, ChecksumManifest};
pub use download::{Downloader, PendingBinary, VerifiedBinary};
pub use error::{Result, UpdateError, UpdateErrorKind};
pub use install::{FileOps, InstallMethod, InstallOutcome, Installer, ReplaceStrategy, StdFileOps};
pub use platform::Platform;
pub use releases::{
    Release, ReleaseAsset, ReleaseClient, CHECKSUM_MANIFEST_NAME, DEFAULT_API_URL, REPO_NAME,
    REPO_OWNER,
};
pub use updater::{SelfUpdater, UpdateCheck, UpdateEvent, UpdateOutcome};
