//! Git operations for claude-commit
//!
//! Every operation shells out to the `git` CLI. Output is returned as trimmed
//! text; a non-zero exit status becomes [`GitError::CommandFailed`] carrying
//! git's stderr.
//!
//! # Example
//!
//! ```no_run
//! use cc_git::GitRepo;
//!
//! # async fn example() -> cc_git::Result<()> {
//! let repo = GitRepo::current_dir();
//! let files = repo.changed_files().await?;
//! if !files.is_empty() {
//!     let diff = repo.diff().await?;
//!     println!("{} files changed\n{}", files.len(), diff);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod repo;

pub use error::{GitError, Result};
pub use repo::GitRepo;
