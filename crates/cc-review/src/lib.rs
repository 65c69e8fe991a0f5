//! Review of working-tree changes by the `claude` CLI
//!
//! Provides:
//! - Prompt construction for full-diff and summary modes
//! - Invocation of the reviewer CLI as a subprocess
//! - Classification of the reply into an approved commit message or an
//!   issue report (replies starting with `ISSUE:`)
//! - Extraction of a usable commit message when committing is forced

mod error;
mod prompt;
mod reviewer;
mod verdict;

pub use error::{Result, ReviewError};
pub use prompt::build_prompt;
pub use reviewer::{ClaudeReviewer, DEFAULT_REVIEWER_PROGRAM};
pub use verdict::{Verdict, FORCED_FALLBACK_MESSAGE, ISSUE_MARKER};
