//! Classification of reviewer replies

/// Prefix a reply starts with when the reviewer found critical issues
pub const ISSUE_MARKER: &str = "ISSUE:";

/// Commit message used when forcing past issues without a suggested message
pub const FORCED_FALLBACK_MESSAGE: &str = "chore: commit despite potential issues";

const MESSAGE_LABELS: [&str; 2] = ["suggested message:", "commit message:"];

/// Outcome of a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No critical issues; the reply is the commit message
    Approved { message: String },

    /// The reviewer flagged issues; `report` is the full reply
    Issues { report: String },
}

impl Verdict {
    /// Classify raw reviewer output
    pub fn parse(output: &str) -> Self {
        let trimmed = output.trim();

        let flagged = trimmed
            .get(..ISSUE_MARKER.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ISSUE_MARKER));

        if flagged {
            Self::Issues {
                report: trimmed.to_string(),
            }
        } else {
            Self::Approved {
                message: trimmed.to_string(),
            }
        }
    }

    /// Whether the reviewer flagged issues
    pub fn has_issues(&self) -> bool {
        matches!(self, Self::Issues { .. })
    }

    /// Commit message to use when committing regardless of issues
    ///
    /// For an issue report this is the text after the first
    /// `Suggested message:` or `Commit message:` line (case-insensitive),
    /// or [`FORCED_FALLBACK_MESSAGE`] when there is none.
    pub fn forced_message(&self) -> String {
        match self {
            Self::Approved { message } => message.clone(),
            Self::Issues { report } => report
                .lines()
                .map(str::trim_start)
                .find(|line| {
                    let lower = line.to_lowercase();
                    MESSAGE_LABELS.iter().any(|label| lower.starts_with(label))
                })
                .and_then(|line| line.split_once(':'))
                .map(|(_, message)| message.trim())
                .filter(|message| !message.is_empty())
                .map_or_else(|| FORCED_FALLBACK_MESSAGE.to_string(), str::to_string),
        }
    }
}
