//! Reviewer prompt

/// Build the review prompt for a diff (or a diff summary when `summary_mode`)
pub fn build_prompt(diff: &str, summary_mode: bool) -> String {
    let scope = if summary_mode {
        "The change set is large, so you are given a per-file summary of the changes \
instead of the full diff. Base the review and the message on that summary."
    } else {
        "Review the following git diff for any issues (bugs, security risks, style)."
    };

    format!(
        r#"{scope}
If there are critical issues, you MUST start your response with "ISSUE: " followed by the description.
When reporting issues, also add a line "Suggested message: <commit message>".

If the code looks good, provide a concise, professional commit message.
Follow the Conventional Commits specification (e.g., feat: ..., fix: ..., chore: ...).
Focus on "why" the change was made, not just "what" changed.
Provide ONLY the commit message in one line. Do NOT include any "Co-Authored-By" trailers or attribution.

Diff:
{diff}"#
    )
}
