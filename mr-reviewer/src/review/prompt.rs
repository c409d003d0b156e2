//! Review instruction sent with the merge request context.
//!
//! The closing instruction must keep asking for a `FINAL_STATUS` line; the
//! verdict extractor depends on it.

/// System message: reviewer persona.
pub const SYSTEM_PROMPT: &str =
    "You are a Principal Software Engineer reviewing a GitLab Merge Request.";

/// Builds the user message embedding the formatted file context.
pub fn build_review_prompt(context: &str) -> String {
    let mut s = String::with_capacity(context.len() + 1024);
    s.push_str("These are the files changed by the Merge Request:\n\n");
    s.push_str(context);
    s.push_str("\n\n");
    s.push_str(
        "Every file comes with its DIFF (what changed) and its FULL CONTENT (for context).\n",
    );
    s.push_str(
        "Review only the **CHANGES** in the diff. Use the full content solely to resolve \
         definitions, imports and call sites.\n\n",
    );
    s.push_str("Focus on:\n");
    s.push_str("1. **Bugs introduced by the changes**\n");
    s.push_str("2. **Security vulnerabilities**\n");
    s.push_str("3. **Code style and maintainability** of the new code\n\n");
    s.push_str("Cite file names and line numbers for every finding.\n");
    s.push_str("Answer in Markdown.\n");
    s.push_str("Finish with exactly one of these lines:\nFINAL_STATUS: PASSED\nFINAL_STATUS: FAILED");
    s
}
