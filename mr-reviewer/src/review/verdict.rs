//! Turns the model's free-form reply into a pass/fail outcome.
//!
//! A well-behaved reply ends with `FINAL_STATUS: PASSED` or
//! `FINAL_STATUS: FAILED`. When the marker is missing the reply is scanned for
//! two failure phrases; with neither present the review counts as passed.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

/// Phrases that fail a review whose reply lacks a status marker.
pub const FAILURE_KEYWORDS: [&str; 2] = ["CRITICAL BUG", "SECURITY VULNERABILITY"];

static FINAL_STATUS_RE: OnceLock<Regex> = OnceLock::new();

fn final_status_re() -> &'static Regex {
    FINAL_STATUS_RE.get_or_init(|| {
        Regex::new(r"(?i)FINAL_STATUS:\s*(PASSED|FAILED)").expect("valid FINAL_STATUS pattern")
    })
}

/// Verdict and report extracted from one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub is_ok: bool,
    /// Reply text without the status marker.
    pub report: String,
}

/// Parses a raw reply into a [`ReviewOutcome`].
///
/// With a marker, every occurrence of the matched marker text is removed and
/// the rest trimmed. Without one, the reply fails only if it mentions a
/// [`FAILURE_KEYWORDS`] phrase (case-insensitive) and is kept verbatim.
pub fn extract_verdict(raw: &str) -> ReviewOutcome {
    if let Some(caps) = final_status_re().captures(raw) {
        let marker = caps.get(0).map_or("", |m| m.as_str());
        // Full Unicode uppercasing: the (?i) pattern also folds e.g. `ſ` to `s`.
        let is_ok = caps[1].to_uppercase() == "PASSED";
        debug!(marker, is_ok, "status marker found");

        return ReviewOutcome {
            is_ok,
            report: raw.replace(marker, "").trim().to_string(),
        };
    }

    let upper = raw.to_uppercase();
    let hit = FAILURE_KEYWORDS.iter().find(|k| upper.contains(*k));
    warn!(
        keyword = hit.copied().unwrap_or("none"),
        "reply has no FINAL_STATUS marker, falling back to keyword scan"
    );

    ReviewOutcome {
        is_ok: hit.is_none(),
        report: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn passed_marker_is_stripped() {
        assert_eq!(
            extract_verdict("Looks fine.\nFINAL_STATUS: PASSED"),
            ReviewOutcome {
                is_ok: true,
                report: "Looks fine.".into()
            }
        );
    }

    #[test]
    fn lowercase_status_word_fails() {
        let out = extract_verdict("Found issue.\nFINAL_STATUS: failed");
        assert!(!out.is_ok);
        assert_eq!(out.report, "Found issue.");
    }

    #[test]
    fn whole_marker_matches_case_insensitively() {
        let out = extract_verdict("ok\nfinal_status:passed\n");
        assert!(out.is_ok);
        assert_eq!(out.report, "ok");
    }

    #[test]
    fn marker_may_be_split_by_newline() {
        let out = extract_verdict("notes\nFINAL_STATUS:\nFAILED");
        assert!(!out.is_ok);
        assert_eq!(out.report, "notes");
    }

    #[test]
    fn first_marker_decides_and_all_copies_are_removed() {
        let raw = "FINAL_STATUS: FAILED\nbody\nFINAL_STATUS: FAILED\nFINAL_STATUS: PASSED";
        let out = extract_verdict(raw);
        assert!(!out.is_ok);
        assert_eq!(out.report, "body\n\nFINAL_STATUS: PASSED");
    }

    #[test]
    fn keyword_without_marker_fails_and_keeps_text() {
        let raw = "## Findings\nThis introduces a SECURITY VULNERABILITY in auth.py:12\n";
        let out = extract_verdict(raw);
        assert!(!out.is_ok);
        assert_eq!(out.report, raw);
    }

    #[test]
    fn keyword_scan_ignores_case() {
        assert!(!extract_verdict("found a critical bug in parser").is_ok);
    }

    #[test]
    fn no_marker_no_keyword_passes_verbatim() {
        let raw = "  Minor naming nits only.  \n";
        let out = extract_verdict(raw);
        assert!(out.is_ok);
        assert_eq!(out.report, raw);
    }

    #[test]
    fn extraction_is_deterministic() {
        let raw = "x\nFINAL_STATUS: PASSED";
        assert_eq!(extract_verdict(raw), extract_verdict(raw));
    }

    #[test]
    fn unicode_folded_status_word_still_passes() {
        // U+017F (long s) uppercases to `S`.
        let out = extract_verdict("ok\nFINAL_STATUS: PA\u{17F}SED");
        assert!(out.is_ok);
        assert_eq!(out.report, "ok");
    }

    #[test]
    fn mixed_case_status_word_passes() {
        let out = extract_verdict("FINAL_STATUS: Passed\nfine");
        assert!(out.is_ok);
        assert_eq!(out.report, "fine");
    }
}
