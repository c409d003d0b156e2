//! Joins per-file units into the context blob handed to the model.

use super::assemble::FileContextUnit;

/// Concatenates unit bodies separated by a single newline, in order.
///
/// Units already carry their own filename header and section markers, so no
/// extra labeling happens here.
pub fn format_context(units: &[FileContextUnit]) -> String {
    units
        .iter()
        .map(|u| u.body.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rough token count (4 characters per token), good enough for logging and
/// context-window warnings.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
