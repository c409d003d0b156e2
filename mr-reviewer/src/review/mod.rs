//! Prompting and reply interpretation.

pub mod prompt;
pub mod verdict;

pub use verdict::{ReviewOutcome, extract_verdict};
