//! Change-set context assembly and formatting.

pub mod assemble;
pub mod format;

pub use assemble::{
    AssembleOptions, DEFAULT_EXTENSIONS, FileContextUnit, assemble, compose_body, matches_filter,
    select_changes,
};
pub use format::{estimate_tokens, format_context};
