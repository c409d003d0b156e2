//! Provider-agnostic data model for merge requests and their changed files.

use std::fmt;

/// A unique reference to a merge request inside a GitLab instance.
///
/// * `project` – numeric ID or "group/project" (may contain `/`).
/// * `iid`     – merge request IID (project-scoped number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequestId {
    pub project: String,
    pub iid: u64,
}

/// File-level change as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub new_path: String,
    pub old_path: Option<String>,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_renamed: bool,
    /// Provider unified diff text; empty for pure renames/mode changes or
    /// when the provider withheld it.
    pub diff: String,
}

/// Changed files of a merge request plus the branch they live on.
#[derive(Debug, Clone)]
pub struct MrChanges {
    pub source_branch: String,
    pub changes: Vec<FileChange>,
}

/// Full content of a file at a ref, or the status that prevented reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    /// The raw file endpoint answered with a non-success status.
    Unavailable { status: u16 },
}

impl FileContent {
    pub fn is_available(&self) -> bool {
        matches!(self, FileContent::Text(_))
    }
}

/// Renders the text, or the `[Error fetching file content: <status>]` sentinel.
impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContent::Text(text) => f.write_str(text),
            FileContent::Unavailable { status } => {
                write!(f, "[Error fetching file content: {status}]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_content_renders_sentinel() {
        let c = FileContent::Unavailable { status: 404 };
        assert_eq!(c.to_string(), "[Error fetching file content: 404]");
        assert!(!c.is_available());
    }

    #[test]
    fn text_content_renders_verbatim() {
        let c = FileContent::Text("fn main() {}\n".into());
        assert_eq!(c.to_string(), "fn main() {}\n");
        assert!(c.is_available());
    }
}
