//! Builds one self-describing text unit per reviewable changed file.
//!
//! Each unit pairs the provider diff with the full file content at the source
//! branch, so the model sees both what changed and where it lives.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::errors::{GitContextEngineError, GitContextEngineResult};
use crate::git_providers::{ChangeRequestId, FileChange, FileContent, GitLabClient};

/// Suffixes reviewed when the caller does not override the filter.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".jsx", ".tsx", ".go", ".java", ".cpp",
];

/// Knobs for [`assemble`].
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Allowed path suffixes. `None` or an empty list keeps every file.
    pub extension_filter: Option<Vec<String>>,
    /// Fetch and embed the full file next to its diff.
    pub include_full_content: bool,
    /// Upper bound on concurrent raw-file requests (1 = sequential).
    pub fetch_concurrency: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            extension_filter: Some(DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()),
            include_full_content: true,
            fetch_concurrency: 1,
        }
    }
}

/// Context for a single changed file, ready to be concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContextUnit {
    pub path: String,
    pub diff: String,
    /// `None` only in diff-only mode.
    pub content: Option<FileContent>,
    /// Header, diff section and content section joined with markers.
    pub body: String,
}

/// Returns true when `path` ends with one of the filter suffixes, or when
/// there is no (or an empty) filter.
pub fn matches_filter(path: &str, filter: Option<&[String]>) -> bool {
    match filter {
        Some(exts) if !exts.is_empty() => exts.iter().any(|ext| path.ends_with(ext.as_str())),
        _ => true,
    }
}

/// Keeps non-deleted changes whose new path passes the filter, in input order.
pub fn select_changes<'a>(
    changes: &'a [FileChange],
    filter: Option<&[String]>,
) -> Vec<&'a FileChange> {
    changes
        .iter()
        .filter(|c| matches_filter(&c.new_path, filter))
        .filter(|c| !c.is_deleted)
        .collect()
}

/// Composes the unit body.
///
/// ```text
/// FILENAME: <path>
/// --- BEGIN DIFF (CHANGES) ---
/// <diff>
/// --- END DIFF ---
///
/// --- BEGIN FULL FILE CONTENT (CONTEXT) ---
/// <content or sentinel>
/// --- END FULL FILE CONTENT ---
/// ```
pub fn compose_body(path: &str, diff: &str, content: Option<&FileContent>) -> String {
    let mut s = String::with_capacity(path.len() + diff.len() + 160);
    s.push_str(&format!("FILENAME: {path}\n"));
    s.push_str(&format!(
        "--- BEGIN DIFF (CHANGES) ---\n{diff}\n--- END DIFF ---\n\n"
    ));
    if let Some(content) = content {
        s.push_str(&format!(
            "--- BEGIN FULL FILE CONTENT (CONTEXT) ---\n{content}\n--- END FULL FILE CONTENT ---\n"
        ));
    }
    s
}

/// Fetches the merge request and builds one [`FileContextUnit`] per
/// reviewable file, preserving the provider's file order.
///
/// Errors from the changes endpoint abort the whole call before any raw file
/// is requested. Unreadable files degrade to a sentinel inside their unit.
pub async fn assemble(
    client: &GitLabClient,
    id: &ChangeRequestId,
    opts: &AssembleOptions,
) -> GitContextEngineResult<Vec<FileContextUnit>> {
    let mr = client.fetch_mr_changes(id).await?;
    info!(
        project = %id.project,
        iid = id.iid,
        files = mr.changes.len(),
        "found changed files in merge request"
    );

    let selected = select_changes(&mr.changes, opts.extension_filter.as_deref());
    debug!(
        selected = selected.len(),
        skipped = mr.changes.len() - selected.len(),
        "applied extension/deletion filter"
    );

    let contents: Vec<Option<FileContent>> = if opts.include_full_content {
        let paths: Vec<String> = selected.iter().map(|c| c.new_path.clone()).collect();
        fetch_contents(client, id, &mr.source_branch, paths, opts.fetch_concurrency)
            .await?
            .into_iter()
            .map(Some)
            .collect()
    } else {
        vec![None; selected.len()]
    };

    let unavailable = contents
        .iter()
        .flatten()
        .filter(|c| !c.is_available())
        .count();
    if unavailable > 0 {
        warn!(unavailable, "some files could not be read, placeholders embedded");
    }

    let units = selected
        .into_iter()
        .zip(contents)
        .map(|(change, content)| FileContextUnit {
            body: compose_body(&change.new_path, &change.diff, content.as_ref()),
            path: change.new_path.clone(),
            diff: change.diff.clone(),
            content,
        })
        .collect();

    Ok(units)
}

/// Reads every path at `git_ref`, returning contents in the order of `paths`.
async fn fetch_contents(
    client: &GitLabClient,
    id: &ChangeRequestId,
    git_ref: &str,
    paths: Vec<String>,
    concurrency: usize,
) -> GitContextEngineResult<Vec<FileContent>> {
    if concurrency <= 1 {
        let mut out = Vec::with_capacity(paths.len());
        for path in &paths {
            info!(path = %path, "loading file");
            out.push(client.fetch_raw_file(id, path, git_ref).await?);
        }
        return Ok(out);
    }

    let sem = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(paths.len());
    for path in paths {
        let client = client.clone();
        let id = id.clone();
        let git_ref = git_ref.to_string();
        let sem = sem.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| GitContextEngineError::Internal(format!("semaphore closed: {e}")))?;
            info!(path = %path, "loading file");
            client.fetch_raw_file(&id, &path, &git_ref).await
        }));
    }

    // Awaiting in spawn order keeps the output aligned with `paths`.
    let mut out = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();
    while let Some(h) = pending.next() {
        let res = h
            .await
            .map_err(|e| GitContextEngineError::Internal(format!("join error: {e}")))
            .and_then(|r| r);
        match res {
            Ok(content) => out.push(content),
            Err(e) => {
                // First failure wins; stop the fetches nobody will read.
                for rest in pending.by_ref() {
                    rest.abort();
                }
                return Err(e);
            }
        }
    }
    Ok(out)
}
