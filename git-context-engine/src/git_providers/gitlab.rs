//! GitLab provider (REST v4) for merge request changes and raw files.
//!
//! Endpoints used:
//!   * GET /api/v4/projects/:id/merge_requests/:iid/changes
//!   * GET /api/v4/projects/:id/repository/files/:path/raw?ref=:ref

use crate::errors::{
    GitContextEngineConfigError, GitContextEngineProviderError, GitContextEngineResult,
};
use crate::git_providers::types::*;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// GitLab HTTP client wrapper.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_url: String, // e.g. "https://gitlab.com", never ends with '/'
    token: String,    // "PRIVATE-TOKEN"
}

impl GitLabClient {
    /// Constructs a GitLab client with a shared HTTP instance and auth token.
    ///
    /// Trailing slashes of `base_url` are stripped so composed URLs never
    /// contain `//`.
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!("Creating GitLabClient with base_url={}", base_url);
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Instance root this client talks to (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/v4/projects/{project}` with the project ID encoded as a
    /// single path segment.
    fn project_url(&self, project: &str) -> String {
        format!(
            "{}/api/v4/projects/{}",
            self.base_url,
            urlencoding::encode(project)
        )
    }

    /// URL of the merge request changes endpoint.
    pub fn changes_url(&self, id: &ChangeRequestId) -> String {
        format!(
            "{}/merge_requests/{}/changes",
            self.project_url(&id.project),
            id.iid
        )
    }

    /// URL of the raw file endpoint (without the `ref` query).
    pub fn raw_file_url(&self, id: &ChangeRequestId, repo_relative_path: &str) -> String {
        format!(
            "{}/repository/files/{}/raw",
            self.project_url(&id.project),
            urlencoding::encode(repo_relative_path)
        )
    }

    /// Fetches the source branch and the ordered list of changed files.
    ///
    /// Any non-success status is fatal and reported as
    /// [`GitContextEngineProviderError::RemoteFetch`] with the response body.
    /// A blank project id is rejected before any request is sent.
    pub async fn fetch_mr_changes(&self, id: &ChangeRequestId) -> GitContextEngineResult<MrChanges> {
        if id.project.trim().is_empty() {
            return Err(GitContextEngineConfigError::EmptyProject.into());
        }

        let url = self.changes_url(id);
        debug!("GitLab fetch_mr_changes: {}", url);

        let resp = self
            .http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "GitLab rejected merge request fetch");
            return Err(GitContextEngineProviderError::RemoteFetch {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let text = resp.text().await?;
        let raw: GitLabMrChanges = serde_json::from_str(&text)
            .map_err(|e| GitContextEngineProviderError::InvalidResponse(e.to_string()))?;

        let changes: Vec<FileChange> = raw.changes.into_iter().map(FileChange::from).collect();
        debug!(
            source_branch = %raw.source_branch,
            files = changes.len(),
            "GitLab merge request changes decoded"
        );

        Ok(MrChanges {
            source_branch: raw.source_branch,
            changes,
        })
    }

    /// Fetches the raw content of a file at `git_ref`.
    ///
    /// A non-success status does not fail: it yields
    /// [`FileContent::Unavailable`] so one unreadable file cannot abort the
    /// review of the others. Transport failures still propagate.
    pub async fn fetch_raw_file(
        &self,
        id: &ChangeRequestId,
        repo_relative_path: &str,
        git_ref: &str,
    ) -> GitContextEngineResult<FileContent> {
        let url = self.raw_file_url(id, repo_relative_path);
        debug!("GitLab fetch_raw_file: {} ref={}", url, git_ref);

        let resp = self
            .http
            .get(url)
            .query(&[("ref", git_ref)])
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(
                path = repo_relative_path,
                status = status.as_u16(),
                "GitLab raw file unavailable, substituting placeholder"
            );
            return Ok(FileContent::Unavailable {
                status: status.as_u16(),
            });
        }

        Ok(FileContent::Text(resp.text().await?))
    }
}

/// GitLab `/merge_requests/:iid/changes` response (subset).
#[derive(Debug, Deserialize)]
struct GitLabMrChanges {
    source_branch: String,
    #[serde(default)]
    changes: Vec<GitLabMrChange>,
}

#[derive(Debug, Deserialize)]
struct GitLabMrChange {
    new_path: String,
    #[serde(default)]
    old_path: Option<String>,
    #[serde(default)]
    new_file: bool,
    #[serde(default)]
    renamed_file: bool,
    deleted_file: bool,
    #[serde(default)]
    diff: Option<String>, // null when too large or binary
}

impl From<GitLabMrChange> for FileChange {
    fn from(c: GitLabMrChange) -> Self {
        FileChange {
            new_path: c.new_path,
            old_path: c.old_path,
            is_new: c.new_file,
            is_deleted: c.deleted_file,
            is_renamed: c.renamed_file,
            diff: c.diff.unwrap_or_default(),
        }
    }
}
