//! Merge request context engine.
//!
//! Reads a GitLab merge request's changed files, enriches each reviewable
//! file with its full content at the source branch and renders everything
//! into a single text blob for a language model.
//!
//! * [`git_providers`] – GitLab REST client and the provider data model.
//! * [`context`] – filtering, per-file unit composition and formatting.

pub mod context;
pub mod errors;
pub mod git_providers;

use tracing::info;

pub use context::{AssembleOptions, FileContextUnit};
pub use errors::{
    GitContextEngineConfigError, GitContextEngineError, GitContextEngineProviderError,
    GitContextEngineResult,
};

use crate::git_providers::{ChangeRequestId, GitLabClient, ProviderConfig};

/// Builds a client from `cfg` and assembles the context units for `id`.
///
/// Convenience wrapper for callers that do not keep a client around.
pub async fn load_merge_request_context(
    cfg: ProviderConfig,
    id: &ChangeRequestId,
    opts: &AssembleOptions,
) -> GitContextEngineResult<Vec<FileContextUnit>> {
    info!(project = %id.project, iid = id.iid, "loading merge request context");
    let client = GitLabClient::from_config(cfg)?;
    context::assemble(&client, id, opts).await
}
