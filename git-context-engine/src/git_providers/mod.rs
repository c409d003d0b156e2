//! GitLab provider facade.
//!
//! Exposes the runtime configuration and the concrete GitLab client used to
//! read merge request changes and raw file contents.

pub mod types;
pub use types::*;

pub mod gitlab;
pub use gitlab::GitLabClient;

use crate::errors::{GitContextEngineConfigError, GitContextEngineResult};
use tracing::debug;

/// Runtime configuration for the provider client.
///
/// This configuration is usually injected from CLI flags or environment.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Instance root, e.g. "https://gitlab.com" (the `/api/v4` suffix is added
    /// by the client).
    pub base_url: String,
    /// Access token sent as `PRIVATE-TOKEN` (needs `read_api` scope).
    pub token: String,
}

impl GitLabClient {
    /// Constructs a client from generic configuration.
    ///
    /// The underlying HTTP client is configured with a stable user agent so
    /// that the instance can identify the integration. No timeout is set.
    pub fn from_config(cfg: ProviderConfig) -> GitContextEngineResult<Self> {
        debug!("Initializing GitLab client: base_url={}", cfg.base_url);

        let base = cfg.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GitContextEngineConfigError::InvalidBaseUrl(cfg.base_url).into());
        }
        if cfg.token.trim().is_empty() {
            return Err(GitContextEngineConfigError::MissingToken.into());
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("git-context-engine/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitLabClient::new(http, base, cfg.token))
    }
}
