//! Crate-wide error hierarchy for git-context-engine.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitContextEngineResult<T> = Result<T, GitContextEngineError>;

/// Root error type for the git-context-engine crate.
#[derive(Debug, Error)]
pub enum GitContextEngineError {
    /// GitLab related failure.
    #[error(transparent)]
    Provider(#[from] GitContextEngineProviderError),

    /// Configuration problems (bad/missing tokens, base URL, etc.).
    #[error(transparent)]
    Config(#[from] GitContextEngineConfigError),

    /// A concurrent fetch task panicked or was cancelled.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Provider-specific error used inside the provider layer.
#[derive(Debug, Error)]
pub enum GitContextEngineProviderError {
    /// Merge request metadata could not be fetched (non-2xx).
    ///
    /// Carries the HTTP status and the raw response body so the caller can
    /// tell a bad token from a missing project.
    #[error("failed to fetch merge request: {status} - {body}")]
    RemoteFetch {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body as returned by the provider.
        body: String,
    },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl GitContextEngineProviderError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteFetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses (bad or under-scoped token).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Configuration and setup errors (base URL, missing token, etc.).
#[derive(Debug, Error)]
pub enum GitContextEngineConfigError {
    /// Missing required provider access token.
    #[error("missing provider token")]
    MissingToken,

    /// Invalid base URL.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Project identifier was empty.
    #[error("project id must not be empty")]
    EmptyProject,
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for GitContextEngineError {
    fn from(e: reqwest::Error) -> Self {
        GitContextEngineError::Provider(GitContextEngineProviderError::from(e))
    }
}

// ===== Mapping from reqwest::Error into GitContextEngineProviderError =====

impl From<reqwest::Error> for GitContextEngineProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitContextEngineProviderError::Timeout;
        }

        if e.is_decode() {
            return GitContextEngineProviderError::InvalidResponse(e.to_string());
        }

        if let Some(status) = e.status() {
            return GitContextEngineProviderError::RemoteFetch {
                status: status.as_u16(),
                body: String::new(),
            };
        }

        GitContextEngineProviderError::Network(e.to_string())
    }
}
