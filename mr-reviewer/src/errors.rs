//! Crate-wide error hierarchy for mr-reviewer.
//!
//! Model failures are not represented here: the orchestrator absorbs them
//! into `ReviewRun::ModelFailed`.

use std::path::PathBuf;

use git_context_engine::GitContextEngineError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type MrResult<T> = Result<T, Error>;

/// Root error type for the mr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Merge request could not be read (auth, missing project, transport).
    #[error(transparent)]
    Context(#[from] GitContextEngineError),

    /// The report file could not be written.
    #[error("failed to write report to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True when GitLab rejected the token (401/403).
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Error::Context(GitContextEngineError::Provider(p)) => p.is_auth_failure(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git_context_engine::GitContextEngineProviderError;

    fn remote(status: u16) -> Error {
        Error::Context(GitContextEngineError::Provider(
            GitContextEngineProviderError::RemoteFetch {
                status,
                body: String::new(),
            },
        ))
    }

    #[test]
    fn auth_failure_covers_401_and_403_only() {
        assert!(remote(401).is_auth_failure());
        assert!(remote(403).is_auth_failure());
        assert!(!remote(404).is_auth_failure());

        let io = Error::Report {
            path: PathBuf::from("r.md"),
            source: std::io::Error::other("disk full"),
        };
        assert!(!io.is_auth_failure());
    }
}
