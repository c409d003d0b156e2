//! Publisher: persists the review report.
//!
//! The report body is the only artifact; it is written as UTF-8 Markdown and
//! replaces any previous file at the same path.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{Error, MrResult};
use crate::review::ReviewOutcome;

/// Default report location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "mr_review_report.md";

/// Writes review reports to a fixed path.
#[derive(Debug, Clone)]
pub struct ReportSink {
    path: PathBuf,
}

impl ReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `outcome.report`, creating missing parent directories.
    pub async fn write(&self, outcome: &ReviewOutcome) -> MrResult<()> {
        let wrap = |source| Error::Report {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(wrap)?;
        }
        tokio::fs::write(&self.path, outcome.report.as_bytes())
            .await
            .map_err(wrap)?;

        info!(
            path = %self.path.display(),
            bytes = outcome.report.len(),
            "review report written"
        );
        Ok(())
    }
}
