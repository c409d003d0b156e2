//! Public entry for the mr-reviewer pipeline.
//!
//! Single high-level function to review one GitLab Merge Request:
//!
//! 1) **Step 1: Context**
//!    - Fetch the MR changes and source branch
//!    - Filter by extension, drop deleted files
//!    - Pair each diff with the full file at the source branch
//!
//! 2) **Step 2: Prompt + LLM**
//!    - Join per-file units into one context blob
//!    - Embed it in the review instruction and call the configured model
//!
//! 3) **Step 3: Verdict + Publish**
//!    - Extract `PASSED`/`FAILED` and the cleaned report
//!    - Write the report file
//!
//! Provider errors abort the run. A failing model call is logged and ends the
//! run without a report.

pub mod errors;
pub mod publish;
pub mod review;

use std::path::PathBuf;
use std::time::Instant;

use ai_llm_service::LlmService;
use git_context_engine::context::{self, AssembleOptions};
use git_context_engine::git_providers::{ChangeRequestId, ProviderConfig};
use git_context_engine::load_merge_request_context;
use tracing::{debug, error, info, warn};

use errors::MrResult;
use publish::ReportSink;
use review::prompt::{SYSTEM_PROMPT, build_review_prompt};
use review::{ReviewOutcome, extract_verdict};

/// Everything needed to review one merge request.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub provider: ProviderConfig,
    pub id: ChangeRequestId,
    pub assemble: AssembleOptions,
    pub report_path: PathBuf,
}

/// How a review run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRun {
    /// No changed file survived the filters; the model was not called.
    NoMatchingFiles,
    /// The model call failed; nothing was written.
    ModelFailed { error: String },
    /// Verdict extracted and report written to `report_path`.
    Completed {
        outcome: ReviewOutcome,
        report_path: PathBuf,
    },
}

/// Runs steps **1–3** for a single MR.
///
/// # Errors
/// Returns an error when the MR cannot be read from GitLab or the report
/// cannot be written. Model failures are reported as
/// [`ReviewRun::ModelFailed`] instead.
pub async fn run_review(cfg: &ReviewConfig, llm: &LlmService) -> MrResult<ReviewRun> {
    info!(
        project = %cfg.id.project,
        iid = cfg.id.iid,
        "starting review"
    );

    // ---------------------------
    // Step 1: context
    // ---------------------------
    let t1 = Instant::now();
    let units =
        load_merge_request_context(cfg.provider.clone(), &cfg.id, &cfg.assemble).await?;
    debug!(
        "step1: {} units assembled in {} ms",
        units.len(),
        t1.elapsed().as_millis()
    );

    if units.is_empty() {
        warn!("no matching files found in this merge request");
        return Ok(ReviewRun::NoMatchingFiles);
    }

    // ---------------------------
    // Step 2: prompt + LLM
    // ---------------------------
    let mr_context = context::format_context(&units);
    let tokens = context::estimate_tokens(&mr_context);
    info!(files = units.len(), tokens, "context size (estimated tokens)");
    if let Some(window) = llm.config().context_window {
        if tokens > window as usize {
            warn!(
                tokens,
                window, "context likely exceeds the model window and may be truncated"
            );
        }
    }

    let prompt = build_review_prompt(&mr_context);
    let t2 = Instant::now();
    info!(model = %llm.config().model, "analyzing merge request changes");
    let reply = match llm.generate(&prompt, Some(SYSTEM_PROMPT)).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "model invocation failed, no report written");
            return Ok(ReviewRun::ModelFailed {
                error: e.to_string(),
            });
        }
    };
    debug!("step2: model replied in {} ms", t2.elapsed().as_millis());

    // ---------------------------
    // Step 3: verdict + publish
    // ---------------------------
    let outcome = extract_verdict(&reply);
    info!(is_ok = outcome.is_ok, "verdict extracted");

    let sink = ReportSink::new(&cfg.report_path);
    sink.write(&outcome).await?;

    Ok(ReviewRun::Completed {
        outcome,
        report_path: sink.path().to_path_buf(),
    })
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use errors::Error as ReviewerError;
pub use git_context_engine::context::DEFAULT_EXTENSIONS;
pub use publish::DEFAULT_REPORT_PATH;
