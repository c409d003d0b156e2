//! Command-line and environment configuration.
//!
//! Every flag can also come from the environment (or a `.env` file loaded
//! before parsing), which is how CI jobs usually drive the reviewer.

use std::path::PathBuf;

use ai_llm_service::LlmModelConfig;
use ai_llm_service::LlmProvider;
use ai_llm_service::config::default_config::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, default_endpoint,
    default_model,
};
use clap::Parser;
use git_context_engine::context::AssembleOptions;
use git_context_engine::git_providers::{ChangeRequestId, ProviderConfig};
use mr_reviewer::{DEFAULT_EXTENSIONS, DEFAULT_REPORT_PATH, ReviewConfig};

/// Reviews a GitLab merge request with an LLM and writes a Markdown report.
#[derive(Parser, Debug)]
#[command(name = "mr-ai-review", version, about)]
pub struct Args {
    // --- GitLab ---
    /// GitLab instance root, e.g. https://gitlab.com
    #[arg(long, env = "GITLAB_URL")]
    pub gitlab_url: String,

    /// Personal or project access token with `read_api` scope.
    #[arg(long, env = "GITLAB_PRIVATE_TOKEN", hide_env_values = true)]
    pub gitlab_token: String,

    /// Project id or full path (`group/project`).
    #[arg(long, env = "GITLAB_PROJECT_ID")]
    pub project_id: String,

    /// Merge request IID inside the project.
    #[arg(long, env = "GITLAB_MR_IID")]
    pub mr_id: u64,

    // --- Model ---
    /// Model backend: `ollama`, `openai` or `gemini`.
    #[arg(long, env = "LLM_KIND", default_value = "ollama")]
    pub provider: LlmProvider,

    /// Model name. Defaults depend on `--provider`.
    #[arg(long, env = "LLM_MODEL")]
    pub model: Option<String>,

    /// Model server root. Defaults depend on `--provider`.
    #[arg(long, env = "LLM_URL")]
    pub model_url: Option<String>,

    /// API key for OpenAI-compatible servers.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API key for Google Gemini.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    #[arg(long, env = "LLM_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Prompt context size in tokens (Ollama `num_ctx`).
    #[arg(long, env = "LLM_NUM_CTX", default_value_t = DEFAULT_CONTEXT_WINDOW)]
    pub context_window: u32,

    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    // --- Context ---
    /// Comma-separated suffixes to review, e.g. `.rs,.toml`.
    #[arg(long, env = "REVIEW_EXTENSIONS", value_delimiter = ',', conflicts_with = "all_files")]
    pub extensions: Option<Vec<String>>,

    /// Review every changed file regardless of extension.
    #[arg(long, default_value_t = false)]
    pub all_files: bool,

    /// Send diffs only, without the full file contents.
    #[arg(long, default_value_t = false)]
    pub diff_only: bool,

    /// Max concurrent raw-file requests.
    #[arg(long, env = "REVIEW_FETCH_CONCURRENCY", default_value_t = 1)]
    pub fetch_concurrency: usize,

    // --- Output ---
    #[arg(long, env = "REVIEW_REPORT_PATH", default_value = DEFAULT_REPORT_PATH)]
    pub report_path: PathBuf,
}

impl Args {
    pub fn review_config(&self) -> ReviewConfig {
        ReviewConfig {
            provider: ProviderConfig {
                base_url: self.gitlab_url.clone(),
                token: self.gitlab_token.clone(),
            },
            id: ChangeRequestId {
                project: self.project_id.clone(),
                iid: self.mr_id,
            },
            assemble: self.assemble_options(),
            report_path: self.report_path.clone(),
        }
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        let extension_filter = if self.all_files {
            None
        } else {
            let list = match &self.extensions {
                Some(exts) => exts
                    .iter()
                    .map(|e| e.trim())
                    .filter(|e| !e.is_empty())
                    .map(normalize_suffix)
                    .collect(),
                None => DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            };
            Some(list)
        };

        AssembleOptions {
            extension_filter,
            include_full_content: !self.diff_only,
            fetch_concurrency: self.fetch_concurrency.max(1),
        }
    }

    pub fn llm_config(&self) -> LlmModelConfig {
        let endpoint = self
            .model_url
            .clone()
            .unwrap_or_else(|| default_endpoint(self.provider).to_string());
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| default_model(self.provider).to_string());
        let api_key = match self.provider {
            LlmProvider::Ollama => None,
            LlmProvider::OpenAI => self.api_key.clone(),
            LlmProvider::Gemini => self.google_api_key.clone(),
        };

        LlmModelConfig {
            provider: self.provider,
            model,
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            max_tokens: None,
            temperature: Some(self.temperature),
            top_p: None,
            // num_ctx is an Ollama option; hosted APIs size the window themselves.
            context_window: (self.provider == LlmProvider::Ollama).then_some(self.context_window),
            timeout_secs: Some(self.timeout_secs),
        }
    }
}

/// `rs` and `.rs` both mean "ends with `.rs`".
fn normalize_suffix(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
