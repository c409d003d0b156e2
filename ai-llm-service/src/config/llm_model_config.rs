use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{ConfigError, Result, validate_http_endpoint, validate_range_f32};

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which LLM backend to use (Ollama, OpenAI-compatible, Gemini).
/// - `model`: The model identifier (e.g., `"deepseek-r1:32b"`, `"gpt-4o"`).
/// - `endpoint`: Server root (e.g., `"http://localhost:11434"`); API paths are appended.
/// - `api_key`: Optional API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `context_window`: Prompt context size in tokens (Ollama `num_ctx`).
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub context_window: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks model, endpoint and sampling parameters.
    ///
    /// Provider-specific requirements (e.g. the OpenAI API key) are checked
    /// by the service constructors.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0, "expected 0.0..=1.0")?;
        }
        Ok(())
    }
}
