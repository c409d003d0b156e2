//! Default LLM configs for the reviewer.
//!
//! Reviews favour determinism over creativity, so all constructors use a low
//! temperature and a generous timeout (local 30B models can take minutes on a
//! large merge request).

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};

/// Default local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
/// Default OpenAI API root.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
/// Default Google Generative Language API root.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
/// Default local model.
pub const DEFAULT_OLLAMA_MODEL: &str = "deepseek-r1:32b";
/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
/// Default prompt context for Ollama (`num_ctx`), in tokens.
pub const DEFAULT_CONTEXT_WINDOW: u32 = 16384;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Config for a local Ollama model.
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `context_window = Some(16384)`
/// - `timeout_secs = Some(600)`
pub fn config_ollama(model: impl Into<String>, endpoint: impl Into<String>) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: model.into(),
        endpoint: endpoint.into(),
        api_key: None,
        max_tokens: None,
        temperature: Some(DEFAULT_TEMPERATURE),
        top_p: None,
        context_window: Some(DEFAULT_CONTEXT_WINDOW),
        timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
    }
}

/// Config for an OpenAI-compatible chat completion endpoint.
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `context_window = None` (server side)
/// - `timeout_secs = Some(600)`
pub fn config_openai(
    model: impl Into<String>,
    endpoint: impl Into<String>,
    api_key: Option<String>,
) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: model.into(),
        endpoint: endpoint.into(),
        api_key,
        max_tokens: None,
        temperature: Some(DEFAULT_TEMPERATURE),
        top_p: None,
        context_window: None,
        timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
    }
}

/// Config for Google Gemini (`generateContent`).
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `context_window = None` (server side)
/// - `timeout_secs = Some(600)`
pub fn config_gemini(
    model: impl Into<String>,
    endpoint: impl Into<String>,
    api_key: Option<String>,
) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Gemini,
        ..config_openai(model, endpoint, api_key)
    }
}

/// Model used when the caller does not pick one.
pub fn default_model(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Ollama => DEFAULT_OLLAMA_MODEL,
        LlmProvider::OpenAI => DEFAULT_OPENAI_MODEL,
        LlmProvider::Gemini => DEFAULT_GEMINI_MODEL,
    }
}

/// API root used when the caller does not pick one.
pub fn default_endpoint(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Ollama => DEFAULT_OLLAMA_URL,
        LlmProvider::OpenAI => DEFAULT_OPENAI_URL,
        LlmProvider::Gemini => DEFAULT_GEMINI_URL,
    }
}
