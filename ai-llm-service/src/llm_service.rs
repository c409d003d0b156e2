//! Provider-agnostic LLM entry point.
//!
//! `LlmService` validates a [`LlmModelConfig`], builds the matching backend
//! client once and dispatches generation calls to it. Enum dispatch keeps the
//! call sites free of trait objects.
//!
//! # Example
//! ```no_run
//! use ai_llm_service::config::default_config::config_ollama;
//! use ai_llm_service::llm_service::LlmService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = LlmService::from_config(config_ollama("llama3", "http://localhost:11434"))?;
//! let txt = svc.generate("Hello world", Some("Answer briefly.")).await?;
//! println!("{txt}");
//! # Ok(()) }
//! ```

use tracing::debug;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{
        gemini_service::GeminiService, ollama_service::OllamaService,
        open_ai_service::OpenAiService,
    },
};

/// Configured LLM backend.
#[derive(Debug)]
pub enum LlmService {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
    Gemini(GeminiService),
}

impl LlmService {
    /// Validates `cfg` and constructs the backend selected by `cfg.provider`.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] for invalid parameters and
    /// [`AiLlmError::Provider`] for provider-specific requirements (API key).
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;
        debug!(provider = %cfg.provider, model = %cfg.model, "building LLM service");

        Ok(match cfg.provider {
            LlmProvider::Ollama => LlmService::Ollama(OllamaService::new(cfg)?),
            LlmProvider::OpenAI => LlmService::OpenAI(OpenAiService::new(cfg)?),
            LlmProvider::Gemini => LlmService::Gemini(GeminiService::new(cfg)?),
        })
    }

    /// Generates a completion for `prompt` with an optional system instruction.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match self {
            LlmService::Ollama(s) => s.generate(prompt, system).await,
            LlmService::OpenAI(s) => s.generate(prompt, system).await,
            LlmService::Gemini(s) => s.generate(prompt, system).await,
        }
    }

    /// Config of the active backend.
    pub fn config(&self) -> &LlmModelConfig {
        match self {
            LlmService::Ollama(s) => s.config(),
            LlmService::OpenAI(s) => s.config(),
            LlmService::Gemini(s) => s.config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config::{config_gemini, config_ollama, config_openai};
    use crate::error_handler::ConfigError;

    #[test]
    fn builds_backend_matching_provider() {
        let svc = LlmService::from_config(config_ollama("llama3", "http://localhost:11434"))
            .unwrap();
        assert!(matches!(svc, LlmService::Ollama(_)));
        assert_eq!(svc.config().model, "llama3");

        let svc = LlmService::from_config(config_openai(
            "gpt-4o",
            "https://api.openai.com",
            Some("sk-test".into()),
        ))
        .unwrap();
        assert!(matches!(svc, LlmService::OpenAI(_)));

        let svc = LlmService::from_config(config_gemini(
            "gemini-1.5-pro",
            "https://generativelanguage.googleapis.com",
            Some("g-key".into()),
        ))
        .unwrap();
        assert!(matches!(svc, LlmService::Gemini(_)));
    }

    #[test]
    fn invalid_config_fails_before_backend_is_built() {
        let mut cfg = config_ollama("llama3", "http://localhost:11434");
        cfg.temperature = Some(3.0);
        assert!(matches!(
            LlmService::from_config(cfg),
            Err(AiLlmError::Config(ConfigError::OutOfRange { .. }))
        ));
    }
}
