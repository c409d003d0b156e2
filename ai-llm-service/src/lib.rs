//! Shared LLM service with Ollama and OpenAI-compatible backends.
//!
//! - [`config`]: model configuration, provider selection and defaults.
//! - [`services`]: thin HTTP clients per backend.
//! - [`llm_service`]: enum dispatch used by callers.
//! - [`error_handler`]: unified error type.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use llm_service::LlmService;
