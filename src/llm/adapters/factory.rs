//! Adapter Factory
//!
//! Creates LLM adapter instances and the report model chain from
//! configuration.

use crate::config::{Config, LlmConfig, Provider};
use crate::llm::adapters::gemini::{GeminiAdapter, GEMINI_BASE_URL};
use crate::llm::adapters::openai::OpenAiAdapter;
use crate::llm::adapters::stub::StubAdapter;
use crate::llm::adapters::transport::{Transport, UreqTransport};
use crate::llm::adapters::{Adapter, AdapterError};
use crate::llm::chain::ModelChain;

/// Default OpenAI base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Create an adapter for `model` using the provider settings in `config`
pub fn create_adapter(config: &LlmConfig, model: &str) -> Result<Adapter, AdapterError> {
    if model.trim().is_empty() {
        return Err(AdapterError::Configuration(
            "Model name must not be empty".to_string(),
        ));
    }

    let api_key = resolve_env_var(&config.api_key);
    let transport = Transport::Real(UreqTransport::with_timeout(config.timeout_secs));

    match config.provider {
        Provider::Gemini => Ok(Adapter::Gemini(GeminiAdapter::with_transport(
            base_url_or(config, GEMINI_BASE_URL),
            model.to_string(),
            api_key,
            config.temperature,
            transport,
        ))),
        Provider::OpenAi => Ok(Adapter::OpenAi(OpenAiAdapter::with_transport(
            base_url_or(config, OPENAI_BASE_URL),
            model.to_string(),
            api_key,
            config.temperature,
            transport,
        ))),
        Provider::Stub => Ok(Adapter::Stub(StubAdapter::new().named(model))),
    }
}

/// Create the classifier adapter (correction, validation, rerank)
pub fn create_classifier(config: &LlmConfig) -> Result<Adapter, AdapterError> {
    create_adapter(config, &config.classifier_model)
}

/// Create the ordered report model chain (primary first, then fallbacks)
pub fn create_report_chain(config: &LlmConfig) -> Result<ModelChain, AdapterError> {
    if config.report_models.is_empty() {
        return Err(AdapterError::Configuration(
            "At least one report model is required".to_string(),
        ));
    }
    let slots = config
        .report_models
        .iter()
        .map(|model| create_adapter(config, model))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModelChain::new(slots))
}

/// Create the classifier adapter from a TOML config string
pub fn create_adapter_from_config_str(content: &str) -> Result<Adapter, AdapterError> {
    let config = Config::from_toml_str(content)
        .map_err(|e| AdapterError::Configuration(e.to_string()))?;
    create_classifier(&config.llm)
}

fn base_url_or(config: &LlmConfig, default: &str) -> String {
    config
        .base_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Resolve environment variable reference
///
/// If value starts with "env:", read from environment (empty when unset).
/// Otherwise return value as-is.
pub fn resolve_env_var(value: &str) -> String {
    if let Some(rest) = value.strip_prefix("env:") {
        std::env::var(rest).unwrap_or_default()
    } else {
        value.to_string()
    }
}
