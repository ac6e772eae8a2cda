//! LLM Adapters
//!
//! Provider-agnostic interface for LLM HTTP APIs.
//! Supports Google Generative Language (Gemini/Gemma), OpenAI-compatible
//! endpoints, and a scripted stub for tests.

pub mod factory;
pub mod gemini;
pub mod gemini_parse;
pub mod normalize;
pub mod openai;
pub mod openai_parse;
pub mod stub;
pub mod transport;
pub mod transport_fake;
pub mod transport_types;
pub mod transport_ureq;

// Re-export common types
pub use factory::{
    create_adapter, create_adapter_from_config_str, create_classifier, create_report_chain,
};
pub use transport::{AdapterError, Diagnosis, SyncTransport, Transport};

/// LLM adapter trait
///
/// All providers implement this trait. The pipeline only ever needs
/// "prompt in, text out".
pub trait LlmAdapter: Send + Sync {
    /// Generate completion from prompt (non-streaming)
    ///
    /// Returns full response text, already extracted from the provider's
    /// content payload.
    fn generate(&self, prompt: &str) -> Result<String, AdapterError>;

    /// Get provider name for logging
    fn provider_name(&self) -> &str;

    /// Get model name for logging and report metadata
    fn model(&self) -> &str;
}

/// Adapter enum, the concrete type for all providers
///
/// Wraps all adapter types, implementing LlmAdapter via delegation, so
/// callers hold one sized type regardless of provider.
#[derive(Debug)]
pub enum Adapter {
    Gemini(gemini::GeminiAdapter),
    OpenAi(openai::OpenAiAdapter),
    Stub(stub::StubAdapter),
}

impl LlmAdapter for Adapter {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        match self {
            Adapter::Gemini(a) => a.generate(prompt),
            Adapter::OpenAi(a) => a.generate(prompt),
            Adapter::Stub(a) => a.generate(prompt),
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Adapter::Gemini(a) => a.provider_name(),
            Adapter::OpenAi(a) => a.provider_name(),
            Adapter::Stub(a) => a.provider_name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Adapter::Gemini(a) => a.model(),
            Adapter::OpenAi(a) => a.model(),
            Adapter::Stub(a) => a.model(),
        }
    }
}

impl From<stub::StubAdapter> for Adapter {
    fn from(stub: stub::StubAdapter) -> Self {
        Adapter::Stub(stub)
    }
}
