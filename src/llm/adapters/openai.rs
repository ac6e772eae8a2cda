//! OpenAI Adapter
//!
//! OpenAI-compatible HTTP API adapter (`/chat/completions`).

use crate::llm::adapters::transport::{SyncTransport, Transport, UreqTransport};
use crate::llm::adapters::{AdapterError, LlmAdapter};

// Public parsing module (re-exported for testing)
pub use crate::llm::adapters::openai_parse::parse_chat_completion;

/// OpenAI-compatible adapter
#[derive(Debug)]
pub struct OpenAiAdapter {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    /// Model name (e.g., gpt-4o-mini)
    model: String,
    /// API key
    api_key: String,
    /// Sampling temperature
    temperature: f32,
    /// HTTP transport
    transport: Transport,
}

impl OpenAiAdapter {
    /// Create new OpenAI adapter
    pub fn new(base_url: String, model: String, api_key: String, temperature: f32) -> Self {
        Self::with_transport(
            base_url,
            model,
            api_key,
            temperature,
            Transport::Real(UreqTransport::new()),
        )
    }

    /// Create adapter with custom transport (for testing)
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: String,
        temperature: f32,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            temperature,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Build chat request body
    ///
    /// Every pipeline prompt is self-contained, so no system message is sent.
    pub fn build_request(&self, prompt: &str) -> String {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": self.temperature,
            "stream": false
        })
        .to_string()
    }
}

impl LlmAdapter for OpenAiAdapter {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.build_request(prompt);

        let auth_header = format!("Bearer {}", self.api_key);
        let headers = [
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.transport.post_json(&url, &headers, &body)?;
        parse_chat_completion(&response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
