//! Gemini Adapter
//!
//! Google Generative Language API (`models/{model}:generateContent`).
//! Serves both Gemini and Gemma models.
//!
//! Base URL: https://generativelanguage.googleapis.com/v1beta

use crate::llm::adapters::transport::{SyncTransport, Transport, UreqTransport};
use crate::llm::adapters::{AdapterError, LlmAdapter};

pub use crate::llm::adapters::gemini_parse::parse_generate_content;

/// Default API base URL
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini adapter
#[derive(Debug)]
pub struct GeminiAdapter {
    /// Base URL (e.g., https://generativelanguage.googleapis.com/v1beta)
    base_url: String,
    /// Model name (e.g., gemini-2.5-flash-lite)
    model: String,
    /// API key (sent as x-goog-api-key, never in the URL)
    api_key: String,
    /// Sampling temperature
    temperature: f32,
    /// HTTP transport
    transport: Transport,
}

impl GeminiAdapter {
    /// Create new Gemini adapter
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

    /// Endpoint URL for this model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Build generateContent request body
    pub fn build_request(&self, prompt: &str) -> String {
        serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ],
            "generationConfig": {
                "temperature": self.temperature
            }
        })
        .to_string()
    }
}

impl LlmAdapter for GeminiAdapter {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let url = self.endpoint();
        let body = self.build_request(prompt);

        let headers = [
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.transport.post_json(&url, &headers, &body)?;
        parse_generate_content(&response)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
