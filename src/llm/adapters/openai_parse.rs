//! OpenAI response parsing
//!
//! Public functions for parsing OpenAI-compatible chat completion JSON.

use crate::llm::adapters::normalize::content_text;
use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse OpenAI chat completion JSON response
///
/// `choices[0].message.content` may be a string or a list of content parts.
/// Public function for testing.
pub fn parse_chat_completion(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(err) = json.get("error") {
        let message = err["message"].as_str().unwrap_or("unknown error").to_string();
        let code = err["code"]
            .as_str()
            .or_else(|| err["type"].as_str())
            .unwrap_or("error")
            .to_string();
        return Err(AdapterError::Provider { code, message });
    }

    json["choices"]
        .get(0)
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(content_text)
        .ok_or_else(|| {
            AdapterError::InvalidResponse("Missing choices[0].message.content".to_string())
        })
}
