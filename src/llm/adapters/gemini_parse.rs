//! Gemini response parsing
//!
//! Public functions for parsing Google Generative Language
//! `generateContent` responses.

use crate::llm::adapters::normalize::content_text;
use crate::llm::adapters::transport_types::diagnose_text;
use crate::llm::adapters::{AdapterError, Diagnosis};
use serde_json::Value as JsonValue;

/// Parse a `generateContent` JSON response into completion text
///
/// Public function for testing.
pub fn parse_generate_content(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(err) = json.get("error") {
        return Err(provider_error(err));
    }

    let candidate = match json["candidates"].get(0) {
        Some(candidate) => candidate,
        None => {
            if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
                return Err(AdapterError::Provider {
                    code: "BLOCKED".to_string(),
                    message: format!("prompt blocked: {}", reason),
                });
            }
            return Err(AdapterError::InvalidResponse(
                "Missing candidates[0]".to_string(),
            ));
        }
    };

    content_text(&candidate["content"]["parts"]).ok_or_else(|| {
        let finish = candidate["finishReason"].as_str().unwrap_or("unknown");
        AdapterError::InvalidResponse(format!(
            "Missing candidates[0].content.parts text (finishReason: {})",
            finish
        ))
    })
}

/// Map an embedded `error` object to an adapter error
fn provider_error(err: &JsonValue) -> AdapterError {
    let message = err["message"].as_str().unwrap_or("unknown error").to_string();
    let status = err["status"].as_str().unwrap_or_default().to_string();

    match (diagnose_text(&status), diagnose_text(&message)) {
        (Diagnosis::InvalidKey, _) | (_, Diagnosis::InvalidKey) => {
            AdapterError::Authentication(message)
        }
        (Diagnosis::QuotaExceeded, _) | (_, Diagnosis::QuotaExceeded) => {
            AdapterError::RateLimited { message }
        }
        _ => AdapterError::Provider {
            code: if status.is_empty() {
                err["code"].to_string()
            } else {
                status
            },
            message,
        },
    }
}
