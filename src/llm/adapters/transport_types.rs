//! Transport types
//!
//! Common types shared across transport implementations.

use serde_json::Value as JsonValue;

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited or quota exhausted
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider-specific error (see response body)
    #[error("Provider error: {code} - {message}")]
    Provider { code: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

/// What a failed call tells the user about their credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    /// Key rejected by the provider
    InvalidKey,
    /// Key accepted but out of quota
    QuotaExceeded,
    /// Anything else
    Generic,
}

impl AdapterError {
    /// Classify the failure for user-facing messages.
    pub fn diagnosis(&self) -> Diagnosis {
        match self {
            AdapterError::Authentication(_) => Diagnosis::InvalidKey,
            AdapterError::RateLimited { .. } => Diagnosis::QuotaExceeded,
            AdapterError::Http { status, message } => match status {
                401 | 403 => Diagnosis::InvalidKey,
                429 => Diagnosis::QuotaExceeded,
                _ => diagnose_text(message),
            },
            AdapterError::Provider { code, message } => {
                match diagnose_text(code) {
                    Diagnosis::Generic => diagnose_text(message),
                    found => found,
                }
            }
            _ => diagnose_text(&self.to_string()),
        }
    }
}

/// Keyword classification of a provider message.
pub fn diagnose_text(text: &str) -> Diagnosis {
    let lower = text.to_lowercase();
    if lower.contains("api key")
        || lower.contains("api_key")
        || lower.contains("authentication")
        || lower.contains("unauthenticated")
        || lower.contains("permission_denied")
    {
        Diagnosis::InvalidKey
    } else if lower.contains("quota") || lower.contains("resource_exhausted") {
        Diagnosis::QuotaExceeded
    } else {
        Diagnosis::Generic
    }
}

impl From<std::io::Error> for AdapterError {
    fn from(err: std::io::Error) -> Self {
        AdapterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Json(err.to_string())
    }
}

impl From<ureq::Error> for AdapterError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = error_message_from_body(&body).unwrap_or_else(|| format!("HTTP {}", code));
                match code {
                    401 | 403 => AdapterError::Authentication(message),
                    429 => AdapterError::RateLimited { message },
                    _ => AdapterError::Http {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(err) => AdapterError::Network(err.to_string()),
        }
    }
}

/// Extract `error.message` from a provider error body, if present.
///
/// Both Google and OpenAI-compatible providers use this shape.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let json: JsonValue = serde_json::from_str(body).ok()?;
    match &json["error"] {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Object(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over HTTP client to enable testing with FakeTransport.
pub trait SyncTransport: Send + Sync {
    /// POST JSON request and return response body
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError>;

    /// GET request with URL-encoded query pairs, returning the response body
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_from_status() {
        let err = AdapterError::Http {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert_eq!(err.diagnosis(), Diagnosis::InvalidKey);

        let err = AdapterError::Http {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.diagnosis(), Diagnosis::QuotaExceeded);
    }

    #[test]
    fn test_diagnosis_from_message() {
        let err = AdapterError::Http {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert_eq!(err.diagnosis(), Diagnosis::InvalidKey);

        let err = AdapterError::Provider {
            code: "RESOURCE_EXHAUSTED".to_string(),
            message: "You exceeded your current quota".to_string(),
        };
        assert_eq!(err.diagnosis(), Diagnosis::QuotaExceeded);

        let err = AdapterError::Network("connection refused".to_string());
        assert_eq!(err.diagnosis(), Diagnosis::Generic);
    }

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message_from_body(body),
            Some("API key not valid".to_string())
        );
        assert_eq!(error_message_from_body("not json"), None);
        assert_eq!(error_message_from_body(r#"{"ok":true}"#), None);
    }

    #[test]
    fn test_adapter_error_display() {
        let err = AdapterError::Network("test".to_string());
        assert_eq!(format!("{}", err), "Network error: test");

        let err = AdapterError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(format!("{}", err), "HTTP error 404: not found");

        let err = AdapterError::RateLimited {
            message: "quota exceeded".to_string(),
        };
        assert!(format!("{}", err).contains("Rate limited"));
        assert!(format!("{}", err).contains("quota exceeded"));
    }
}
