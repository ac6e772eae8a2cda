//! API key validation
//!
//! Three tiers, cheapest first: the key is present, it looks like a key
//! for the provider, and a minimal live call succeeds.

use crate::config::Provider;
use crate::llm::{AdapterError, Diagnosis, LlmAdapter};

/// Prefix of Google API keys
const GOOGLE_KEY_PREFIX: &str = "AIza";
/// Shortest plausible Google API key
const GOOGLE_KEY_MIN_LEN: usize = 30;
/// Prompt of the live check
const PROBE_PROMPT: &str = "test";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyCheckError {
    #[error("API key is empty")]
    Empty,

    #[error("Invalid format: Google API keys start with 'AIza'")]
    BadFormat,

    #[error("API key appears too short")]
    TooShort,

    #[error("Invalid API key or authentication failed: {0}")]
    Rejected(String),

    #[error("API key valid but quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Validation error: {0}")]
    Other(String),
}

/// Tiers one and two, no network
///
/// The stub provider needs no key. Format rules apply to Gemini keys only.
pub fn check_key_format(provider: Provider, key: &str) -> Result<(), KeyCheckError> {
    if provider == Provider::Stub {
        return Ok(());
    }
    let key = key.trim();
    if key.is_empty() {
        return Err(KeyCheckError::Empty);
    }
    if provider == Provider::Gemini {
        if !key.starts_with(GOOGLE_KEY_PREFIX) {
            return Err(KeyCheckError::BadFormat);
        }
        if key.chars().count() < GOOGLE_KEY_MIN_LEN {
            return Err(KeyCheckError::TooShort);
        }
    }
    Ok(())
}

/// Tier three: one minimal call through `adapter`
pub fn probe_key<A: LlmAdapter>(adapter: &A) -> Result<(), KeyCheckError> {
    match adapter.generate(PROBE_PROMPT) {
        Ok(_) => {
            tracing::info!(
                provider = adapter.provider_name(),
                model = adapter.model(),
                "API key verified"
            );
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                provider = adapter.provider_name(),
                model = adapter.model(),
                error = %err,
                "API key check failed"
            );
            Err(classify_failure(err))
        }
    }
}

/// All three tiers
pub fn verify_api_key<A: LlmAdapter>(
    provider: Provider,
    key: &str,
    adapter: &A,
) -> Result<(), KeyCheckError> {
    check_key_format(provider, key)?;
    probe_key(adapter)
}

fn classify_failure(err: AdapterError) -> KeyCheckError {
    let message = err.to_string();
    match err.diagnosis() {
        Diagnosis::InvalidKey => KeyCheckError::Rejected(message),
        Diagnosis::QuotaExceeded => KeyCheckError::QuotaExceeded(message),
        Diagnosis::Generic => KeyCheckError::Other(message),
    }
}
