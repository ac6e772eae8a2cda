//! Real HTTP transport using ureq
//!
//! Synchronous blocking HTTP client for LLM adapters and the document
//! retriever.

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};
use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Real HTTP transport using ureq
#[derive(Debug)]
pub struct UreqTransport {
    /// Timeout in seconds for requests
    timeout: u64,
}

impl UreqTransport {
    /// Create new transport with default timeout
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout: timeout_secs,
        }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        tracing::debug!(url, body_len = body.len(), timeout = self.timeout, "POST");
        let mut request = ureq::request("POST", url).timeout(Duration::from_secs(self.timeout));

        for (key, value) in headers {
            request = request.set(key, value);
        }

        // ureq reports non-2xx statuses as errors; the From impl maps them
        let response = request.send_string(body)?;
        tracing::debug!(url, status = response.status(), "response");

        Ok(response.into_string()?)
    }

    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, AdapterError> {
        tracing::debug!(url, params = query.len(), timeout = self.timeout, "GET");
        let mut request = ureq::request("GET", url).timeout(Duration::from_secs(self.timeout));

        for (key, value) in query {
            request = request.query(key, value);
        }
        for (key, value) in headers {
            request = request.set(key, value);
        }

        let response = request.call()?;
        tracing::debug!(url, status = response.status(), "response");

        Ok(response.into_string()?)
    }
}
