//! HTTP Transport for LLM Adapters
//!
//! Provides synchronous HTTP client.
//! Uses ureq for blocking I/O.

pub use crate::llm::adapters::transport_fake::{FakeTransport, RecordedRequest, RequestLog};
pub use crate::llm::adapters::transport_types::{AdapterError, Diagnosis, SyncTransport};
pub use crate::llm::adapters::transport_ureq::UreqTransport;

/// Concrete transport enum
///
/// Wraps all transport types, avoiding dyn compatibility issues.
#[derive(Debug)]
pub enum Transport {
    Real(UreqTransport),
    Fake(FakeTransport),
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }

    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, AdapterError> {
        match self {
            Transport::Real(t) => t.get(url, query, headers),
            Transport::Fake(t) => t.get(url, query, headers),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(UreqTransport::new())
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}
