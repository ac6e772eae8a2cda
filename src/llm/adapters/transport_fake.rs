//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls. Replies are either a
//! single body repeated forever or a scripted queue consumed in order;
//! every request is recorded for assertions.

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// One request seen by the fake transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Value of a query parameter, if sent
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a header, if sent (case-insensitive name)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Shared handle on the requests a [`FakeTransport`] has served
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

impl RequestLog {
    fn guard(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug, Default)]
pub struct FakeTransport {
    /// Response body returned once the script is exhausted
    pub response_body: Option<String>,
    /// Error message to return on every call (if set)
    pub error_message: Option<String>,
    script: Mutex<VecDeque<Result<String, AdapterError>>>,
    log: RequestLog,
}

impl FakeTransport {
    /// Create fake transport that always returns the given body
    pub fn new(response: &str) -> Self {
        Self {
            response_body: Some(response.to_string()),
            ..Self::default()
        }
    }

    /// Create fake transport that replays the given replies in order
    pub fn scripted(replies: Vec<Result<String, AdapterError>>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            error_message: Some(msg.to_string()),
            ..Self::default()
        }
    }

    /// Handle on the recorded requests (stays valid after the transport moves)
    pub fn request_log(&self) -> RequestLog {
        self.log.clone()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        body: &str,
    ) {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        };
        self.log.guard().push(RecordedRequest {
            method,
            url: url.to_string(),
            query: owned(query),
            headers: owned(headers),
            body: body.to_string(),
        });
    }

    fn next_reply(&self) -> Result<String, AdapterError> {
        if let Some(ref msg) = self.error_message {
            return Err(AdapterError::Network(msg.clone()));
        }
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        match (scripted, &self.response_body) {
            (Some(reply), _) => reply,
            (None, Some(body)) => Ok(body.clone()),
            (None, None) => Err(AdapterError::Network(
                "fake transport has no reply left".to_string(),
            )),
        }
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        self.record("POST", url, &[], headers, body);
        self.next_reply()
    }

    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, AdapterError> {
        self.record("GET", url, query, headers, "");
        self.next_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_transport_basic() {
        let transport = FakeTransport::new("test response");
        let result = transport.post_json("http://test", &[], "{}");
        assert_eq!(result.unwrap(), "test response");
        // Repeats forever
        let result = transport.post_json("http://test", &[], "{}");
        assert_eq!(result.unwrap(), "test response");
    }

    #[test]
    fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("test error");
        let result = transport.post_json("http://test", &[], "{}");
        assert!(matches!(result, Err(AdapterError::Network(_))));
    }

    #[test]
    fn test_fake_transport_script_in_order() {
        let transport = FakeTransport::scripted(vec![
            Ok("first".to_string()),
            Err(AdapterError::Http {
                status: 500,
                message: "boom".to_string(),
            }),
            Ok("third".to_string()),
        ]);
        assert_eq!(transport.get("http://a", &[], &[]).unwrap(), "first");
        assert!(transport.get("http://a", &[], &[]).is_err());
        assert_eq!(transport.get("http://a", &[], &[]).unwrap(), "third");
        assert!(transport.get("http://a", &[], &[]).is_err());
    }

    #[test]
    fn test_fake_transport_records_requests() {
        let transport = FakeTransport::new("{}");
        let log = transport.request_log();
        transport
            .get("http://wiki", &[("srsearch", "Gaming")], &[("User-Agent", "ua")])
            .unwrap();
        transport
            .post_json("http://llm", &[("Content-Type", "application/json")], "{\"a\":1}")
            .unwrap();

        let requests = log.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].query_value("srsearch"), Some("Gaming"));
        assert_eq!(requests[0].header_value("user-agent"), Some("ua"));
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].body, "{\"a\":1}");
    }
}
