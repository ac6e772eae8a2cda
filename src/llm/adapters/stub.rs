//! Stub Adapter
//!
//! Testing adapter that returns scripted responses without network calls.
//! Replies are consumed in order; once the script runs out the default
//! response is returned. Every prompt is recorded in a shared call log.

use crate::llm::adapters::{AdapterError, LlmAdapter};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle on the prompts a [`StubAdapter`] received
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All prompts, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Number of prompts containing `marker`
    pub fn count_containing(&self, marker: &str) -> usize {
        self.guard().iter().filter(|p| p.contains(marker)).count()
    }
}

/// Stub adapter for testing (returns fake responses)
#[derive(Debug)]
pub struct StubAdapter {
    model: String,
    /// Response returned when the script is empty
    response: Option<String>,
    /// Error returned on every call (if set)
    error_message: Option<String>,
    script: Mutex<VecDeque<Result<String, AdapterError>>>,
    calls: CallLog,
}

impl StubAdapter {
    /// Create new stub adapter with default fake response
    pub fn new() -> Self {
        Self::with_response(Self::default_response())
    }

    /// Create stub adapter with custom response
    pub fn with_response(response: String) -> Self {
        Self {
            model: "stub-model".to_string(),
            response: Some(response),
            error_message: None,
            script: Mutex::new(VecDeque::new()),
            calls: CallLog::default(),
        }
    }

    /// Create stub adapter replaying `replies` in order, failing afterwards
    pub fn scripted(replies: Vec<Result<String, AdapterError>>) -> Self {
        Self {
            model: "stub-model".to_string(),
            response: None,
            error_message: None,
            script: Mutex::new(replies.into()),
            calls: CallLog::default(),
        }
    }

    /// Create stub adapter whose every call fails with a network error
    pub fn failing(message: &str) -> Self {
        Self {
            model: "stub-failing".to_string(),
            response: None,
            error_message: Some(message.to_string()),
            script: Mutex::new(VecDeque::new()),
            calls: CallLog::default(),
        }
    }

    /// Rename the model (distinguishes stubs in a fallback chain)
    pub fn named(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Handle on the prompt log (stays valid after the stub moves)
    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    /// Default fake response
    fn default_response() -> String {
        "stub response".to_string()
    }
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmAdapter for StubAdapter {
    fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        self.calls.guard().push(prompt.to_string());
        if let Some(ref msg) = self.error_message {
            return Err(AdapterError::Network(msg.clone()));
        }
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        match (scripted, &self.response) {
            (Some(reply), _) => reply,
            (None, Some(response)) => Ok(response.clone()),
            (None, None) => Err(AdapterError::Network(format!(
                "stub '{}' has no scripted reply left",
                self.model
            ))),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
