//! Model chain
//!
//! An ordered list of adapters tried in sequence until one answers. Every
//! attempt is recorded (provider, model, elapsed time, error) so callers
//! can report which model produced the text and why earlier ones failed.

use crate::llm::adapters::{Adapter, AdapterError, Diagnosis, LlmAdapter};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One call against one model slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Pipeline stage that issued the call (e.g. "synthesize")
    pub stage: String,
    pub provider: String,
    pub model: String,
    pub elapsed_ms: u64,
    /// Error text when the call failed
    pub error: Option<String>,
}

impl Attempt {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Successful chain invocation
#[derive(Debug, Clone)]
pub struct ChainReply {
    pub text: String,
    /// Model that produced `text`
    pub model: String,
    /// All attempts made, including failed ones before the success
    pub attempts: Vec<Attempt>,
}

/// Every slot in the chain failed
#[derive(Debug, thiserror::Error)]
#[error("all {} model attempt(s) failed; last error: {last}", .attempts.len())]
pub struct ChainFailure {
    pub attempts: Vec<Attempt>,
    pub last: AdapterError,
}

impl ChainFailure {
    pub fn diagnosis(&self) -> Diagnosis {
        self.last.diagnosis()
    }
}

/// Ordered fallback list of model configurations
#[derive(Debug)]
pub struct ModelChain {
    slots: Vec<Adapter>,
}

impl ModelChain {
    pub fn new(slots: Vec<Adapter>) -> Self {
        Self { slots }
    }

    /// Chain with a single model (no fallback)
    pub fn single(adapter: Adapter) -> Self {
        Self {
            slots: vec![adapter],
        }
    }

    /// Model names in try order
    pub fn models(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.model()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Try each slot in order until one returns text
    pub fn invoke(&self, stage: &str, prompt: &str) -> Result<ChainReply, ChainFailure> {
        let mut attempts = Vec::with_capacity(self.slots.len());
        let mut last = AdapterError::Configuration("no models configured".to_string());

        for (index, slot) in self.slots.iter().enumerate() {
            let started = Instant::now();
            let result = slot.generate(prompt);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(text) => {
                    tracing::info!(
                        stage,
                        provider = slot.provider_name(),
                        model = slot.model(),
                        elapsed_ms,
                        fallback = index > 0,
                        "model call succeeded"
                    );
                    attempts.push(Attempt {
                        stage: stage.to_string(),
                        provider: slot.provider_name().to_string(),
                        model: slot.model().to_string(),
                        elapsed_ms,
                        error: None,
                    });
                    return Ok(ChainReply {
                        text,
                        model: slot.model().to_string(),
                        attempts,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        stage,
                        provider = slot.provider_name(),
                        model = slot.model(),
                        elapsed_ms,
                        error = %err,
                        remaining = self.slots.len() - index - 1,
                        "model call failed"
                    );
                    attempts.push(Attempt {
                        stage: stage.to_string(),
                        provider: slot.provider_name().to_string(),
                        model: slot.model().to_string(),
                        elapsed_ms,
                        error: Some(err.to_string()),
                    });
                    last = err;
                }
            }
        }

        Err(ChainFailure { attempts, last })
    }
}
