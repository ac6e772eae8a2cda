//! Session errors
//!
//! Error types for session operations.

use crate::llm::{ChainFailure, ContractError, Diagnosis};
use crate::retrieval::RetrievalError;

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Correction failed: {0}")]
    Correction(#[source] ContractError),

    #[error("Industry validation failed: {0}")]
    Validation(#[source] ContractError),

    #[error("Document retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Reranking failed: {0}")]
    Rerank(#[source] ContractError),

    #[error("Report generation failed: {0}")]
    Synthesis(#[from] ChainFailure),

    #[error("No documents found for '{industry}'")]
    NoDocuments { industry: String },

    #[error("'{event}' is not possible while {phase}")]
    UnexpectedEvent {
        event: &'static str,
        phase: &'static str,
    },

    #[error("No suggestion {} (there are {})", .index + 1, .available)]
    NoSuchSuggestion { index: usize, available: usize },

    #[error("No report has been generated yet")]
    NoReport,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Credential diagnosis for failures of LLM calls
    pub fn diagnosis(&self) -> Diagnosis {
        match self {
            SessionError::Correction(e) | SessionError::Validation(e) | SessionError::Rerank(e) => {
                e.diagnosis()
            }
            SessionError::Synthesis(f) => f.diagnosis(),
            _ => Diagnosis::Generic,
        }
    }

    /// True for failures of an LLM call (as opposed to local misuse)
    pub fn is_llm_failure(&self) -> bool {
        matches!(
            self,
            SessionError::Correction(_)
                | SessionError::Validation(_)
                | SessionError::Rerank(_)
                | SessionError::Synthesis(_)
        )
    }

    /// Message shown to the user
    pub fn user_message(&self) -> String {
        if !self.is_llm_failure() {
            return self.to_string();
        }
        match self.diagnosis() {
            Diagnosis::InvalidKey => format!(
                "{}\nInvalid API key or authentication failed. Check your API key.",
                self
            ),
            Diagnosis::QuotaExceeded => format!(
                "{}\nThe API key is valid but its quota is exceeded. Wait or use another key.",
                self
            ),
            Diagnosis::Generic => format!(
                "{}\nPlease verify your API key is valid and has sufficient quota.",
                self
            ),
        }
    }
}
