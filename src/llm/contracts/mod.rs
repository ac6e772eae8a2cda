//! LLM contracts
//!
//! Fixed prompt templates and the strict response schemas they promise.

pub mod prompts;
pub mod schema;

pub use prompts::{
    correction_prompt, expand_prompt, known_expansion, report_prompt, rerank_prompt, trim_prompt,
    validation_prompt, ABBREVIATIONS, CORRECTION_MARKER, EXPAND_MARKER, REPORT_MARKER,
    RERANK_MARKER, TRIM_MARKER, VAGUE_TERMS, VALIDATION_MARKER,
};
pub use schema::{parse_correction, parse_title_list, parse_validation, Correction, Validation};

use crate::llm::adapters::{AdapterError, Diagnosis};

/// Failure of a contracted (JSON-returning) LLM call
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The call itself failed
    #[error("transport failure: {0}")]
    Transport(#[from] AdapterError),

    /// The response is not JSON
    #[error("response is not valid JSON: {0}")]
    Parse(String),

    /// The response is JSON of the wrong shape
    #[error("response violates the expected schema: {0}")]
    Schema(String),
}

impl ContractError {
    pub fn diagnosis(&self) -> Diagnosis {
        match self {
            ContractError::Transport(err) => err.diagnosis(),
            _ => Diagnosis::Generic,
        }
    }
}
