//! LLM integration: adapters, fallback chain and prompt contracts
//!
//! - `adapters`  → provider HTTP clients behind one `generate(prompt)` call
//! - `chain`     → ordered fallback over several models
//! - `contracts` → prompt templates and strict JSON response schemas

pub mod adapters;
pub mod chain;
pub mod contracts;

// Re-export main types
pub use adapters::{Adapter, AdapterError, Diagnosis, LlmAdapter};
pub use chain::{Attempt, ChainFailure, ChainReply, ModelChain};
pub use contracts::{ContractError, Correction, Validation};
