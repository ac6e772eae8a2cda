//! MarketLens: industry reports from Wikipedia sources
//!
//! The pipeline checks the user's industry name locally, corrects and
//! validates it through a classifier model, retrieves and reranks
//! Wikipedia pages, and has a report model write a markdown report held to
//! a word band. Every step that needs judgment is an LLM call; this crate
//! is the state, caching, fallback and text handling around those calls.

pub mod classify;
pub mod cli;
pub mod config;
pub mod keycheck;
pub mod llm;
pub mod logging;
pub mod report;
pub mod rerank;
pub mod retrieval;
pub mod sanitize;
pub mod session;

// Re-export the pipeline surface
pub use config::{Config, ConfigError, Provider};
pub use report::{ReportArtifact, ReportSettings, ReportStatus};
pub use retrieval::{Document, DocumentRetriever, DocumentSet, Retriever};
pub use sanitize::{clean_report_text, is_meaningful, sanitize_markdown, word_count};
pub use session::{Outcome, Phase, Session, SessionError, SessionEvent};
