//! Document retrieval
//!
//! A retriever turns an industry name into an ordered [`DocumentSet`]. The
//! production implementation queries Wikipedia; the fixed retriever serves
//! a JSON file and backs offline runs and tests.

pub mod fixed;
pub mod wikipedia;

pub use fixed::FixedRetriever;
pub use wikipedia::{WikipediaRetriever, WIKIPEDIA_API_URL};

use crate::llm::adapters::AdapterError;
use serde::{Deserialize, Serialize};

/// Default number of documents per query
pub const DEFAULT_TOP_K: usize = 10;
/// Default content length per document, in characters
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Per-query retrieval bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalLimits {
    pub max_documents: usize,
    pub max_chars: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            max_documents: DEFAULT_TOP_K,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// One reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    /// Page URL
    pub source: String,
    pub content: String,
}

/// Ordered documents, most relevant first
pub type DocumentSet = Vec<Document>;

/// Contents of every document separated by blank lines
pub fn combined_text(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Retrieval errors
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// The HTTP call failed
    #[error("retrieval request failed: {0}")]
    Transport(#[from] AdapterError),

    /// The payload did not have the expected shape
    #[error("malformed retrieval response: {0}")]
    Malformed(String),

    /// The document file could not be read
    #[error("cannot read documents from {path}: {message}")]
    Io { path: String, message: String },
}

/// Something that can look up documents for a query
pub trait DocumentRetriever {
    fn retrieve(
        &self,
        query: &str,
        max_documents: usize,
        max_chars: usize,
    ) -> Result<DocumentSet, RetrievalError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Retriever enum, one variant per source
#[derive(Debug)]
pub enum Retriever {
    Wikipedia(WikipediaRetriever),
    Fixed(FixedRetriever),
}

impl DocumentRetriever for Retriever {
    fn retrieve(
        &self,
        query: &str,
        max_documents: usize,
        max_chars: usize,
    ) -> Result<DocumentSet, RetrievalError> {
        match self {
            Retriever::Wikipedia(r) => r.retrieve(query, max_documents, max_chars),
            Retriever::Fixed(r) => r.retrieve(query, max_documents, max_chars),
        }
    }

    fn name(&self) -> &str {
        match self {
            Retriever::Wikipedia(r) => r.name(),
            Retriever::Fixed(r) => r.name(),
        }
    }
}

impl From<FixedRetriever> for Retriever {
    fn from(retriever: FixedRetriever) -> Self {
        Retriever::Fixed(retriever)
    }
}

impl From<WikipediaRetriever> for Retriever {
    fn from(retriever: WikipediaRetriever) -> Self {
        Retriever::Wikipedia(retriever)
    }
}
