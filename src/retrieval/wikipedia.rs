//! Wikipedia retriever
//!
//! Two MediaWiki API calls per query: a full-text search for candidate
//! titles, then one plain-text extract per title. Pages that vanish between
//! the two calls, or that have no text, are skipped.

use crate::llm::adapters::{SyncTransport, Transport};
use crate::retrieval::{truncate_chars, Document, DocumentRetriever, DocumentSet, RetrievalError};
use serde_json::Value as JsonValue;

/// English Wikipedia API endpoint
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const USER_AGENT: &str = concat!(
    "marketlens/",
    env!("CARGO_PKG_VERSION"),
    " (industry report generator)"
);

#[derive(Debug)]
pub struct WikipediaRetriever {
    base_url: String,
    transport: Transport,
}

impl WikipediaRetriever {
    pub fn new(base_url: String) -> Self {
        Self::with_transport(base_url, Transport::default())
    }

    pub fn with_transport(base_url: String, transport: Transport) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_get(&self, query: &[(&str, &str)]) -> Result<JsonValue, RetrievalError> {
        let body = self
            .transport
            .get(&self.base_url, query, &[("User-Agent", USER_AGENT)])?;
        let value: JsonValue =
            serde_json::from_str(&body).map_err(|e| RetrievalError::Malformed(e.to_string()))?;
        if let Some(error) = value.get("error") {
            let info = error
                .get("info")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown API error");
            return Err(RetrievalError::Malformed(format!("Wikipedia API error: {}", info)));
        }
        Ok(value)
    }

    /// Titles matching `query`, in search-rank order
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, RetrievalError> {
        let limit = limit.to_string();
        let value = self.api_get(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", &limit),
            ("format", "json"),
            ("formatversion", "2"),
        ])?;
        parse_search(&value)
    }

    /// Plain-text extract for one title, `None` when the page is missing
    pub fn fetch_page(&self, title: &str) -> Result<Option<Document>, RetrievalError> {
        let value = self.api_get(&[
            ("action", "query"),
            ("prop", "extracts|info"),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("redirects", "1"),
            ("titles", title),
            ("format", "json"),
            ("formatversion", "2"),
        ])?;
        parse_page(&value)
    }
}

impl DocumentRetriever for WikipediaRetriever {
    fn retrieve(
        &self,
        query: &str,
        max_documents: usize,
        max_chars: usize,
    ) -> Result<DocumentSet, RetrievalError> {
        let titles = self.search(query, max_documents)?;
        tracing::debug!(query, hits = titles.len(), "wikipedia search complete");

        let mut documents = Vec::with_capacity(titles.len());
        for title in titles.iter().take(max_documents) {
            match self.fetch_page(title)? {
                Some(mut doc) => {
                    doc.content = truncate_chars(&doc.content, max_chars).to_string();
                    documents.push(doc);
                }
                None => tracing::debug!(title = %title, "page has no extract, skipped"),
            }
        }

        tracing::info!(query, documents = documents.len(), "wikipedia retrieval complete");
        Ok(documents)
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

fn parse_search(value: &JsonValue) -> Result<Vec<String>, RetrievalError> {
    let hits = value
        .get("query")
        .and_then(|q| q.get("search"))
        .and_then(|s| s.as_array())
        .ok_or_else(|| RetrievalError::Malformed("missing query.search".to_string()))?;
    Ok(hits
        .iter()
        .filter_map(|hit| hit.get("title").and_then(|t| t.as_str()))
        .map(str::to_string)
        .collect())
}

fn parse_page(value: &JsonValue) -> Result<Option<Document>, RetrievalError> {
    let pages = value
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| RetrievalError::Malformed("missing query.pages".to_string()))?;

    let Some(page) = pages.first() else {
        return Ok(None);
    };
    if page.get("missing").is_some() || page.get("invalid").is_some() {
        return Ok(None);
    }

    let title = page.get("title").and_then(|v| v.as_str()).unwrap_or_default();
    let content = page.get("extract").and_then(|v| v.as_str()).unwrap_or_default();
    if title.is_empty() || content.trim().is_empty() {
        return Ok(None);
    }
    let source = page
        .get("fullurl")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")));

    Ok(Some(Document {
        title: title.to_string(),
        source,
        content: content.trim().to_string(),
    }))
}
