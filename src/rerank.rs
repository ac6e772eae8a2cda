//! Relevance reranker
//!
//! Asks the classifier model to pick and order the most relevant document
//! titles, then maps the answer back onto the retrieved documents.

use crate::llm::contracts::{parse_title_list, rerank_prompt};
use crate::llm::{ContractError, LlmAdapter};
use crate::retrieval::Document;
use serde::Deserialize;

/// How many documents to keep and when reranking is worth a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RerankPolicy {
    pub keep: usize,
    /// Smaller document sets are returned unchanged
    pub min_pool: usize,
}

impl Default for RerankPolicy {
    fn default() -> Self {
        Self {
            keep: 5,
            min_pool: 6,
        }
    }
}

/// Rerank `documents` for `industry`
///
/// Below `policy.min_pool` documents no call is made and the input comes
/// back as is. An answer naming none of the offered titles is a schema
/// violation.
pub fn rerank<A: LlmAdapter>(
    adapter: &A,
    industry: &str,
    documents: Vec<Document>,
    policy: RerankPolicy,
) -> Result<Vec<Document>, ContractError> {
    if documents.len() < policy.min_pool {
        tracing::debug!(
            documents = documents.len(),
            min_pool = policy.min_pool,
            "too few documents, rerank skipped"
        );
        return Ok(documents);
    }

    let titles: Vec<String> = documents.iter().map(|d| d.title.clone()).collect();
    let raw = adapter.generate(&rerank_prompt(industry, &titles, policy.keep))?;
    let selected = parse_title_list(&raw)?;

    let ranked = select_by_titles(documents, &selected, policy.keep);
    if ranked.is_empty() {
        return Err(ContractError::Schema(
            "none of the returned titles match a retrieved document".to_string(),
        ));
    }

    tracing::info!(
        industry,
        offered = titles.len(),
        returned = selected.len(),
        kept = ranked.len(),
        "rerank complete"
    );
    Ok(ranked)
}

/// Reorder `documents` to follow `titles`
///
/// Each title takes the first not-yet-taken document with exactly that
/// title; unknown titles are dropped and the result is cut to `keep`.
pub fn select_by_titles(documents: Vec<Document>, titles: &[String], keep: usize) -> Vec<Document> {
    let mut pool: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
    let mut ranked = Vec::with_capacity(keep.min(titles.len()));

    for title in titles {
        if ranked.len() == keep {
            break;
        }
        let hit = pool
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|d| &d.title == title));
        if let Some(doc) = hit.and_then(Option::take) {
            ranked.push(doc);
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::stub::StubAdapter;

    fn docs(titles: &[&str]) -> Vec<Document> {
        titles
            .iter()
            .map(|t| Document {
                title: t.to_string(),
                source: format!("https://en.wikipedia.org/wiki/{}", t.replace(' ', "_")),
                content: format!("About {}", t),
            })
            .collect()
    }

    fn titles_of(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_small_pool_is_identity_without_call() {
        let stub = StubAdapter::new();
        let input = docs(&["A", "B", "C", "D", "E"]);
        let out = rerank(&stub, "Gaming", input.clone(), RerankPolicy::default()).unwrap();
        assert_eq!(out, input);
        assert!(stub.call_log().is_empty());
    }

    #[test]
    fn test_response_order_preserved() {
        let stub = StubAdapter::with_response(r#"["F", "B", "D", "A", "C"]"#.to_string());
        let input = docs(&["A", "B", "C", "D", "E", "F", "G"]);
        let out = rerank(&stub, "Gaming", input, RerankPolicy::default()).unwrap();
        assert_eq!(titles_of(&out), vec!["F", "B", "D", "A", "C"]);
        assert_eq!(stub.call_log().len(), 1);
    }

    #[test]
    fn test_unknown_titles_dropped_and_truncated() {
        let stub = StubAdapter::with_response(
            r#"["X", "A", "B", "C", "D", "E", "F"]"#.to_string(),
        );
        let out = rerank(&stub, "Gaming", docs(&["A", "B", "C", "D", "E", "F"]), RerankPolicy::default())
            .unwrap();
        assert_eq!(titles_of(&out), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_duplicate_titles_take_first_match() {
        let mut input = docs(&["A", "A", "B"]);
        input[1].content = "second".to_string();
        let out = select_by_titles(input, &["A".to_string(), "A".to_string()], 5);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].content, "About A");
        assert_eq!(out[1].content, "second");
    }

    #[test]
    fn test_no_match_is_schema_error() {
        let stub = StubAdapter::with_response(r#"["Nothing", "Matches"]"#.to_string());
        let err = rerank(&stub, "Gaming", docs(&["A", "B", "C", "D", "E", "F"]), RerankPolicy::default())
            .unwrap_err();
        assert!(matches!(err, ContractError::Schema(_)));
    }

    #[test]
    fn test_prose_response_is_parse_error() {
        let stub = StubAdapter::with_response("The best pages are A and B.".to_string());
        let err = rerank(&stub, "Gaming", docs(&["A", "B", "C", "D", "E", "F"]), RerankPolicy::default())
            .unwrap_err();
        assert!(matches!(err, ContractError::Parse(_)));
    }
}
