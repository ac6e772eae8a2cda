//! Fixed document retriever
//!
//! Serves the same documents for every query, read from a JSON array of
//! `{title, source, content}` objects.

use crate::retrieval::{truncate_chars, Document, DocumentRetriever, DocumentSet, RetrievalError};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FixedRetriever {
    documents: Vec<Document>,
}

impl FixedRetriever {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load documents from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, RetrievalError> {
        let io_error = |message: String| RetrievalError::Io {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| io_error(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse documents from a JSON string
    pub fn from_json(content: &str) -> Result<Self, RetrievalError> {
        let documents: Vec<Document> = serde_json::from_str(content)
            .map_err(|e| RetrievalError::Malformed(e.to_string()))?;
        Ok(Self::new(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentRetriever for FixedRetriever {
    fn retrieve(
        &self,
        query: &str,
        max_documents: usize,
        max_chars: usize,
    ) -> Result<DocumentSet, RetrievalError> {
        tracing::debug!(query, available = self.documents.len(), "serving fixed documents");
        Ok(self
            .documents
            .iter()
            .take(max_documents)
            .map(|doc| Document {
                title: doc.title.clone(),
                source: doc.source.clone(),
                content: truncate_chars(&doc.content, max_chars).to_string(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_limits_and_truncates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
  {{"title": "Video game", "source": "https://en.wikipedia.org/wiki/Video_game", "content": "abcdef"}},
  {{"title": "Esports", "source": "https://en.wikipedia.org/wiki/Esports", "content": "xyz"}}
]"#
        )
        .unwrap();

        let retriever = FixedRetriever::from_file(file.path()).unwrap();
        assert_eq!(retriever.len(), 2);

        let docs = retriever.retrieve("Gaming", 1, 3).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Video game");
        assert_eq!(docs[0].content, "abc");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FixedRetriever::from_file(Path::new("/nonexistent/docs.json")).unwrap_err();
        assert!(matches!(err, RetrievalError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_malformed() {
        assert!(matches!(
            FixedRetriever::from_json("{\"title\": 1}"),
            Err(RetrievalError::Malformed(_))
        ));
    }
}
