//! Report artifact

use crate::llm::Attempt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the final word count was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// In band on the first draft
    Success,
    /// One trim call was issued
    Trimmed,
    /// One expand call was issued
    Expanded,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Success => "success",
            ReportStatus::Trimmed => "trimmed",
            ReportStatus::Expanded => "expanded",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final, cached output of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifact {
    /// Cleaned and sanitized markdown
    pub text: String,
    pub word_count: usize,
    pub status: ReportStatus,
    /// Model that produced `text`
    pub model_used: String,
    /// Seconds from retrieval start to the final text
    pub processing_time: f64,
    /// Set when the word count ended outside the band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Every model call made for this report
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    pub sources_analyzed: usize,
    pub generated_at: DateTime<Utc>,
}

impl ReportArtifact {
    /// File name for saving the report of `industry`
    pub fn file_name(industry: &str) -> String {
        format!("{}_report.md", industry.trim().replace(' ', "_"))
    }

    pub fn is_in_band(&self, min_words: usize, max_words: usize) -> bool {
        (min_words..=max_words).contains(&self.word_count)
    }
}
