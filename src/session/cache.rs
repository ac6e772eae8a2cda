//! Per-session result caches
//!
//! Classification results are keyed by the exact string they were computed
//! for; the report cache holds the latest report together with the
//! industry it belongs to.

use crate::llm::{Correction, Validation};
use crate::report::ReportArtifact;
use crate::retrieval::Document;
use serde::Serialize;
use std::collections::HashMap;

/// A generated report and the documents it was written from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedReport {
    pub industry: String,
    /// Reranked documents, most relevant first
    pub documents: Vec<Document>,
    pub artifact: ReportArtifact,
}

#[derive(Debug, Default)]
pub struct SessionCache {
    corrections: HashMap<String, Correction>,
    validations: HashMap<String, Validation>,
    report: Option<CachedReport>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correction(&self, input: &str) -> Option<&Correction> {
        self.corrections.get(input)
    }

    pub fn store_correction(&mut self, input: &str, correction: Correction) {
        self.corrections.insert(input.to_string(), correction);
    }

    pub fn validation(&self, candidate: &str) -> Option<&Validation> {
        self.validations.get(candidate)
    }

    pub fn store_validation(&mut self, candidate: &str, validation: Validation) {
        self.validations.insert(candidate.to_string(), validation);
    }

    /// Cached report, only if it was generated for `industry`
    pub fn report_for(&self, industry: &str) -> Option<&CachedReport> {
        self.report.as_ref().filter(|r| r.industry == industry)
    }

    /// Latest report regardless of industry
    pub fn latest_report(&self) -> Option<&CachedReport> {
        self.report.as_ref()
    }

    /// Replace the cached report
    pub fn store_report(&mut self, report: CachedReport) {
        self.report = Some(report);
    }

    pub fn clear(&mut self) {
        self.corrections.clear();
        self.validations.clear();
        self.report = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportStatus;

    fn cached(industry: &str) -> CachedReport {
        CachedReport {
            industry: industry.to_string(),
            documents: Vec::new(),
            artifact: ReportArtifact {
                text: "# Report".to_string(),
                word_count: 2,
                status: ReportStatus::Success,
                model_used: "stub-model".to_string(),
                processing_time: 0.1,
                warning: None,
                attempts: Vec::new(),
                sources_analyzed: 0,
                generated_at: chrono::Utc::now(),
            },
        }
    }

    #[test]
    fn test_report_keyed_by_industry() {
        let mut cache = SessionCache::new();
        cache.store_report(cached("Gaming"));
        assert!(cache.report_for("Gaming").is_some());
        assert!(cache.report_for("Retail").is_none());

        cache.store_report(cached("Retail"));
        assert!(cache.report_for("Gaming").is_none());
        assert_eq!(cache.latest_report().unwrap().industry, "Retail");
    }

    #[test]
    fn test_classification_keys_are_exact() {
        let mut cache = SessionCache::new();
        cache.store_validation(
            "Gaming",
            Validation {
                is_valid: true,
                suggestions: Vec::new(),
            },
        );
        assert!(cache.validation("Gaming").is_some());
        assert!(cache.validation("gaming").is_none());

        cache.clear();
        assert!(cache.validation("Gaming").is_none());
    }
}
