//! Report generation
//!
//! - `synthesize`  → first draft through the report model chain
//! - `convergence` → word-band check and the single corrective pass
//! - `artifact`    → the cached result handed to the front end

pub mod artifact;
pub mod convergence;
pub mod synthesize;

pub use artifact::{ReportArtifact, ReportStatus};
pub use convergence::{finalize_text, ConvergenceController, Converged, LengthState, WordBand};
pub use synthesize::synthesize;

use crate::llm::{ChainFailure, ModelChain};
use crate::rerank::RerankPolicy;
use crate::retrieval::{combined_text, Document};
use serde::Deserialize;
use std::time::Instant;

/// Word band and corrective-call settings (`[report]` config table)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub min_words: usize,
    pub max_words: usize,
    /// Upper bound asked for in the synthesis prompt, and the trim target
    pub trim_target: usize,
    pub expand_target: usize,
    /// Characters of source text passed to an expand call
    pub expand_source_chars: usize,
    pub rerank_keep: usize,
    pub rerank_min_pool: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            min_words: 400,
            max_words: 500,
            trim_target: 480,
            expand_target: 450,
            expand_source_chars: 2000,
            rerank_keep: 5,
            rerank_min_pool: 6,
        }
    }
}

impl ReportSettings {
    pub fn band(&self) -> WordBand {
        WordBand::new(self.min_words, self.max_words)
    }

    pub fn rerank_policy(&self) -> RerankPolicy {
        RerankPolicy {
            keep: self.rerank_keep,
            min_pool: self.rerank_min_pool,
        }
    }
}

/// Synthesize, converge and package the report for `industry`
///
/// `started` marks the beginning of the run (retrieval included) and feeds
/// the artifact's processing time.
pub fn generate_report(
    chain: &ModelChain,
    industry: &str,
    documents: &[Document],
    settings: &ReportSettings,
    started: Instant,
) -> Result<ReportArtifact, ChainFailure> {
    let sources = combined_text(documents);
    let draft = synthesize(
        chain,
        industry,
        &sources,
        settings.trim_target,
        settings.min_words,
        settings.max_words,
    )?;
    let draft_model = draft.model;
    let mut attempts = draft.attempts;

    let converged =
        ConvergenceController::new(chain, settings).converge(finalize_text(&draft.text), &sources);
    attempts.extend(converged.attempts);

    let artifact = ReportArtifact {
        text: converged.text,
        word_count: converged.word_count,
        status: converged.status,
        model_used: converged.corrected_by.unwrap_or(draft_model),
        processing_time: started.elapsed().as_secs_f64(),
        warning: converged.warning,
        attempts,
        sources_analyzed: documents.len(),
        generated_at: chrono::Utc::now(),
    };

    tracing::info!(
        industry,
        word_count = artifact.word_count,
        status = %artifact.status,
        model = %artifact.model_used,
        elapsed_secs = artifact.processing_time,
        "report generated"
    );
    Ok(artifact)
}
