//! Length convergence
//!
//! A drafted report is measured against the word band. In band it is
//! accepted as is; otherwise exactly one corrective call (trim or expand)
//! is made through the model chain. The controller never iterates: if the
//! corrective text is still out of band, or every model fails, the result
//! carries a warning instead.

use crate::llm::contracts::{expand_prompt, trim_prompt};
use crate::llm::{Attempt, ModelChain};
use crate::report::artifact::ReportStatus;
use crate::report::ReportSettings;
use crate::retrieval::truncate_chars;
use crate::sanitize::{clean_report_text, sanitize_markdown, word_count};

/// Inclusive word-count band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBand {
    pub min: usize,
    pub max: usize,
}

impl WordBand {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }

    pub fn classify(&self, count: usize) -> LengthState {
        if count > self.max {
            LengthState::NeedsTrim
        } else if count < self.min {
            LengthState::NeedsExpand
        } else {
            LengthState::Accepted
        }
    }
}

impl Default for WordBand {
    fn default() -> Self {
        Self::new(400, 500)
    }
}

/// Where a drafted report stands against the band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthState {
    Accepted,
    NeedsTrim,
    NeedsExpand,
}

/// Clean then sanitize one model output
pub fn finalize_text(raw: &str) -> String {
    sanitize_markdown(&clean_report_text(raw))
}

/// Result of the convergence step
#[derive(Debug, Clone)]
pub struct Converged {
    pub text: String,
    pub word_count: usize,
    pub status: ReportStatus,
    /// Model of the corrective call, when one succeeded
    pub corrected_by: Option<String>,
    pub attempts: Vec<Attempt>,
    pub warning: Option<String>,
}

pub struct ConvergenceController<'a> {
    chain: &'a ModelChain,
    settings: &'a ReportSettings,
}

impl<'a> ConvergenceController<'a> {
    pub fn new(chain: &'a ModelChain, settings: &'a ReportSettings) -> Self {
        Self { chain, settings }
    }

    /// Bring `draft` (already finalized) into the band
    ///
    /// `sources` is the full source text; only its first
    /// `expand_source_chars` characters go into an expand prompt.
    pub fn converge(&self, draft: String, sources: &str) -> Converged {
        let band = self.settings.band();
        let count = word_count(&draft);
        let state = band.classify(count);

        let (stage, status, prompt) = match state {
            LengthState::Accepted => {
                tracing::info!(word_count = count, "report in band");
                return Converged {
                    text: draft,
                    word_count: count,
                    status: ReportStatus::Success,
                    corrected_by: None,
                    attempts: Vec::new(),
                    warning: None,
                };
            }
            LengthState::NeedsTrim => (
                "trim",
                ReportStatus::Trimmed,
                trim_prompt(&draft, self.settings.trim_target, band.min, band.max),
            ),
            LengthState::NeedsExpand => (
                "expand",
                ReportStatus::Expanded,
                expand_prompt(
                    &draft,
                    truncate_chars(sources, self.settings.expand_source_chars),
                    self.settings.expand_target,
                    band.min,
                    band.max,
                ),
            ),
        };

        tracing::info!(word_count = count, stage, min = band.min, max = band.max, "report out of band");

        match self.chain.invoke(stage, &prompt) {
            Ok(reply) => {
                let text = finalize_text(&reply.text);
                let final_count = word_count(&text);
                let warning = (!band.contains(final_count)).then(|| {
                    format!(
                        "Report is {} words after the {} pass (target {}-{}).",
                        final_count, stage, band.min, band.max
                    )
                });
                if let Some(ref w) = warning {
                    tracing::warn!(word_count = final_count, stage, "{}", w);
                } else {
                    tracing::info!(word_count = final_count, stage, "report converged");
                }
                Converged {
                    text,
                    word_count: final_count,
                    status,
                    corrected_by: Some(reply.model),
                    attempts: reply.attempts,
                    warning,
                }
            }
            Err(failure) => {
                let warning = format!(
                    "Could not {} the report ({}); returning the {}-word draft (target {}-{}).",
                    stage, failure.last, count, band.min, band.max
                );
                tracing::warn!(word_count = count, stage, "{}", warning);
                Converged {
                    text: draft,
                    word_count: count,
                    status,
                    corrected_by: None,
                    attempts: failure.attempts,
                    warning: Some(warning),
                }
            }
        }
    }
}
