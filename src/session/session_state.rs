//! Session driver
//!
//! Owns the phase, the caches and the collaborators, and runs the pipeline
//! steps an action calls for: correction → validation → retrieval →
//! rerank → synthesis → convergence. A failing step returns its error and
//! leaves caches untouched so the user can retry.

use crate::classify::{correct_industry, validate_industry};
use crate::llm::{Adapter, ModelChain};
use crate::report::{generate_report, ReportArtifact, ReportSettings};
use crate::rerank::rerank;
use crate::retrieval::{DocumentRetriever, RetrievalLimits, Retriever};
use crate::sanitize::InputRejection;
use crate::session::cache::{CachedReport, SessionCache};
use crate::session::phase::{next_action, Action, Phase, SessionEvent};
use crate::session::SessionError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// The correction applied to the user's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionNotice {
    pub original: String,
    pub corrected: String,
    pub issues: Vec<String>,
}

/// What the front end should render after an event
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Input failed the local check
    Rejected(InputRejection),
    /// The candidate is not a recognized industry
    NeedsSelection {
        candidate: String,
        suggestions: Vec<String>,
        correction: Option<CorrectionNotice>,
    },
    /// A report is available
    Report {
        report: CachedReport,
        correction: Option<CorrectionNotice>,
        /// Served from the cache without any call
        cached: bool,
    },
    /// Back to idle
    Reset,
}

/// One interactive session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    classifier: Adapter,
    report_chain: ModelChain,
    retriever: Retriever,
    limits: RetrievalLimits,
    settings: ReportSettings,
    phase: Phase,
    last_input: Option<String>,
    cache: SessionCache,
}

impl Session {
    pub fn new(classifier: Adapter, report_chain: ModelChain, retriever: Retriever) -> Self {
        Self {
            id: Uuid::new_v4(),
            classifier,
            report_chain,
            retriever,
            limits: RetrievalLimits::default(),
            settings: ReportSettings::default(),
            phase: Phase::Idle,
            last_input: None,
            cache: SessionCache::new(),
        }
    }

    pub fn with_limits(mut self, limits: RetrievalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// Latest generated report, if any
    pub fn latest_report(&self) -> Option<&CachedReport> {
        self.cache.latest_report()
    }

    /// Apply one event
    pub fn handle(&mut self, event: SessionEvent) -> Result<Outcome, SessionError> {
        let action = next_action(&self.phase, &event, self.last_input.as_deref())?;
        tracing::debug!(
            session = %self.id,
            event = event.name(),
            phase = self.phase.name(),
            ?action,
            "session event"
        );

        match action {
            Action::RejectInput(reason) => {
                tracing::info!(session = %self.id, %reason, "input rejected");
                Ok(Outcome::Rejected(reason))
            }
            Action::Validate { input } => {
                self.phase = Phase::Idle;
                self.last_input = Some(input.clone());
                self.classify(&input)
            }
            Action::Generate { industry, force } => self.generate(industry, force, None),
            Action::ServeCached { industry } => self.serve_cached(&industry),
            Action::Reset => {
                self.phase = Phase::Idle;
                self.last_input = None;
                self.cache.clear();
                Ok(Outcome::Reset)
            }
        }
    }

    fn classify(&mut self, input: &str) -> Result<Outcome, SessionError> {
        let correction = match self.cache.correction(input) {
            Some(cached) => {
                tracing::debug!(session = %self.id, input, "correction cache hit");
                cached.clone()
            }
            None => {
                let fresh =
                    correct_industry(&self.classifier, input).map_err(SessionError::Correction)?;
                self.cache.store_correction(input, fresh.clone());
                fresh
            }
        };

        let notice = correction.has_issues.then(|| CorrectionNotice {
            original: input.to_string(),
            corrected: correction.corrected_text.clone(),
            issues: correction.issues_found.clone(),
        });
        let candidate = correction.corrected_text;

        let validation = match self.cache.validation(&candidate) {
            Some(cached) => {
                tracing::debug!(session = %self.id, candidate = %candidate, "validation cache hit");
                cached.clone()
            }
            None => {
                let fresh = validate_industry(&self.classifier, &candidate)
                    .map_err(SessionError::Validation)?;
                self.cache.store_validation(&candidate, fresh.clone());
                fresh
            }
        };

        if validation.is_valid {
            return self.generate(candidate, false, notice);
        }

        self.phase = Phase::AwaitingSelection {
            candidate: candidate.clone(),
            suggestions: validation.suggestions.clone(),
        };
        Ok(Outcome::NeedsSelection {
            candidate,
            suggestions: validation.suggestions,
            correction: notice,
        })
    }

    fn generate(
        &mut self,
        industry: String,
        force: bool,
        correction: Option<CorrectionNotice>,
    ) -> Result<Outcome, SessionError> {
        self.phase = Phase::Confirmed {
            industry: industry.clone(),
            regenerate: force,
        };

        if !force {
            if let Some(report) = self.cache.report_for(&industry) {
                tracing::info!(session = %self.id, industry = %industry, "report cache hit");
                let report = report.clone();
                self.phase = Phase::Reported { industry };
                return Ok(Outcome::Report {
                    report,
                    correction,
                    cached: true,
                });
            }
        }

        tracing::info!(
            session = %self.id,
            industry = %industry,
            retriever = self.retriever.name(),
            force,
            "generating report"
        );
        let started = Instant::now();

        let documents = self.retriever.retrieve(
            &industry,
            self.limits.max_documents,
            self.limits.max_chars,
        )?;
        if documents.is_empty() {
            return Err(SessionError::NoDocuments { industry });
        }

        let documents = rerank(
            &self.classifier,
            &industry,
            documents,
            self.settings.rerank_policy(),
        )
        .map_err(SessionError::Rerank)?;

        let artifact = generate_report(
            &self.report_chain,
            &industry,
            &documents,
            &self.settings,
            started,
        )?;

        let report = CachedReport {
            industry: industry.clone(),
            documents,
            artifact,
        };
        self.cache.store_report(report.clone());
        self.phase = Phase::Reported { industry };

        Ok(Outcome::Report {
            report,
            correction,
            cached: false,
        })
    }

    fn serve_cached(&self, industry: &str) -> Result<Outcome, SessionError> {
        self.cache
            .report_for(industry)
            .cloned()
            .map(|report| Outcome::Report {
                report,
                correction: None,
                cached: true,
            })
            .ok_or(SessionError::NoReport)
    }

    /// Report for the confirmed industry, the one `Show` would serve
    pub fn current_report(&self) -> Option<&CachedReport> {
        self.phase
            .industry()
            .and_then(|industry| self.cache.report_for(industry))
    }

    /// Write the current report to `dir` as `<Industry_Name>_report.md`
    pub fn export(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let report = self.current_report().ok_or(SessionError::NoReport)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(ReportArtifact::file_name(&report.industry));
        std::fs::write(&path, &report.artifact.text)?;
        tracing::info!(session = %self.id, path = %path.display(), "report saved");
        Ok(path)
    }
}
