//! Startup wiring
//!
//! Loads the configuration and assembles a [`Session`] from it.

use crate::cli::{Args, Result};
use crate::config::Config;
use crate::llm::adapters::{create_classifier, create_report_chain};
use crate::session::Session;

/// Load, override and validate the configuration named by `args`
pub fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    config.apply_overrides(args.api_key.as_deref());
    config.validate()?;
    tracing::debug!(
        provider = ?config.llm.provider,
        classifier = %config.llm.classifier_model,
        report_models = ?config.llm.report_models,
        retriever = ?config.retriever.kind,
        "configuration ready"
    );
    Ok(config)
}

/// Build a session from `config`
pub fn build_session(config: &Config) -> Result<Session> {
    let classifier = create_classifier(&config.llm)?;
    let report_chain = create_report_chain(&config.llm)?;
    let retriever = config.retriever.build(config.llm.timeout_secs)?;

    let session = Session::new(classifier, report_chain, retriever)
        .with_limits(config.retriever.limits())
        .with_settings(config.report.clone());
    tracing::info!(session = %session.id(), "session created");
    Ok(session)
}
