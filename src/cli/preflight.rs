//! API key preflight
//!
//! Runs the three-tier key check before a session starts.

use crate::cli::Result;
use crate::config::Config;
use crate::keycheck::verify_api_key;
use crate::llm::adapters::create_classifier;

/// Verify the configured key with one live call through the classifier
pub fn run_key_check(config: &Config) -> Result<()> {
    let key = config.llm.resolved_api_key();
    let classifier = create_classifier(&config.llm)?;
    verify_api_key(config.llm.provider, &key, &classifier)?;
    Ok(())
}
