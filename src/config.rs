//! Configuration
//!
//! `marketlens.toml` with three tables: `[llm]`, `[retriever]` and
//! `[report]`. Every field has a default, so a missing file or table is
//! valid. `env:VAR` values are resolved when adapters are built.

use crate::llm::adapters::factory::resolve_env_var;
use crate::llm::adapters::transport::{Transport, UreqTransport};
use crate::report::ReportSettings;
use crate::retrieval::{
    FixedRetriever, RetrievalError, RetrievalLimits, Retriever, WikipediaRetriever,
    DEFAULT_MAX_CHARS, DEFAULT_TOP_K, WIKIPEDIA_API_URL,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "marketlens.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid config syntax: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot load documents: {0}")]
    Documents(#[from] RetrievalError),
}

/// LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Generative Language API
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint
    OpenAi,
    /// Scripted responses, no network
    Stub,
}

/// `[llm]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    /// Provider default when absent
    pub base_url: Option<String>,
    /// Literal key or `env:VAR`
    pub api_key: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Model for correction, validation and rerank
    pub classifier_model: String,
    /// Report models, primary first
    pub report_models: Vec<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            base_url: None,
            api_key: "env:GOOGLE_API_KEY".to_string(),
            temperature: 0.15,
            timeout_secs: 60,
            classifier_model: "gemma-3-27b-it".to_string(),
            report_models: vec![
                "gemini-2.5-flash-lite".to_string(),
                "gemini-2.0-flash-lite".to_string(),
            ],
        }
    }
}

impl LlmConfig {
    /// API key with `env:` references resolved
    pub fn resolved_api_key(&self) -> String {
        resolve_env_var(&self.api_key).trim().to_string()
    }
}

/// Document source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrieverKind {
    #[default]
    Wikipedia,
    /// Fixed JSON document file
    File,
}

/// `[retriever]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    pub kind: RetrieverKind,
    pub base_url: String,
    pub top_k: usize,
    pub max_chars: usize,
    /// Document file for `kind = "file"`
    pub path: Option<PathBuf>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            kind: RetrieverKind::Wikipedia,
            base_url: WIKIPEDIA_API_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            max_chars: DEFAULT_MAX_CHARS,
            path: None,
        }
    }
}

impl RetrieverConfig {
    pub fn limits(&self) -> RetrievalLimits {
        RetrievalLimits {
            max_documents: self.top_k,
            max_chars: self.max_chars,
        }
    }

    /// Build the configured retriever
    pub fn build(&self, timeout_secs: u64) -> Result<Retriever, ConfigError> {
        match self.kind {
            RetrieverKind::Wikipedia => Ok(Retriever::Wikipedia(WikipediaRetriever::with_transport(
                self.base_url.clone(),
                Transport::Real(UreqTransport::with_timeout(timeout_secs)),
            ))),
            RetrieverKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("retriever.path is required for kind = \"file\"".to_string())
                })?;
                Ok(Retriever::Fixed(FixedRetriever::from_file(path)?))
            }
        }
    }
}

/// Whole configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub retriever: RetrieverConfig,
    pub report: ReportSettings,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path`, or `marketlens.toml` in the working directory when no
    /// path is given. Only an explicit path has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Command-line overrides; a blank key is ignored
    pub fn apply_overrides(&mut self, api_key: Option<&str>) {
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            self.llm.api_key = key.to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let report = &self.report;

        if self.llm.classifier_model.trim().is_empty() {
            return invalid("llm.classifier_model must not be empty");
        }
        if self.llm.report_models.is_empty() {
            return invalid("llm.report_models needs at least one model");
        }
        if self.llm.report_models.iter().any(|m| m.trim().is_empty()) {
            return invalid("llm.report_models must not contain empty names");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return invalid("llm.temperature must be between 0 and 2");
        }
        if self.llm.timeout_secs == 0 {
            return invalid("llm.timeout_secs must be positive");
        }
        if self.retriever.top_k == 0 || self.retriever.max_chars == 0 {
            return invalid("retriever.top_k and retriever.max_chars must be positive");
        }
        if self.retriever.kind == RetrieverKind::File && self.retriever.path.is_none() {
            return invalid("retriever.path is required for kind = \"file\"");
        }
        if report.min_words == 0 || report.min_words > report.max_words {
            return invalid("report.min_words must be positive and not above report.max_words");
        }
        let band = report.band();
        if !band.contains(report.trim_target) || !band.contains(report.expand_target) {
            return invalid("report.trim_target and report.expand_target must lie inside the band");
        }
        if report.rerank_keep == 0 {
            return invalid("report.rerank_keep must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_tables() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.llm.provider, Provider::Gemini);
        assert_eq!(config.llm.classifier_model, "gemma-3-27b-it");
        assert_eq!(config.report.min_words, 400);
        assert_eq!(config.retriever.top_k, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = Config::from_toml_str(
            r#"
[llm]
provider = "openai"
report_models = ["gpt-4o-mini"]

[report]
max_words = 600
trim_target = 550
"#,
        )
        .unwrap();
        assert_eq!(config.llm.provider, Provider::OpenAi);
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.report.max_words, 600);
        assert_eq!(config.report.expand_target, 450);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = Config::from_toml_str("[llm]\nprovider = \"glm\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_catches_bad_band() {
        let mut config = Config::default();
        config.report.min_words = 600;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.trim_target = 520;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.report_models.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_override() {
        let mut config = Config::default();
        config.apply_overrides(Some("  AIzaOverride  "));
        assert_eq!(config.llm.api_key, "AIzaOverride");
        assert_eq!(config.llm.resolved_api_key(), "AIzaOverride");

        config.apply_overrides(Some("   "));
        assert_eq!(config.llm.api_key, "AIzaOverride");
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/marketlens.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marketlens.toml");
        std::fs::write(&path, "[retriever]\nkind = \"file\"\npath = \"docs.json\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.retriever.kind, RetrieverKind::File);
        assert_eq!(config.retriever.path, Some(PathBuf::from("docs.json")));
    }
}
