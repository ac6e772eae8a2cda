//! CLI module
//!
//! Provides:
//! - Argument parsing (`interactive`, `report`, `check-key`)
//! - Session construction from configuration
//! - API key preflight
//! - The interactive console and one-shot report mode

pub mod args;
pub mod bootstrap;
pub mod console;
pub mod dispatch;
pub mod preflight;

// Re-exports
pub use args::{Args, Command};
pub use bootstrap::{build_session, load_config};
pub use console::{parse_line, render_outcome, run_console, ConsoleCommand};
pub use dispatch::{run_cli_mode, ExitCode};
pub use preflight::run_key_check;

use crate::config::ConfigError;
use crate::keycheck::KeyCheckError;
use crate::llm::AdapterError;
use crate::session::SessionError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot set up models: {0}")]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    KeyCheck(#[from] KeyCheckError),

    #[error("{}", .0.user_message())]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Input rejected or industry not recognized
pub const EXIT_INPUT_ERROR: i32 = 3;
pub const EXIT_KEY_ERROR: i32 = 4;

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Adapter(_) => EXIT_CONFIG_ERROR,
            Error::KeyCheck(_) => EXIT_KEY_ERROR,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
