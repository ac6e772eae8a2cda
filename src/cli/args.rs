//! CLI argument parsing
//!
//! ```text
//! marketlens [options] [interactive | report <industry>... | check-key]
//! ```
//! With no subcommand the interactive console starts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "marketlens",
    version,
    about = "Industry reports from Wikipedia sources, written and checked by an LLM"
)]
pub struct Args {
    /// Config file (default: ./marketlens.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API key, overrides the config file
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for log files
    #[arg(long, global = true, default_value = "logs", value_name = "DIR")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Interactive console (default)
    Interactive {
        /// Skip the API key check at startup
        #[arg(long)]
        skip_key_check: bool,
    },

    /// Generate one report and exit
    Report {
        /// Industry name (several words are joined)
        #[arg(required = true, num_args = 1..)]
        industry: Vec<String>,

        /// Take suggestion N when the industry is not recognized
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(usize))]
        pick: Option<usize>,

        /// Save the markdown report into DIR
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Print the report and its metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the API key and exit
    CheckKey,
}

impl Args {
    /// Subcommand, defaulting to the interactive console
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Interactive {
            skip_key_check: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_empty_args_is_interactive() {
        let args = parse(&["marketlens"]);
        assert!(args.command.is_none());
        assert_eq!(
            args.command(),
            Command::Interactive {
                skip_key_check: false
            }
        );
        assert_eq!(args.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_parse_report_joins_words() {
        let args = parse(&[
            "marketlens",
            "report",
            "renewable",
            "energy",
            "--pick",
            "2",
            "--json",
        ]);
        match args.command() {
            Command::Report {
                industry,
                pick,
                json,
                out,
            } => {
                assert_eq!(industry.join(" "), "renewable energy");
                assert_eq!(pick, Some(2));
                assert!(json);
                assert!(out.is_none());
            }
            other => panic!("expected report, got {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = parse(&["marketlens", "check-key", "--config", "custom.toml", "-v"]);
        assert_eq!(args.command(), Command::CheckKey);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_report_requires_industry() {
        assert!(Args::try_parse_from(["marketlens", "report"]).is_err());
    }

    #[test]
    fn test_unknown_mode() {
        assert!(Args::try_parse_from(["marketlens", "plan"]).is_err());
    }
}
