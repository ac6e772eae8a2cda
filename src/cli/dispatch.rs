//! CLI mode dispatch
//!
//! Dispatches to the handler of each subcommand:
//! - interactive: key preflight, then the console
//! - report: one-shot generation
//! - check-key: key validation only

use crate::cli::bootstrap::{build_session, load_config};
use crate::cli::console::{render_outcome, run_console};
use crate::cli::preflight::run_key_check;
use crate::cli::{Args, Command, Result, EXIT_INPUT_ERROR, EXIT_SUCCESS};
use crate::config::Config;
use crate::session::{Outcome, SessionEvent};
use std::io::{self, Write};
use std::path::Path;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Default directory for saved reports
const DEFAULT_SAVE_DIR: &str = "reports";

/// Run the selected mode and return the exit code
///
/// This is the main entry point for CLI mode dispatch.
/// Called from main() after argument parsing and logging setup.
pub fn run_cli_mode(args: Args) -> ExitCode {
    let result = load_config(&args).and_then(|config| run_mode(args.command(), &config));
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_mode(command: Command, config: &Config) -> Result<ExitCode> {
    match command {
        Command::Interactive { skip_key_check } => run_interactive(config, skip_key_check),
        Command::Report {
            industry,
            pick,
            out,
            json,
        } => run_report(config, &industry.join(" "), pick, out.as_deref(), json),
        Command::CheckKey => {
            run_key_check(config)?;
            println!("API key validated successfully.");
            Ok(EXIT_SUCCESS)
        }
    }
}

fn run_interactive(config: &Config, skip_key_check: bool) -> Result<ExitCode> {
    if !skip_key_check {
        println!("Validating API key...");
        run_key_check(config)?;
        println!("API key validated.");
    }

    let mut session = build_session(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_console(
        &mut session,
        stdin.lock(),
        &mut stdout,
        Path::new(DEFAULT_SAVE_DIR),
    )?;
    Ok(EXIT_SUCCESS)
}

fn run_report(
    config: &Config,
    industry: &str,
    pick: Option<usize>,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let mut session = build_session(config)?;
    let mut outcome = session.handle(SessionEvent::Submit(industry.to_string()))?;

    if let (Outcome::NeedsSelection { .. }, Some(n)) = (&outcome, pick) {
        if n == 0 {
            eprintln!("--pick counts from 1");
            return Ok(EXIT_INPUT_ERROR);
        }
        outcome = session.handle(SessionEvent::ConfirmSuggestion(n - 1))?;
    }

    let mut stdout = io::stdout();
    match &outcome {
        Outcome::Rejected(reason) => {
            eprintln!("{}", reason);
            return Ok(EXIT_INPUT_ERROR);
        }
        Outcome::NeedsSelection { .. } => {
            render_outcome(&mut stdout, &outcome, config.report.band())?;
            eprintln!("Re-run with --pick N to use a suggestion.");
            return Ok(EXIT_INPUT_ERROR);
        }
        Outcome::Report { report, .. } if json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(report)?)?;
        }
        Outcome::Report { .. } | Outcome::Reset => {
            render_outcome(&mut stdout, &outcome, config.report.band())?;
        }
    }

    if let Some(dir) = out_dir {
        let path = session.export(dir)?;
        eprintln!("Saved {}", path.display());
    }
    Ok(EXIT_SUCCESS)
}
