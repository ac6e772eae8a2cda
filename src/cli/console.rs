//! Interactive console
//!
//! Line-oriented front end: every line becomes a [`SessionEvent`] or a
//! console command, and every [`Outcome`] is rendered as plain text.

use crate::report::WordBand;
use crate::session::{CorrectionNotice, Outcome, Phase, Session, SessionEvent};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Quick-start examples shown at startup
pub const QUICK_START: &[&str] = &["AI", "EV", "Renewable Energy", "Pharmaceuticals", "Gaming"];

const HELP: &str = "\
Commands:
  <industry>     generate a report (e.g. \"Renewable Energy\")
  <number>       pick a suggestion
  /retry         repeat the step that failed
  /regen         generate a new report for the same industry
  /new           start over with a different industry
  /show          show the last report again
  /save [dir]    save the last report as markdown
  /help          this help
  /quit          exit";

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Event(SessionEvent),
    Save(Option<PathBuf>),
    Help,
    Quit,
    Empty,
}

/// Parse one input line
///
/// A bare number picks a suggestion only while suggestions are shown;
/// otherwise it is submitted as an industry like any other text.
pub fn parse_line(line: &str, awaiting_selection: bool) -> Result<ConsoleCommand, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ConsoleCommand::Empty);
    }

    if let Some(command) = trimmed.strip_prefix('/') {
        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let rest = parts.next().map(str::trim).filter(|r| !r.is_empty());
        return match name.as_str() {
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            "help" | "h" => Ok(ConsoleCommand::Help),
            "retry" => Ok(ConsoleCommand::Event(SessionEvent::Retry)),
            "regen" | "regenerate" => Ok(ConsoleCommand::Event(SessionEvent::Regenerate)),
            "new" => Ok(ConsoleCommand::Event(SessionEvent::TryDifferentInput)),
            "show" => Ok(ConsoleCommand::Event(SessionEvent::Show)),
            "save" => Ok(ConsoleCommand::Save(rest.map(PathBuf::from))),
            other => Err(format!("Unknown command: /{} (type /help)", other)),
        };
    }

    if awaiting_selection {
        if let Ok(number) = trimmed.parse::<usize>() {
            return match number {
                0 => Err("Suggestions are numbered from 1".to_string()),
                n => Ok(ConsoleCommand::Event(SessionEvent::ConfirmSuggestion(n - 1))),
            };
        }
    }

    Ok(ConsoleCommand::Event(SessionEvent::Submit(trimmed.to_string())))
}

fn render_correction<W: Write>(out: &mut W, notice: &Option<CorrectionNotice>) -> io::Result<()> {
    if let Some(notice) = notice {
        writeln!(out, "Auto-corrected: {} → {}", notice.original, notice.corrected)?;
    }
    Ok(())
}

/// Render an outcome; `band` decides the word-count verdict
pub fn render_outcome<W: Write>(out: &mut W, outcome: &Outcome, band: WordBand) -> io::Result<()> {
    match outcome {
        Outcome::Rejected(reason) => writeln!(out, "{}", reason),
        Outcome::NeedsSelection {
            candidate,
            suggestions,
            correction,
        } => {
            render_correction(out, correction)?;
            writeln!(out, "'{}' is not a recognized industry. Did you mean:", candidate)?;
            for (i, suggestion) in suggestions.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, suggestion)?;
            }
            writeln!(out, "Type a number to pick one, or /new to enter a different industry.")
        }
        Outcome::Report {
            report,
            correction,
            cached,
        } => {
            render_correction(out, correction)?;
            let artifact = &report.artifact;

            writeln!(out, "Top {} relevant Wikipedia pages:", report.documents.len())?;
            for (i, doc) in report.documents.iter().enumerate() {
                writeln!(out, "  {}. {} - {}", i + 1, doc.title, doc.source)?;
            }
            writeln!(out)?;
            if *cached {
                writeln!(out, "(cached report)")?;
            }
            writeln!(out, "{}", artifact.text)?;
            writeln!(out)?;

            if band.contains(artifact.word_count) {
                writeln!(out, "Word count: {} words", artifact.word_count)?;
            } else {
                writeln!(
                    out,
                    "Word count: {} words (target: {}-{})",
                    artifact.word_count, band.min, band.max
                )?;
            }
            if let Some(warning) = &artifact.warning {
                writeln!(out, "Warning: {}", warning)?;
            }
            writeln!(
                out,
                "Status: {} | Processing time: {:.2}s | Model used: {} | Sources analyzed: {}",
                artifact.status, artifact.processing_time, artifact.model_used, artifact.sources_analyzed
            )
        }
        Outcome::Reset => writeln!(out, "Enter a new industry."),
    }
}

fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Market Research Assistant")?;
    writeln!(out, "Generate professional industry reports from Wikipedia sources.")?;
    writeln!(out, "Quick start: {}", QUICK_START.join(", "))?;
    writeln!(out, "Type /help for commands.")
}

/// Run the console until `/quit` or end of input
pub fn run_console<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    save_dir: &Path,
) -> io::Result<()> {
    write_banner(out)?;
    let band = session.settings().band();
    let mut lines = input.lines();

    loop {
        write!(out, "\n> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let awaiting = matches!(session.phase(), Phase::AwaitingSelection { .. });

        let command = match parse_line(&line, awaiting) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match command {
            ConsoleCommand::Empty => writeln!(out, "Please enter an industry to continue.")?,
            ConsoleCommand::Help => writeln!(out, "{}", HELP)?,
            ConsoleCommand::Quit => break,
            ConsoleCommand::Save(dir) => {
                let dir = dir.as_deref().unwrap_or(save_dir);
                match session.export(dir) {
                    Ok(path) => writeln!(out, "Saved {}", path.display())?,
                    Err(err) => writeln!(out, "{}", err.user_message())?,
                }
            }
            ConsoleCommand::Event(event) => {
                if matches!(event, SessionEvent::Submit(_) | SessionEvent::Regenerate) {
                    writeln!(out, "Working...")?;
                    out.flush()?;
                }
                match session.handle(event) {
                    Ok(outcome) => render_outcome(out, &outcome, band)?,
                    Err(err) => {
                        writeln!(out, "Error: {}", err.user_message())?;
                        if err.is_llm_failure() {
                            writeln!(out, "Type /retry to try again.")?;
                        }
                    }
                }
            }
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}
