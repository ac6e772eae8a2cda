//! Interactive console tests
//!
//! Feeds scripted lines to `run_console` and checks the rendered
//! transcript.

use clap::Parser;
use marketlens::cli::{run_console, Args, Command};
use marketlens::llm::adapters::stub::StubAdapter;
use marketlens::llm::{Adapter, AdapterError, ModelChain};
use marketlens::retrieval::fixed::FixedRetriever;
use marketlens::session::Session;
use std::io::Cursor;
use std::path::Path;

// Test helpers

fn report_of(words: usize) -> String {
    let mut text = String::from("# Report\n\n## Overview\n\n");
    text.push_str(&vec!["sector"; words - 4].join(" "));
    text
}

fn session(script: Vec<Result<String, AdapterError>>) -> Session {
    let retriever = FixedRetriever::from_file(Path::new("tests/fixtures/documents.json")).unwrap();
    Session::new(
        Adapter::from(StubAdapter::scripted(script)),
        ModelChain::single(StubAdapter::with_response(report_of(450)).named("report-model").into()),
        retriever.into(),
    )
}

fn ai_script() -> Vec<Result<String, AdapterError>> {
    vec![
        Ok(r#"{"has_issues": true, "corrected_text": "Artificial Intelligence", "issues_found": ["abbreviation expanded"]}"#.to_string()),
        Ok(r#"{"is_valid": true, "suggestions": []}"#.to_string()),
        Ok(r#"["Artificial intelligence", "Machine learning", "AI boom", "OpenAI", "Nvidia"]"#.to_string()),
    ]
}

fn transcript(session: &mut Session, input: &str, save_dir: &Path) -> String {
    let mut out = Vec::new();
    run_console(session, Cursor::new(input.to_string()), &mut out, save_dir).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// TEST A: Report flow
// =============================================================================

#[test]
fn test_a_report_show_and_save() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = session(ai_script());
    let input = format!("ai\n/show\n/save {}\n/quit\n", dir.path().display());

    let text = transcript(&mut session, &input, Path::new("unused"));

    assert!(text.starts_with("Market Research Assistant"));
    assert!(text.contains("Quick start: AI, EV, Renewable Energy"));
    assert!(text.contains("Working..."));
    assert!(text.contains("Auto-corrected: ai → Artificial Intelligence"));
    assert!(text.contains("Top 5 relevant Wikipedia pages:"));
    assert!(text.contains("  1. Artificial intelligence - https://en.wikipedia.org/wiki/Artificial_intelligence"));
    assert!(text.contains("Word count: 450 words\n"));
    assert!(text.contains("Status: success"));
    assert!(text.contains("Model used: report-model"));
    assert!(text.contains("Sources analyzed: 5"));
    assert!(text.contains("(cached report)"));
    assert!(text.contains("Saved "));
    assert!(text.trim_end().ends_with("Goodbye."));

    assert!(dir.path().join("Artificial_Intelligence_report.md").exists());
}

#[test]
fn test_a_save_uses_default_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = session(ai_script());

    transcript(&mut session, "ai\n/save\n", dir.path());
    assert!(dir.path().join("Artificial_Intelligence_report.md").exists());
}

// =============================================================================
// TEST B: Suggestions and input handling
// =============================================================================

#[test]
fn test_b_pick_suggestion_by_number() {
    let mut session = session(vec![
        Ok(r#"{"has_issues": false, "corrected_text": "Widgets", "issues_found": []}"#.to_string()),
        Ok(r#"{"is_valid": false, "suggestions": ["Manufacturing", "Retail", "Consumer Goods"]}"#.to_string()),
        Ok(r#"["Nvidia", "OpenAI", "AI boom", "Machine learning", "Artificial intelligence"]"#.to_string()),
    ]);

    let text = transcript(&mut session, "widgets\n0\n2\n/quit\n", Path::new("unused"));

    assert!(text.contains("'widgets' is not a recognized industry. Did you mean:"));
    assert!(text.contains("  3. Consumer Goods"));
    assert!(text.contains("Suggestions are numbered from 1"));
    assert!(!text.contains("Auto-corrected"));
    assert_eq!(session.latest_report().unwrap().industry, "Retail");
}

#[test]
fn test_b_rejections_and_unknown_commands() {
    let mut session = session(Vec::new());

    let text = transcript(&mut session, "\nab@#$%^&*!\n/plan\n/help\n", Path::new("unused"));

    assert!(text.contains("Please enter an industry to continue."));
    assert!(text.contains("mostly symbols"));
    assert!(text.contains("Unknown command: /plan"));
    assert!(text.contains("/regen"));
    // End of input behaves like /quit
    assert!(text.trim_end().ends_with("Goodbye."));
}

// =============================================================================
// TEST C: Errors
// =============================================================================

#[test]
fn test_c_llm_failure_offers_retry() {
    let mut session = session(vec![Err(AdapterError::Authentication(
        "API key not valid. Please pass a valid API key.".to_string(),
    ))]);

    let text = transcript(&mut session, "Gaming\n/quit\n", Path::new("unused"));

    assert!(text.contains("Error: Correction failed"));
    assert!(text.contains("Invalid API key"));
    assert!(text.contains("Type /retry to try again."));
}

#[test]
fn test_c_save_without_report() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = session(Vec::new());

    let text = transcript(&mut session, "/save\n", dir.path());
    assert!(text.contains("No report has been generated yet"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

// =============================================================================
// TEST D: Argument parsing
// =============================================================================

#[test]
fn test_d_report_subcommand() {
    let args = Args::try_parse_from([
        "marketlens",
        "--config",
        "custom.toml",
        "report",
        "renewable",
        "energy",
        "--json",
    ])
    .unwrap();

    match args.command() {
        Command::Report { industry, json, .. } => {
            assert_eq!(industry, vec!["renewable", "energy"]);
            assert!(json);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_d_default_is_interactive() {
    let args = Args::try_parse_from(["marketlens"]).unwrap();
    assert!(matches!(args.command(), Command::Interactive { .. }));
}
