//! Prompted classifier
//!
//! Two contracted calls against the classifier model: correction of the raw
//! input, then validation of the corrected candidate. Neither call is
//! retried; any failure is returned to the caller as a [`ContractError`].

use crate::llm::contracts::{
    correction_prompt, known_expansion, parse_correction, parse_validation, validation_prompt,
    ABBREVIATIONS,
};
use crate::llm::{ContractError, Correction, LlmAdapter, Validation};

/// Run the correction call for `text`
///
/// Exact abbreviation and vague-term table hits are reconciled after the
/// call, so `"EV"` always yields `Electric Vehicles` with `has_issues` set
/// whatever the model answered. Without issues, `corrected_text` is the
/// trimmed input.
pub fn correct_industry<A: LlmAdapter>(adapter: &A, text: &str) -> Result<Correction, ContractError> {
    let raw = adapter.generate(&correction_prompt(text))?;
    let mut correction = parse_correction(&raw)?;

    if let Some(canonical) = known_expansion(text) {
        if !correction.has_issues || correction.corrected_text != canonical {
            tracing::debug!(
                input = text,
                model_text = %correction.corrected_text,
                canonical,
                "table entry overrides model correction"
            );
        }
        correction.has_issues = true;
        correction.corrected_text = canonical.to_string();
        if correction.issues_found.is_empty() {
            correction.issues_found.push(table_issue(text).to_string());
        }
    } else if !correction.has_issues {
        correction.corrected_text = text.trim().to_string();
        correction.issues_found.clear();
    }

    tracing::info!(
        input = text,
        corrected = %correction.corrected_text,
        has_issues = correction.has_issues,
        "correction complete"
    );
    Ok(correction)
}

fn table_issue(text: &str) -> &'static str {
    let trimmed = text.trim();
    if ABBREVIATIONS
        .iter()
        .any(|(abbr, _)| abbr.eq_ignore_ascii_case(trimmed))
    {
        "abbreviation expanded"
    } else {
        "vague term converted to industry name"
    }
}

/// Run the validation call for `candidate`
pub fn validate_industry<A: LlmAdapter>(
    adapter: &A,
    candidate: &str,
) -> Result<Validation, ContractError> {
    let raw = adapter.generate(&validation_prompt(candidate))?;
    let validation = parse_validation(&raw)?;
    tracing::info!(
        candidate,
        is_valid = validation.is_valid,
        suggestions = validation.suggestions.len(),
        "validation complete"
    );
    Ok(validation)
}
