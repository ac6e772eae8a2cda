//! Response schemas
//!
//! Strict validators for the JSON the classifier and reranker must return.
//! Parsing is two-step: the fence-stripped text must be JSON at all
//! ([`ContractError::Parse`]), then it must have the expected shape
//! ([`ContractError::Schema`]).

use crate::llm::adapters::normalize::strip_code_fences;
use crate::llm::contracts::ContractError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Number of suggestions an invalid-industry verdict must carry
pub const SUGGESTION_COUNT: usize = 3;

/// Output of the correction call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub has_issues: bool,
    pub corrected_text: String,
    pub issues_found: Vec<String>,
}

/// Output of the validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub is_valid: bool,
    /// Exactly three alternatives when invalid, empty when valid
    pub suggestions: Vec<String>,
}

fn parse_json(raw: &str) -> Result<JsonValue, ContractError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| ContractError::Parse(e.to_string()))
}

fn expect_object(value: JsonValue) -> Result<Map<String, JsonValue>, ContractError> {
    match value {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(ContractError::Schema(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn require_bool(obj: &Map<String, JsonValue>, key: &str) -> Result<bool, ContractError> {
    match obj.get(key) {
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(other) => Err(ContractError::Schema(format!(
            "'{}' must be a boolean, got {}",
            key,
            kind_of(other)
        ))),
        None => Err(ContractError::Schema(format!("missing field '{}'", key))),
    }
}

fn require_string(obj: &Map<String, JsonValue>, key: &str) -> Result<String, ContractError> {
    match obj.get(key) {
        Some(JsonValue::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(ContractError::Schema(format!(
            "'{}' must be a string, got {}",
            key,
            kind_of(other)
        ))),
        None => Err(ContractError::Schema(format!("missing field '{}'", key))),
    }
}

fn string_array(value: &JsonValue, what: &str) -> Result<Vec<String>, ContractError> {
    let items = value.as_array().ok_or_else(|| {
        ContractError::Schema(format!("{} must be an array, got {}", what, kind_of(value)))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(|s| s.trim().to_string()).ok_or_else(|| {
                ContractError::Schema(format!(
                    "{}[{}] must be a string, got {}",
                    what,
                    i,
                    kind_of(item)
                ))
            })
        })
        .collect()
}

fn require_string_array(
    obj: &Map<String, JsonValue>,
    key: &str,
) -> Result<Vec<String>, ContractError> {
    match obj.get(key) {
        Some(value) => string_array(value, &format!("'{}'", key)),
        None => Err(ContractError::Schema(format!("missing field '{}'", key))),
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Parse and validate a correction response
pub fn parse_correction(raw: &str) -> Result<Correction, ContractError> {
    let obj = expect_object(parse_json(raw)?)?;
    let correction = Correction {
        has_issues: require_bool(&obj, "has_issues")?,
        corrected_text: require_string(&obj, "corrected_text")?,
        issues_found: require_string_array(&obj, "issues_found")?,
    };
    if correction.has_issues && correction.corrected_text.is_empty() {
        return Err(ContractError::Schema(
            "'corrected_text' is empty although has_issues is true".to_string(),
        ));
    }
    Ok(correction)
}

/// Parse and validate a validation response
///
/// A valid verdict drops any suggestions the model added anyway; an invalid
/// one must carry exactly three.
pub fn parse_validation(raw: &str) -> Result<Validation, ContractError> {
    let obj = expect_object(parse_json(raw)?)?;
    let is_valid = require_bool(&obj, "is_valid")?;
    let suggestions = match obj.get("suggestions") {
        Some(value) => string_array(value, "'suggestions'")?,
        None if is_valid => Vec::new(),
        None => return Err(ContractError::Schema("missing field 'suggestions'".to_string())),
    };

    if is_valid {
        return Ok(Validation {
            is_valid,
            suggestions: Vec::new(),
        });
    }

    if suggestions.len() != SUGGESTION_COUNT {
        return Err(ContractError::Schema(format!(
            "expected exactly {} suggestions, got {}",
            SUGGESTION_COUNT,
            suggestions.len()
        )));
    }
    if suggestions.iter().any(|s| s.is_empty()) {
        return Err(ContractError::Schema(
            "suggestions must not be empty strings".to_string(),
        ));
    }
    Ok(Validation {
        is_valid,
        suggestions,
    })
}

/// Parse and validate a reranker response (JSON array of titles)
pub fn parse_title_list(raw: &str) -> Result<Vec<String>, ContractError> {
    let value = parse_json(raw)?;
    string_array(&value, "response")
}
