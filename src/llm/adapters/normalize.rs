//! Response normalization
//!
//! Providers return completion text either as a plain string or as a
//! structured list of content parts. Everything downstream only wants text,
//! so both shapes are flattened here. Also hosts the code-fence stripping
//! applied before JSON contract parsing.

use serde_json::Value as JsonValue;

/// Extract text from a message `content` value.
///
/// Accepts:
/// - `"plain text"`
/// - `[{"type": "text", "text": "..."}, ...]` (OpenAI parts)
/// - `[{"text": "..."}, ...]` (Gemini parts)
/// - `["a", "b"]`
/// - `{"text": "..."}`
///
/// Returns `None` when no text is present.
pub fn content_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(parts) => {
            let text: String = parts.iter().filter_map(part_text).collect();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
        JsonValue::Object(_) => part_text(value).map(str::to_string),
        _ => None,
    }
}

fn part_text(part: &JsonValue) -> Option<&str> {
    match part {
        JsonValue::String(s) => Some(s.as_str()),
        JsonValue::Object(obj) => {
            // Thought parts carry reasoning, not the answer
            if obj.get("thought").and_then(|t| t.as_bool()) == Some(true) {
                return None;
            }
            obj.get("text").and_then(|t| t.as_str())
        }
        _ => None,
    }
}

/// Strip markdown code-fence artifacts around a JSON payload.
///
/// Removes ```` ```json ```` / ```` ``` ```` fences anywhere in the text and
/// bare backticks at either end.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim_matches(|c: char| c == '`' || c.is_whitespace())
        .to_string()
}
