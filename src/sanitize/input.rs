//! Input meaningfulness check
//!
//! Runs on the raw user string before any network call.

/// Minimum characters and minimum alphabetic characters
const MIN_CHARS: usize = 2;
const MIN_LETTERS: usize = 2;
/// Minimum share of "plain" characters (alphanumeric, space, `-&,.`)
const MIN_PLAIN_RATIO: f64 = 0.5;

/// Why an input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputRejection {
    #[error("Please enter an industry to continue.")]
    Empty,

    #[error("The input is too short to be an industry name.")]
    TooShort,

    #[error("The input needs at least two letters.")]
    TooFewLetters,

    #[error("The input is mostly symbols; please describe an industry in words.")]
    MostlySymbols,
}

fn is_plain(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || matches!(c, '-' | '&' | ',' | '.')
}

/// Check `text`, returning the first rule it breaks
pub fn assess(text: &str) -> Result<(), InputRejection> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputRejection::Empty);
    }

    let total = trimmed.chars().count();
    if total < MIN_CHARS {
        return Err(InputRejection::TooShort);
    }

    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    if letters < MIN_LETTERS {
        return Err(InputRejection::TooFewLetters);
    }

    let plain = trimmed.chars().filter(|c| is_plain(*c)).count();
    if (plain as f64) / (total as f64) < MIN_PLAIN_RATIO {
        return Err(InputRejection::MostlySymbols);
    }

    Ok(())
}

/// True when `text` is worth sending to the classifier
pub fn is_meaningful(text: &str) -> bool {
    assess(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(assess(""), Err(InputRejection::Empty));
        assert_eq!(assess("   \t\n"), Err(InputRejection::Empty));
        assert!(!is_meaningful(""));
    }

    #[test]
    fn test_rejects_single_character() {
        assert_eq!(assess("a"), Err(InputRejection::TooShort));
        assert_eq!(assess("  x "), Err(InputRejection::TooShort));
    }

    #[test]
    fn test_rejects_symbols() {
        assert!(!is_meaningful("@#$%"));
        assert_eq!(assess("a1"), Err(InputRejection::TooFewLetters));
        assert_eq!(assess("ab@#$%^&*!"), Err(InputRejection::MostlySymbols));
    }

    #[test]
    fn test_accepts_industry_names() {
        assert!(is_meaningful("ai"));
        assert!(is_meaningful("EV"));
        assert!(is_meaningful("Food & Beverage"));
        assert!(is_meaningful("Oil, Gas and Mining."));
        assert!(is_meaningful("e-commerce"));
        assert!(is_meaningful("Énergie renouvelable"));
    }

    #[test]
    fn test_ratio_boundary() {
        // 2 plain of 4 = exactly half → accepted
        assert!(is_meaningful("ab#$"));
        // 2 plain of 5 → rejected
        assert!(!is_meaningful("ab#$%"));
    }
}
