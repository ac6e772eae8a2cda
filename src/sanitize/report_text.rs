//! Report text cleanup and word counting

use regex::Regex;
use std::sync::OnceLock;

fn annotation_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*\(?\s*\**\s*word\s+count").expect("valid regex"))
}

fn inline_annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\(?\s*word\s+count\s*:?\s*\d+\s*(?:words?)?\s*\)?").expect("valid regex")
    })
}

/// Remove word-count annotations the model added despite instructions
///
/// Lines that start with an annotation are dropped whole; annotations in
/// the middle of a line are cut out. Blank lines at both ends are removed,
/// everything else is left as it was.
pub fn clean_report_text(text: &str) -> String {
    let kept: Vec<String> = text
        .lines()
        .filter(|line| !annotation_line_re().is_match(line))
        .map(|line| {
            if inline_annotation_re().is_match(line) {
                inline_annotation_re()
                    .replace_all(line, "")
                    .trim_end()
                    .to_string()
            } else {
                line.to_string()
            }
        })
        .collect();

    let first = kept.iter().position(|l| !l.trim().is_empty());
    let last = kept.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => kept[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Number of whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_line_removed_entirely() {
        let text = "# Gaming Industry\n\n## Overview\n\nGames are big.\n\n(Word Count: 437 words)";
        assert_eq!(
            clean_report_text(text),
            "# Gaming Industry\n\n## Overview\n\nGames are big."
        );
    }

    #[test]
    fn test_annotation_variants() {
        assert_eq!(clean_report_text("Body\nWord Count: 412\nMore"), "Body\nMore");
        assert_eq!(clean_report_text("Body\n**Word count: 480 words**"), "Body");
        assert_eq!(clean_report_text("word count 455\nBody"), "Body");
    }

    #[test]
    fn test_inline_annotation_stripped() {
        assert_eq!(
            clean_report_text("The market grows fast. (Word Count: 99 words)"),
            "The market grows fast."
        );
    }

    #[test]
    fn test_other_lines_untouched() {
        let text = "# Title\n\n  Indented  line  \n\n**Bold** text with the word count idea";
        assert_eq!(clean_report_text(text), text);
    }

    #[test]
    fn test_trims_blank_edges_only() {
        assert_eq!(clean_report_text("\n\n  \n# T\n\nBody\n\n"), "# T\n\nBody");
        assert_eq!(clean_report_text("\n \n"), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("# Title\n\n## Overview  text\tmore"), 6);
    }
}
