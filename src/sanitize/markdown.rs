//! Markdown sanitizer
//!
//! Model output routinely leaves emphasis markers unbalanced and sneaks in
//! code formatting. This pass works line by line: headings are left alone;
//! every other line loses its code spans and backticks, and when a line has
//! an odd number of single `*` or `_` markers, every single marker is
//! dropped while `**bold**` survives.
//!
//! The output is a fixed point: sanitizing it again changes nothing.

use regex::Regex;
use std::sync::OnceLock;

// Private-use code points; they do not occur in model output
const BOLD_OPEN: &str = "\u{E000}";
const BOLD_CLOSE: &str = "\u{E001}";

fn code_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[\s\S]*?```").expect("valid regex"))
}

fn bold_star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"))
}

fn bold_underscore_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"__(.+?)__").expect("valid regex"))
}

/// Single markers left after discounting paired double markers
fn unpaired_markers(line: &str, single: char, double: &str) -> usize {
    let singles = line.matches(single).count();
    let doubles = line.matches(double).count();
    singles.saturating_sub(doubles * 2)
}

fn sanitize_line(line: &str) -> String {
    if line.trim_start().starts_with('#') {
        return line.to_string();
    }

    let without_blocks = code_block_re().replace_all(line, "");
    let mut fixed = without_blocks.replace('`', "");

    let stars = unpaired_markers(&fixed, '*', "**");
    let underscores = unpaired_markers(&fixed, '_', "__");

    if stars % 2 != 0 || underscores % 2 != 0 {
        let protected = bold_star_re().replace_all(&fixed, format!("{BOLD_OPEN}${{1}}{BOLD_CLOSE}"));
        let protected =
            bold_underscore_re().replace_all(&protected, format!("{BOLD_OPEN}${{1}}{BOLD_CLOSE}"));
        fixed = protected
            .replace(['*', '_'], "")
            .replace(BOLD_OPEN, "**")
            .replace(BOLD_CLOSE, "**");
    }

    fixed
}

/// Fix unbalanced emphasis and strip code formatting
pub fn sanitize_markdown(text: &str) -> String {
    text.split('\n')
        .map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
}
