//! Prompt templates
//!
//! Fixed instruction templates for every LLM call in the pipeline. The
//! classifier prompts end with a strict JSON output contract that
//! `contracts::schema` enforces; the report prompts carry the word band.

/// Abbreviations always expanded by the correction step
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("AI", "Artificial Intelligence"),
    ("EV", "Electric Vehicles"),
    ("ML", "Machine Learning"),
    ("IoT", "Internet of Things"),
    ("SaaS", "Software as a Service"),
    ("FinTech", "Financial Technology"),
    ("EdTech", "Education Technology"),
    ("VR", "Virtual Reality"),
    ("AR", "Augmented Reality"),
    ("5G", "Fifth Generation Wireless Technology"),
];

/// Vague single words collapsed to a canonical industry name
pub const VAGUE_TERMS: &[(&[&str], &str)] = &[
    (&["car", "cars"], "Automotive Industry"),
    (&["food"], "Food and Beverage Industry"),
    (&["bank", "banks"], "Banking Industry"),
    (&["plane", "planes", "airplane"], "Aviation Industry"),
    (&["ship", "ships"], "Maritime Industry"),
    (&["hotel", "hotels"], "Hospitality Industry"),
    (&["movie", "movies", "film"], "Entertainment Industry"),
    (&["game", "games"], "Gaming Industry"),
    (&["drug", "drugs", "medicine"], "Pharmaceutical Industry"),
    (&["clothes", "clothing"], "Fashion Industry"),
    (&["house", "houses", "home", "homes"], "Real Estate Industry"),
    (&["oil", "gas"], "Energy Industry"),
    (&["farm", "farming"], "Agriculture Industry"),
];

/// Marker phrases identifying each prompt (also handy in tests)
pub const CORRECTION_MARKER: &str = "You check industry names for spelling";
pub const VALIDATION_MARKER: &str = "is a real, recognized industry";
pub const RERANK_MARKER: &str = "Wikipedia pages found for an industry report";
pub const REPORT_MARKER: &str = "You are a market research assistant";
pub const TRIM_MARKER: &str = "The following report is too long";
pub const EXPAND_MARKER: &str = "The following report is too short";

/// Canonical replacement for an exact table entry, if any.
///
/// Abbreviations match case-insensitively on the whole trimmed input;
/// multi-word input never matches a vague term.
pub fn known_expansion(input: &str) -> Option<&'static str> {
    let trimmed = input.trim();
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(trimmed))
        .map(|(_, full)| *full)
        .or_else(|| {
            VAGUE_TERMS
                .iter()
                .find(|(words, _)| words.iter().any(|w| w.eq_ignore_ascii_case(trimmed)))
                .map(|(_, canonical)| *canonical)
        })
}

fn abbreviation_lines() -> String {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, full)| format!("- {} → {}", abbr, full))
        .collect::<Vec<_>>()
        .join("\n")
}

fn vague_term_lines() -> String {
    VAGUE_TERMS
        .iter()
        .map(|(words, canonical)| format!("- {} → {}", words.join("/"), canonical))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grammar, typo and abbreviation correction
pub fn correction_prompt(text: &str) -> String {
    format!(
        r#"{marker} and grammar. Analyze this input: "{text}"

Look for:
1. Spelling mistakes or typos
2. Grammar issues
3. Capitalization errors
4. Industry name formatting
5. Abbreviations that should be written out in full
6. Very vague words that stand for an industry

Expand these abbreviations (and any other common industry abbreviation):
{abbreviations}

Convert these vague words (and any other very vague single word that clearly names an industry):
{vague}

IMPORTANT: Only convert very vague, simple words. Do NOT rewrite input that is already specific or that uses several words to describe an industry. For example "smartphone" is already a valid industry and stays as it is.

Respond ONLY with a JSON object in exactly this format, nothing else:
{{
    "has_issues": true or false,
    "corrected_text": "the corrected text (expanded, capitalized, formatted)",
    "issues_found": ["each issue found, e.g. 'abbreviation expanded', 'misspelled word', 'capitalization error', 'vague term converted to industry name'"]
}}

If nothing needs fixing and the input is neither an abbreviation nor a vague term, has_issues is false and issues_found is empty.
If the input is an abbreviation or a vague term, has_issues is true and issues_found names it."#,
        marker = CORRECTION_MARKER,
        text = text,
        abbreviations = abbreviation_lines(),
        vague = vague_term_lines(),
    )
}

/// Industry recognition check
pub fn validation_prompt(candidate: &str) -> String {
    format!(
        r#"Check whether "{candidate}" {marker}.

Respond ONLY with a JSON object in exactly this format, nothing else:
{{
    "is_valid": true or false,
    "suggestions": ["suggestion1", "suggestion2", "suggestion3"]
}}

If is_valid is true, suggestions is an empty list.
If is_valid is false, suggestions contains exactly 3 real, well-known industries similar or related to the input."#,
        candidate = candidate,
        marker = VALIDATION_MARKER,
    )
}

/// Relevance selection over retrieved page titles
pub fn rerank_prompt(industry: &str, titles: &[String], keep: usize) -> String {
    let title_list = serde_json::to_string_pretty(titles).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"You are selecting the most relevant {marker} on: {industry}

Titles:
{title_list}

Select the {keep} most relevant titles for a comprehensive industry report on {industry}, ordered from most to least relevant.

Respond ONLY with a JSON array of exactly {keep} titles, nothing else:
["title1", "title2", ...]

Copy the titles EXACTLY as listed above. Do not modify or paraphrase them."#,
        marker = RERANK_MARKER,
        industry = industry,
        title_list = title_list,
        keep = keep,
    )
}

/// Report synthesis with a hard word band
pub fn report_prompt(
    industry: &str,
    sources: &str,
    preferred_max: usize,
    min_words: usize,
    max_words: usize,
) -> String {
    format!(
        r#"CRITICAL REQUIREMENT - WORD COUNT: {min}-{pmax} words MAXIMUM. Never exceed it.
Up to {max} words is tolerated, but {max} words is an absolute ceiling.

{marker} for a large corporation.
Using only the Wikipedia sources below, write a professional industry report on: {industry}

The report must:
1. WORD COUNT: between {min} and {pmax} words (count as you write; shorter is better than longer)
2. Format: Markdown with one title (#) and section subtitles (##)
3. Content: overview, major players, trends, and challenges
4. NO report generation dates
5. NO word count anywhere in the report (no "Word Count:" or similar)
6. Professional corporate tone suitable for business executives
7. Based solely on the provided sources
8. FORMATTING: use **bold** only for emphasis on key terms. Do NOT use backticks (`) or code formatting. Do NOT use italics. Keep formatting clean and consistent

Sources:
{sources}

REMINDER: the report MUST be {min}-{pmax} words and MUST NOT state its word count.

Write the report now:"#,
        marker = REPORT_MARKER,
        industry = industry,
        sources = sources,
        min = min_words,
        pmax = preferred_max,
        max = max_words,
    )
}

/// Shorten an over-long report
pub fn trim_prompt(report: &str, target_words: usize, min_words: usize, max_words: usize) -> String {
    format!(
        r#"{marker}. Trim it to approximately {target} words (it MUST end up between {min} and {max} words).

Keep:
- The title and every section heading
- Key information and main points
- Professional tone and structure

Remove:
- Redundant details
- Less critical information
- Verbose phrasing

IMPORTANT:
- DO NOT include a word count (no "Word Count:" or similar text)
- DO NOT use backticks (`) or code formatting
- Use **bold** only for emphasis; no italics or code formatting

Report to trim:
{report}

Return the trimmed report in markdown, {target} words or fewer but at least {min} words. Do not state the word count:"#,
        marker = TRIM_MARKER,
        target = target_words,
        min = min_words,
        max = max_words,
        report = report,
    )
}

/// Lengthen a short report using source material
pub fn expand_prompt(
    report: &str,
    sources_excerpt: &str,
    target_words: usize,
    min_words: usize,
    max_words: usize,
) -> String {
    format!(
        r#"{marker}. Expand it to approximately {target} words (it MUST end up between {min} and {max} words).

Add detail from the sources about:
- Industry trends and developments
- Key players and their roles
- Challenges and opportunities
- Market dynamics

Keep:
- The existing structure and headings
- Professional tone
- Markdown formatting

IMPORTANT:
- DO NOT include a word count (no "Word Count:" or similar text)
- DO NOT use backticks (`) or code formatting
- Use **bold** only for emphasis; no italics or code formatting

Report to expand:
{report}

Additional sources to draw from:
{sources}

Return the expanded report in markdown, between {min} and {max} words. Do not state the word count:"#,
        marker = EXPAND_MARKER,
        target = target_words,
        min = min_words,
        max = max_words,
        report = report,
        sources = sources_excerpt,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_expansion_abbreviations() {
        assert_eq!(known_expansion("EV"), Some("Electric Vehicles"));
        assert_eq!(known_expansion("ai"), Some("Artificial Intelligence"));
        assert_eq!(known_expansion(" iot "), Some("Internet of Things"));
    }

    #[test]
    fn test_known_expansion_vague_terms() {
        assert_eq!(known_expansion("cars"), Some("Automotive Industry"));
        assert_eq!(known_expansion("Food"), Some("Food and Beverage Industry"));
    }

    #[test]
    fn test_known_expansion_leaves_specific_input() {
        assert_eq!(known_expansion("smartphone"), None);
        assert_eq!(known_expansion("electric cars"), None);
        assert_eq!(known_expansion("Renewable Energy"), None);
    }

    #[test]
    fn test_correction_prompt_embeds_input_and_table() {
        let prompt = correction_prompt("fintek");
        assert!(prompt.contains(CORRECTION_MARKER));
        assert!(prompt.contains("\"fintek\""));
        assert!(prompt.contains("- EV → Electric Vehicles"));
        assert!(prompt.contains("- car/cars → Automotive Industry"));
        assert!(prompt.contains("\"has_issues\""));
    }

    #[test]
    fn test_rerank_prompt_lists_titles_verbatim() {
        let titles = vec!["Video game".to_string(), "Esports".to_string()];
        let prompt = rerank_prompt("Gaming Industry", &titles, 5);
        assert!(prompt.contains("\"Video game\""));
        assert!(prompt.contains("exactly 5 titles"));
    }

    #[test]
    fn test_report_prompts_carry_band() {
        let prompt = report_prompt("Gaming", "source text", 480, 400, 500);
        assert!(prompt.contains("400-480 words"));
        assert!(prompt.contains("Up to 500 words is tolerated"));
        assert!(prompt.contains("source text"));

        let prompt = trim_prompt("long report", 480, 400, 500);
        assert!(prompt.starts_with(TRIM_MARKER));
        assert!(prompt.contains("approximately 480 words"));

        let prompt = expand_prompt("short report", "extra", 450, 400, 500);
        assert!(prompt.starts_with(EXPAND_MARKER));
        assert!(prompt.contains("extra"));
    }
}
