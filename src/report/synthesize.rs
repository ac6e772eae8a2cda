//! Report synthesis

use crate::llm::contracts::report_prompt;
use crate::llm::{ChainFailure, ChainReply, ModelChain};

/// Draft the report for `industry` from `sources`
///
/// The prompt asks for `min_words..=preferred_max` words and tolerates up
/// to `max_words`. Every model in
/// the chain is tried in order; failure of all of them is fatal.
pub fn synthesize(
    chain: &ModelChain,
    industry: &str,
    sources: &str,
    preferred_max: usize,
    min_words: usize,
    max_words: usize,
) -> Result<ChainReply, ChainFailure> {
    let prompt = report_prompt(industry, sources, preferred_max, min_words, max_words);
    chain.invoke("synthesize", &prompt)
}
