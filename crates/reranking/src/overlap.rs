//! Token-overlap reranker

use crate::{Reranker, ScoredContext};
use rageval_core::error::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

/// Distinct whitespace-separated tokens of `text`
///
/// Case-sensitive and punctuation is kept: "Boston." and "Boston" are
/// different tokens.
pub fn token_set(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Fraction of the context's distinct tokens that also occur in the query
///
/// A context with no tokens scores 0.
pub fn overlap_score(query_tokens: &HashSet<&str>, context: &str) -> f64 {
    let context_tokens = token_set(context);
    if context_tokens.is_empty() {
        return 0.0;
    }
    let shared = context_tokens
        .iter()
        .filter(|token| query_tokens.contains(*token))
        .count();
    shared as f64 / context_tokens.len() as f64
}

/// Score every candidate against `query`, preserving input order
pub fn score_candidates<'a>(query: &str, candidates: &'a [String]) -> Vec<ScoredContext<'a>> {
    let query_tokens = token_set(query);
    candidates
        .iter()
        .map(|context| ScoredContext {
            context: context.as_str(),
            score: overlap_score(&query_tokens, context),
        })
        .collect()
}

/// Pick the highest-scoring candidate; the first one wins a tie
///
/// Fails with [`Error::EmptyCandidateSet`] when there is nothing to pick from.
pub fn select<'a>(query: &str, candidates: &'a [String]) -> Result<&'a str> {
    let scored = score_candidates(query, candidates);

    let mut best: Option<&ScoredContext<'a>> = None;
    for candidate in &scored {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }

    let best = best.ok_or(Error::EmptyCandidateSet)?;
    debug!(
        "Selected context with overlap {:.3} out of {} candidates",
        best.score,
        scored.len()
    );
    Ok(best.context)
}

/// Reranker that keeps the candidate with the highest token overlap
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapReranker;

impl OverlapReranker {
    pub fn new() -> Self {
        Self
    }
}

impl Reranker for OverlapReranker {
    fn select<'a>(&self, query: &str, candidates: &'a [String]) -> Result<&'a str> {
        select(query, candidates)
    }
}
