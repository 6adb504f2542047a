//! Context reranking
//!
//! Given a query and its retrieved candidate contexts, picks the single
//! context handed to generation. The default strategy scores each candidate
//! by the fraction of its distinct tokens that also appear in the query.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use rageval_core::error::Result;

mod overlap;

pub use overlap::{overlap_score, score_candidates, select, token_set, OverlapReranker};

/// A candidate context together with its relevance score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredContext<'a> {
    pub context: &'a str,
    pub score: f64,
}

/// Trait for strategies that reduce a candidate set to one context
pub trait Reranker: Send + Sync {
    /// Return the best candidate for `query`
    ///
    /// The result is always one of `candidates`. An empty candidate set is an
    /// error, never an empty string.
    fn select<'a>(&self, query: &str, candidates: &'a [String]) -> Result<&'a str>;
}
