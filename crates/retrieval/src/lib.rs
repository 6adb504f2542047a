//! Lexical retrieval of candidate contexts
//!
//! This crate builds the candidate set handed to the reranker: a BM25 index
//! (from the `bm25` crate) over the dataset's ground-truth passages, queried
//! with the same naive whitespace tokenization the reranker uses.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod bm25_retriever;
mod whitespace_tokenizer;

pub use bm25_retriever::Bm25Retriever;
pub use whitespace_tokenizer::WhitespaceTokenizer;

// Re-export Tokenizer trait so callers can tokenize without depending on bm25
pub use bm25::Tokenizer;

use rageval_core::dataset::Dataset;

/// Trait for lexical retrievers producing a context candidate set
pub trait Retriever: Send + Sync {
    /// Return up to `n` contexts for `query`, best first
    fn retrieve(&self, query: &str, n: usize) -> Vec<String>;
}

/// Build a BM25 retriever over a dataset's flattened ground-truth contexts
pub fn retriever_for_dataset(dataset: &Dataset) -> Bm25Retriever {
    Bm25Retriever::new(dataset.corpus())
}
