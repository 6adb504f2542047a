//! BM25 lexical retriever over an in-memory corpus

use crate::whitespace_tokenizer::WhitespaceTokenizer;
use crate::Retriever;
use bm25::{Embedder, EmbedderBuilder, Scorer, Tokenizer};
use std::cmp::Ordering;
use tracing::debug;

/// BM25 retriever over a fixed corpus of context passages
///
/// Documents are embedded once at construction with the `bm25` crate's
/// embedder and indexed by corpus position in a [`Scorer`]. Average document
/// length is computed from the corpus with the same whitespace tokenizer used
/// for queries.
pub struct Bm25Retriever {
    corpus: Vec<String>,
    embedder: Embedder<u32, WhitespaceTokenizer>,
    scorer: Scorer<usize, u32>,
}

impl Bm25Retriever {
    /// Index `corpus` for retrieval
    pub fn new(corpus: Vec<String>) -> Self {
        let avgdl = average_document_length(&corpus);
        let embedder = EmbedderBuilder::with_avgdl(avgdl)
            .tokenizer(WhitespaceTokenizer::new())
            .build();

        let mut scorer = Scorer::<usize, u32>::new();
        for (idx, document) in corpus.iter().enumerate() {
            scorer.upsert(&idx, embedder.embed(document));
        }

        debug!(
            "Indexed {} contexts for BM25 retrieval (avgdl = {avgdl:.2})",
            corpus.len()
        );

        Self {
            corpus,
            embedder,
            scorer,
        }
    }

    /// Number of indexed contexts
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// BM25 score of every corpus entry that shares a term with `query`,
    /// highest first; equal scores keep corpus order
    pub fn scored_matches(&self, query: &str) -> Vec<(usize, f32)> {
        let query_embedding = self.embedder.embed(query);
        let mut scored: Vec<(usize, f32)> = self
            .scorer
            .matches(&query_embedding)
            .into_iter()
            .map(|doc| (doc.id, doc.score))
            .collect();
        sort_scores_descending(&mut scored);
        scored
    }
}

impl Retriever for Bm25Retriever {
    /// Up to `n` contexts: BM25 matches first, then unmatched contexts in
    /// corpus order, so a non-empty corpus always yields `min(n, len)` results
    fn retrieve(&self, query: &str, n: usize) -> Vec<String> {
        let matches = self.scored_matches(query);
        debug!("BM25 matched {} of {} contexts", matches.len(), self.len());

        let mut taken = vec![false; self.corpus.len()];
        let mut ranked: Vec<usize> = Vec::with_capacity(self.corpus.len());
        for (idx, _) in matches {
            if let Some(flag) = taken.get_mut(idx) {
                if !*flag {
                    *flag = true;
                    ranked.push(idx);
                }
            }
        }
        ranked.extend((0..self.corpus.len()).filter(|idx| !taken[*idx]));

        ranked
            .into_iter()
            .take(n)
            .filter_map(|idx| self.corpus.get(idx).cloned())
            .collect()
    }
}

fn average_document_length(corpus: &[String]) -> f32 {
    let tokenizer = WhitespaceTokenizer::new();
    let total_tokens: usize = corpus.iter().map(|d| tokenizer.tokenize(d).len()).sum();
    if corpus.is_empty() || total_tokens == 0 {
        return 1.0;
    }
    total_tokens as f32 / corpus.len() as f32
}

/// Sort by score descending with NaN values at the end; ties keep input order
/// after a secondary sort on corpus position
fn sort_scores_descending(scored: &mut [(usize, f32)]) {
    scored.sort_by(|a, b| {
        let by_score = match (a.1.is_nan(), b.1.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        };
        by_score.then(a.0.cmp(&b.0))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn travel_corpus() -> Vec<String> {
        vec![
            "Visit the Space Needle and explore the Pike Place Market in Seattle".to_string(),
            "Hike in the Rocky Mountains and enjoy the stunning natural scenery".to_string(),
            "Discover the rich history of Boston with a Freedom Trail walking tour".to_string(),
        ]
    }

    #[test]
    fn test_distinct_term_ranks_its_document_first() {
        let retriever = Bm25Retriever::new(travel_corpus());
        let results = retriever.retrieve("Rocky Mountains hike", 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], travel_corpus()[1]);
    }

    #[test]
    fn test_unmatched_documents_fill_in_corpus_order() {
        let retriever = Bm25Retriever::new(travel_corpus());
        let results = retriever.retrieve("Boston", 3);
        assert_eq!(
            results,
            vec![
                travel_corpus()[2].clone(),
                travel_corpus()[0].clone(),
                travel_corpus()[1].clone(),
            ]
        );
    }

    #[test]
    fn test_no_match_returns_corpus_prefix() {
        let retriever = Bm25Retriever::new(travel_corpus());
        let results = retriever.retrieve("zzz", 2);
        assert_eq!(results, travel_corpus()[..2].to_vec());
    }

    #[test]
    fn test_n_larger_than_corpus() {
        let retriever = Bm25Retriever::new(travel_corpus());
        assert_eq!(retriever.retrieve("Seattle", 10).len(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        let retriever = Bm25Retriever::new(vec![]);
        assert!(retriever.is_empty());
        assert!(retriever.retrieve("anything", 3).is_empty());
    }

    #[test]
    fn test_scores_are_case_sensitive() {
        let retriever = Bm25Retriever::new(travel_corpus());
        assert!(retriever.scored_matches("seattle").is_empty());
        assert_eq!(retriever.scored_matches("Seattle").len(), 1);
    }

    #[test]
    fn test_sort_scores_descending_breaks_ties_by_position() {
        let mut scored = vec![(2, 0.5), (0, f32::NAN), (1, 0.5), (3, 0.9)];
        sort_scores_descending(&mut scored);
        let order: Vec<usize> = scored.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_average_document_length() {
        let corpus = vec!["a b".to_string(), "c d e f".to_string()];
        assert_eq!(average_document_length(&corpus), 3.0);
        assert_eq!(average_document_length(&[]), 1.0);
    }
}
