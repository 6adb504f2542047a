//! Whitespace tokenizer for BM25 retrieval over prose contexts

/// Tokenizer that splits on Unicode whitespace and nothing else
///
/// Tokens keep their case and punctuation, so "Seattle?" and "Seattle" are
/// different terms. This matches the naive `split()` tokenization the
/// reranker uses, keeping retrieval and reranking on the same vocabulary.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl bm25::Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bm25::Tokenizer;

    #[test]
    fn test_splits_on_any_whitespace() {
        let tokenizer = WhitespaceTokenizer::new();
        let result = tokenizer.tokenize("Hike  in\tthe\nRocky Mountains");
        assert_eq!(result, vec!["Hike", "in", "the", "Rocky", "Mountains"]);
    }

    #[test]
    fn test_keeps_case_and_punctuation() {
        let tokenizer = WhitespaceTokenizer::new();
        let result = tokenizer.tokenize("Recommend a tour in Boston.");
        assert_eq!(result, vec!["Recommend", "a", "tour", "in", "Boston."]);
    }

    #[test]
    fn test_keeps_duplicates() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("a b a").len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(tokenizer.tokenize("   ").is_empty());
    }
}
