//! Offline generation client for dry runs and tests

use crate::client::{GenerationClient, GenerationResponse};
use async_trait::async_trait;
use rageval_core::error::Result;

const CONTEXT_PREFIX: &str = "Context: ";

/// Client that answers with the context line of the prompt
///
/// Answers are cut to `max_output_tokens` whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoGenerationClient;

impl EchoGenerationClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationClient for EchoGenerationClient {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<GenerationResponse> {
        let context = prompt
            .lines()
            .find_map(|line| line.strip_prefix(CONTEXT_PREFIX))
            .unwrap_or(prompt);
        let answer = context
            .split_whitespace()
            .take(max_output_tokens as usize)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(GenerationResponse::from_texts([answer]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::answer_prompt;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_answers_with_context() {
        let prompt = answer_prompt("Suggest a nature hike.", "Hike in the Rocky Mountains");
        let response = EchoGenerationClient::new()
            .generate(&prompt, 50)
            .await
            .expect("generate");
        assert_eq!(response.first_text(), Some("Hike in the Rocky Mountains"));
    }

    #[tokio::test]
    async fn test_respects_output_limit() {
        let prompt = answer_prompt("q", "one two three four");
        let response = EchoGenerationClient::new()
            .generate(&prompt, 2)
            .await
            .expect("generate");
        assert_eq!(response.first_text(), Some("one two"));
    }
}
