//! Turns a (query, context) pair into one generated answer

use crate::client::GenerationClient;
use crate::error::GenerationError;
use crate::prompts::answer_prompt;
use rageval_core::error::Result;
use tracing::debug;

/// Ask `client` to answer `query` from `context`
///
/// Returns the first candidate's text with surrounding whitespace trimmed.
/// A client failure is passed through unchanged, and a response without
/// candidates is a generation failure. Nothing is retried.
pub async fn generate_answer(
    query: &str,
    context: &str,
    client: &dyn GenerationClient,
    max_output_tokens: u32,
) -> Result<String> {
    let prompt = answer_prompt(query, context);
    let response = client.generate(&prompt, max_output_tokens).await?;
    debug!("Generation response: {response:?}");

    let text = response.first_text().ok_or(GenerationError::NoCandidates)?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GenerationResponse, MockGenerationClient};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use rageval_core::Error;

    const EXPECTED_PROMPT: &str = "Answer the question based on the following context:\n\
                                   Context: Visit the Space Needle\n\
                                   Question: Top attractions in Seattle?";

    #[tokio::test]
    async fn test_sends_prompt_and_limit_and_trims_first_candidate() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .with(eq(EXPECTED_PROMPT), eq(50u32))
            .times(1)
            .returning(|_, _| {
                Ok(GenerationResponse::from_texts([
                    "  The Space Needle.\n",
                    "ignored second candidate",
                ]))
            });

        let answer = generate_answer(
            "Top attractions in Seattle?",
            "Visit the Space Needle",
            &client,
            50,
        )
        .await
        .expect("generate");

        assert_eq!(answer, "The Space Needle.");
    }

    #[tokio::test]
    async fn test_no_candidates_is_generation_failure() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok(GenerationResponse::default()));

        let result = generate_answer("q", "c", &client, 50).await;
        assert!(matches!(result, Err(Error::Generation(_))));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .times(1)
            .returning(|_, _| Err(Error::generation("HTTP 503")));

        let err = generate_answer("q", "c", &client, 50).await.unwrap_err();
        assert_eq!(err.to_string(), "Generation failed: HTTP 503");
    }

    #[tokio::test]
    async fn test_whitespace_only_candidate_yields_empty_answer() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .returning(|_, _| Ok(GenerationResponse::from_texts(["   "])));

        let answer = generate_answer("q", "c", &client, 50).await.expect("generate");
        assert_eq!(answer, "");
    }
}
