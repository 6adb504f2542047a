//! OpenAI-compatible chat completions client (OpenAI, Groq)

use crate::client::{Completion, GenerationClient, GenerationResponse};
use crate::error::GenerationError;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use rageval_core::error::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

pub(crate) const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const GROQ_API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat completions client for any OpenAI-compatible endpoint
pub struct OpenAiCompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    provider: &'static str,
}

impl OpenAiCompatibleClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `provider` - Provider label used in logs and errors ("openai", "groq")
    /// * `api_key` - Bearer token for the endpoint
    /// * `model` - Model name
    /// * `base_url` - API root including the version segment
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(
        provider: &'static str,
        api_key: String,
        model: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        info!("Initializing {provider} generation client");
        info!("  Model: {model}");
        info!("  Base URL: {base_url}");
        info!("  Timeout: {timeout_secs}s");

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::Config(format!("Failed to create HTTP client: {e}")))?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url)
            .with_api_key(api_key);
        let client = Client::with_config(openai_config).with_http_client(http_client);

        Ok(Self {
            client,
            model,
            provider,
        })
    }

    fn build_request(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> std::result::Result<CreateChatCompletionRequest, OpenAIError> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into();
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .max_completion_tokens(max_output_tokens)
            .build()
    }

    fn request_error(&self, err: OpenAIError) -> GenerationError {
        let kind = match &err {
            OpenAIError::Reqwest(e) if e.is_timeout() => "timeout",
            OpenAIError::Reqwest(e) if e.is_connect() => "connection",
            OpenAIError::Reqwest(_) => "http",
            OpenAIError::ApiError(_) => "api",
            OpenAIError::JSONDeserialize(_) => "decode",
            OpenAIError::InvalidArgument(_) => "invalid argument",
            _ => "unknown",
        };
        GenerationError::Request {
            provider: self.provider,
            kind,
            message: err.to_string(),
        }
    }
}

fn into_generation_response(response: CreateChatCompletionResponse) -> GenerationResponse {
    let candidates = response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .map(Completion::new)
        .collect();
    GenerationResponse { candidates }
}

#[async_trait]
impl GenerationClient for OpenAiCompatibleClient {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<GenerationResponse> {
        let request = self
            .build_request(prompt, max_output_tokens)
            .map_err(|e| self.request_error(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("{} chat completion failed: {e}", self.provider);
            self.request_error(e)
        })?;
        debug!("Raw {} response: {response:?}", self.provider);

        Ok(into_generation_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            "groq",
            "test-key".to_string(),
            "llama3-8b-8192".to_string(),
            GROQ_API_BASE_URL.to_string(),
            5,
        )
        .expect("client")
    }

    #[test]
    fn test_build_request_sets_limit_and_prompt() {
        let request = client().build_request("Question?", 50).expect("request");
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["max_completion_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Question?");
    }

    #[test]
    fn test_decode_keeps_choices_with_content() {
        let raw = serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "llama3-8b-8192",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": " Pike Place Market "},
                 "finish_reason": "stop", "logprobs": null},
                {"index": 1, "message": {"role": "assistant", "content": null},
                 "finish_reason": "length", "logprobs": null}
            ]
        });
        let response: CreateChatCompletionResponse =
            serde_json::from_value(raw).expect("decode");
        assert_eq!(
            into_generation_response(response),
            GenerationResponse::from_texts([" Pike Place Market "])
        );
    }
}
