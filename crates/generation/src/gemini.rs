//! Google Gemini client over the Generative Language REST API

use crate::client::{Completion, GenerationClient, GenerationResponse};
use crate::error::{request_error_kind, GenerationError};
use async_trait::async_trait;
use rageval_core::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub(crate) const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROVIDER: &str = "gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Decode the wire response into completions
///
/// A candidate without any text part (for example one stopped by a safety
/// filter) is dropped. The remaining parts of a candidate are concatenated.
fn into_generation_response(response: GenerateContentResponse) -> GenerationResponse {
    let candidates = response
        .candidates
        .into_iter()
        .filter_map(|candidate| {
            let texts: Vec<String> = candidate
                .content
                .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
                .unwrap_or_default();
            if texts.is_empty() {
                debug!(
                    "Dropping Gemini candidate without text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                );
                return None;
            }
            Some(Completion::new(texts.concat()))
        })
        .collect();
    GenerationResponse { candidates }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"***REDACTED***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    /// * `api_key` - Google API key
    /// * `model` - Model name (e.g., "gemini-1.5-flash")
    /// * `base_url` - API root, defaults to the public v1beta endpoint
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(
        api_key: String,
        model: String,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let base_url = base_url
            .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        info!("Initializing Gemini generation client");
        info!("  Model: {model}");
        info!("  Base URL: {base_url}");
        info!("  Timeout: {timeout_secs}s");

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<GenerationResponse> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let kind = request_error_kind(&e);
                warn!("Gemini request failed ({kind}): {e}");
                GenerationError::Request {
                    provider: PROVIDER,
                    kind,
                    message: e.without_url().to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(GenerationError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.text().await.map_err(|e| GenerationError::Request {
            provider: PROVIDER,
            kind: request_error_kind(&e),
            message: e.without_url().to_string(),
        })?;
        debug!("Raw Gemini response: {body}");

        let decoded: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(into_generation_response(decoded))
    }
}
