//! HTTP client for a ragas-compatible scoring service

use crate::client::EvaluationClient;
use crate::error::EvaluationError;
use crate::metrics::Metric;
use crate::scores::ScoreTable;
use crate::table::{ColumnMapping, EvaluationTable};
use async_trait::async_trait;
use rageval_core::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Header carrying the judge LLM key to the scoring service
pub const JUDGE_API_KEY_HEADER: &str = "x-judge-api-key";

#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    rows: Vec<Map<String, Value>>,
    metrics: &'a [Metric],
    column_map: HashMap<&'static str, &'a str>,
    llm: JudgeSpec<'a>,
    embeddings: EmbeddingSpec<'a>,
}

#[derive(Debug, Serialize)]
struct JudgeSpec<'a> {
    provider: &'a str,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbeddingSpec<'a> {
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EvaluateResponse {
    scores: Vec<HashMap<String, Option<f64>>>,
}

/// Turn the service's per-row score maps into a [`ScoreTable`]
///
/// A metric missing from a row is recorded as no value.
fn into_score_table(
    response: EvaluateResponse,
    metrics: &[Metric],
    expected_rows: usize,
) -> Result<ScoreTable> {
    if response.scores.len() != expected_rows {
        return Err(EvaluationError::RowCountMismatch {
            expected: expected_rows,
            actual: response.scores.len(),
        }
        .into());
    }

    let rows = response
        .scores
        .into_iter()
        .map(|row| {
            metrics
                .iter()
                .map(|metric| row.get(&metric.to_string()).copied().flatten())
                .collect()
        })
        .collect();

    ScoreTable::new(metrics.to_vec(), rows)
}

/// Client for `POST {base}/evaluate` on a ragas-compatible service
pub struct RagasServiceClient {
    client: Client,
    base_url: String,
    judge_provider: String,
    judge_model: String,
    judge_api_key: Option<String>,
    embedding_model: String,
}

impl fmt::Debug for RagasServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagasServiceClient")
            .field("base_url", &self.base_url)
            .field("judge_provider", &self.judge_provider)
            .field("judge_model", &self.judge_model)
            .field(
                "judge_api_key",
                &self.judge_api_key.as_ref().map(|_| "***REDACTED***"),
            )
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

impl RagasServiceClient {
    /// Create a new scoring service client
    ///
    /// # Arguments
    /// * `base_url` - Service root; `/evaluate` is appended
    /// * `judge_provider` - LLM backend the service should judge with
    /// * `judge_model` - Judge model name
    /// * `judge_api_key` - Key for the judge backend, forwarded per request
    /// * `embedding_model` - Embedding model for similarity metrics
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(
        base_url: String,
        judge_provider: String,
        judge_model: String,
        judge_api_key: Option<String>,
        embedding_model: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        info!("Initializing ragas scoring service client");
        info!("  Base URL: {base_url}");
        info!("  Judge: {judge_provider}/{judge_model}");
        info!("  Embedding model: {embedding_model}");
        info!("  Timeout: {timeout_secs}s");

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EvaluationError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            judge_provider,
            judge_model,
            judge_api_key,
            embedding_model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/evaluate", self.base_url)
    }
}

#[async_trait]
impl EvaluationClient for RagasServiceClient {
    async fn evaluate(
        &self,
        table: &EvaluationTable,
        metrics: &[Metric],
        mapping: &ColumnMapping,
    ) -> Result<ScoreTable> {
        let request = EvaluateRequest {
            rows: table.to_json_rows(mapping),
            metrics,
            column_map: mapping.pairs().into_iter().collect(),
            llm: JudgeSpec {
                provider: &self.judge_provider,
                model: &self.judge_model,
            },
            embeddings: EmbeddingSpec {
                model: &self.embedding_model,
            },
        };

        info!(
            "Scoring {} rows on {} metrics at {}",
            table.len(),
            metrics.len(),
            self.endpoint()
        );

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(ref key) = self.judge_api_key {
            builder = builder.header(JUDGE_API_KEY_HEADER, key);
        }

        let response = builder.send().await.map_err(|e| {
            let kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connection"
            } else if e.is_request() {
                "request build"
            } else {
                "unknown"
            };
            warn!("Scoring service request failed ({kind}): {e}");
            EvaluationError::Request {
                kind,
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(EvaluationError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| EvaluationError::Decode(e.to_string()))?;
        debug!("Raw scoring service response: {body}");

        let decoded: EvaluateResponse =
            serde_json::from_str(&body).map_err(|e| EvaluationError::Decode(e.to_string()))?;

        into_score_table(decoded, metrics, table.len())
    }
}
