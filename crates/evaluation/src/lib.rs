//! Evaluation batch assembly and scoring
//!
//! Pipeline outputs are zipped into [`EvaluationRecord`]s, laid out as an
//! [`EvaluationTable`] with the six columns the scoring service reads, and
//! sent to an [`EvaluationClient`] that returns a [`ScoreTable`].

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use rageval_core::config::{Credentials, EvaluationConfig};
use rageval_core::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

mod client;
pub mod error;
mod metrics;
mod mock;
mod record;
mod scores;
mod service;
mod table;

pub use client::EvaluationClient;
pub use error::EvaluationError;
pub use metrics::Metric;
pub use mock::StaticEvaluationClient;
pub use record::{assemble, assemble_with_contexts, EvaluationRecord};
pub use scores::ScoreTable;
pub use service::{RagasServiceClient, JUDGE_API_KEY_HEADER};
pub use table::{ColumnMapping, EvaluationRow, EvaluationTable, LOGICAL_FIELDS};

/// Create an evaluation client based on configuration
///
/// # Arguments
/// * `config` - Evaluation configuration including provider type
/// * `credentials` - API keys read at process start; the judge key is required
///   for the "ragas" provider
pub fn create_evaluation_client(
    config: &EvaluationConfig,
    credentials: &Credentials,
) -> Result<Arc<dyn EvaluationClient>> {
    match config.provider.as_str() {
        "ragas" => {
            let judge_api_key = credentials
                .require(&config.judge_provider)?
                .map(str::to_string);
            info!("Creating ragas scoring service client");
            let client = RagasServiceClient::new(
                config.api_base_url.clone(),
                config.judge_provider.clone(),
                config.judge_model.clone(),
                judge_api_key,
                config.embedding_model.clone(),
                config.timeout_secs,
            )?;
            Ok(Arc::new(client))
        }
        "mock" => {
            info!("Creating static evaluation client");
            Ok(Arc::new(StaticEvaluationClient::uniform(1.0)))
        }
        other => Err(Error::config(format!(
            "Unknown evaluation provider: '{other}'. Valid providers: ragas, mock"
        ))),
    }
}
