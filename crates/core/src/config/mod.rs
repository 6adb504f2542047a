//! Configuration module for rageval
//!
//! Configuration is loaded from a TOML file and/or `RAGEVAL_` environment
//! variables. API keys never live here; see [`Credentials`].

mod credentials;
mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use credentials::{
    Credentials, GOOGLE_API_KEY_VAR, GROQ_API_KEY_VAR, OPENAI_API_KEY_VAR,
};

use defaults::*;

/// Valid generation backends
pub const GENERATION_PROVIDERS: [&str; 4] = ["gemini", "openai", "groq", "mock"];

/// Valid evaluation backends
pub const EVALUATION_PROVIDERS: [&str; 2] = ["ragas", "mock"];

/// Valid judge LLM backends forwarded to the evaluation service
pub const JUDGE_PROVIDERS: [&str; 3] = ["groq", "openai", "gemini"];

/// Returns the path to the global configuration file (`~/.rageval/config.toml`)
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".rageval").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Answer generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Lexical retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Evaluation service settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Ordered literal substitutions applied to generated answers
    #[serde(default = "default_corrections")]
    pub corrections: Vec<CorrectionRule>,
}

/// Configuration for the answer generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider type: "gemini", "openai", "groq" or "mock"
    #[serde(default = "default_generation_provider")]
    pub provider: String,

    /// Model name passed to the provider
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Override for the provider's API base URL
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Upper bound on generated tokens per answer
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

/// Configuration for BM25 candidate retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of candidate contexts handed to the reranker per query
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Configuration for the external evaluation collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Provider type: "ragas" (HTTP service) or "mock"
    #[serde(default = "default_evaluation_provider")]
    pub provider: String,

    /// Base URL of the ragas-compatible scoring service
    #[serde(default = "default_evaluation_api_base_url")]
    pub api_base_url: String,

    /// Metric identifiers to request
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    /// LLM backend the service should use as judge
    #[serde(default = "default_judge_provider")]
    pub judge_provider: String,

    /// Judge model name
    #[serde(default = "default_judge_model")]
    pub judge_model: String,

    /// Embedding model used by similarity metrics
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Request timeout in seconds (scoring a batch is slow)
    #[serde(default = "default_evaluation_timeout_secs")]
    pub timeout_secs: u64,
}

/// A single literal answer correction: every occurrence of `wrong` becomes `correct`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRule {
    pub wrong: String,
    pub correct: String,
}

impl CorrectionRule {
    pub fn new(wrong: impl Into<String>, correct: impl Into<String>) -> Self {
        Self {
            wrong: wrong.into(),
            correct: correct.into(),
        }
    }
}

// Default implementations

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_generation_provider(),
            model: default_generation_model(),
            api_base_url: None,
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            provider: default_evaluation_provider(),
            api_base_url: default_evaluation_api_base_url(),
            metrics: default_metrics(),
            judge_provider: default_judge_provider(),
            judge_model: default_judge_model(),
            embedding_model: default_embedding_model(),
            timeout_secs: default_evaluation_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            retrieval: RetrievalConfig::default(),
            evaluation: EvaluationConfig::default(),
            corrections: default_corrections(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !GENERATION_PROVIDERS.contains(&self.generation.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid generation provider '{}'. Must be one of: {:?}",
                self.generation.provider, GENERATION_PROVIDERS
            )));
        }

        if self.generation.max_output_tokens == 0 {
            return Err(Error::config(
                "generation.max_output_tokens must be greater than 0".to_string(),
            ));
        }

        if self.generation.timeout_secs == 0 {
            return Err(Error::config(
                "generation.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.top_n == 0 {
            return Err(Error::config(
                "retrieval.top_n must be greater than 0".to_string(),
            ));
        }

        if !EVALUATION_PROVIDERS.contains(&self.evaluation.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid evaluation provider '{}'. Must be one of: {:?}",
                self.evaluation.provider, EVALUATION_PROVIDERS
            )));
        }

        if !JUDGE_PROVIDERS.contains(&self.evaluation.judge_provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid judge provider '{}'. Must be one of: {:?}",
                self.evaluation.judge_provider, JUDGE_PROVIDERS
            )));
        }

        if self.evaluation.metrics.is_empty() {
            return Err(Error::config(
                "evaluation.metrics must name at least one metric".to_string(),
            ));
        }

        if let Some(unknown) = self
            .evaluation
            .metrics
            .iter()
            .find(|m| !DEFAULT_METRICS.contains(&m.as_str()))
        {
            return Err(Error::config(format!(
                "Unknown metric '{unknown}'. Must be one of: {DEFAULT_METRICS:?}"
            )));
        }

        if self.evaluation.timeout_secs == 0 {
            return Err(Error::config(
                "evaluation.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(rule) = self.corrections.iter().find(|r| r.wrong.is_empty()) {
            return Err(Error::config(format!(
                "Correction rule with empty 'wrong' phrase (correct = '{}')",
                rule.correct
            )));
        }

        Ok(())
    }
}
