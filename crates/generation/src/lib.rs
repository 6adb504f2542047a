//! Answer generation and post-processing
//!
//! This crate wraps hosted language-model APIs behind the
//! [`GenerationClient`] trait, builds the answer prompt for a
//! (query, context) pair, and applies literal corrections to the answers.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use rageval_core::config::{Credentials, GenerationConfig};
use rageval_core::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

mod adapter;
mod client;
pub mod error;
mod gemini;
mod mock;
mod openai;
mod postprocess;
pub mod prompts;

pub use adapter::generate_answer;
pub use client::{Completion, GenerationClient, GenerationResponse};
pub use error::GenerationError;
pub use gemini::GeminiClient;
pub use mock::EchoGenerationClient;
pub use openai::OpenAiCompatibleClient;
pub use postprocess::post_process;

/// Create a generation client based on configuration
///
/// # Arguments
/// * `config` - Generation configuration including provider type
/// * `credentials` - API keys read at process start
pub fn create_generation_client(
    config: &GenerationConfig,
    credentials: &Credentials,
) -> Result<Arc<dyn GenerationClient>> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = required_key(credentials, "gemini")?;
            info!("Creating Gemini generation client");
            let client = GeminiClient::new(
                api_key,
                config.model.clone(),
                config.api_base_url.clone(),
                config.timeout_secs,
            )?;
            Ok(Arc::new(client))
        }
        provider @ ("openai" | "groq") => {
            let (label, default_base_url) = if provider == "openai" {
                ("openai", openai::OPENAI_API_BASE_URL)
            } else {
                ("groq", openai::GROQ_API_BASE_URL)
            };
            let api_key = required_key(credentials, label)?;
            info!("Creating {label} generation client");
            let client = OpenAiCompatibleClient::new(
                label,
                api_key,
                config.model.clone(),
                config
                    .api_base_url
                    .clone()
                    .unwrap_or_else(|| default_base_url.to_string()),
                config.timeout_secs,
            )?;
            Ok(Arc::new(client))
        }
        "mock" => {
            info!("Creating offline echo generation client");
            Ok(Arc::new(EchoGenerationClient::new()))
        }
        other => Err(Error::config(format!(
            "Unknown generation provider: '{other}'. Valid providers: gemini, openai, groq, mock"
        ))),
    }
}

fn required_key(credentials: &Credentials, provider: &str) -> Result<String> {
    credentials
        .require(provider)?
        .map(str::to_string)
        .ok_or_else(|| Error::config(format!("No API key variable known for '{provider}'")))
}
