//! Generation client trait and typed response

use async_trait::async_trait;
use rageval_core::error::Result;

/// One completion proposed by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Response of a generation call, decoded at the client boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub candidates: Vec<Completion>,
}

impl GenerationResponse {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: texts.into_iter().map(Completion::new).collect(),
        }
    }

    /// Text of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first().map(|c| c.text.as_str())
    }
}

/// Trait for hosted language-model backends
///
/// Implementations perform a single request per call. Retries, if any,
/// belong to the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate completions for `prompt`, bounded to `max_output_tokens`
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<GenerationResponse>;
}
