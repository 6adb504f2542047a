//! API credentials read once from the process environment

use crate::error::{Error, Result};

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// API keys for the hosted backends
///
/// Built once at process start and passed by reference to the clients that
/// need a key. Nothing downstream reads the environment directly.
#[derive(Clone, Default)]
pub struct Credentials {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "***REDACTED***");
        f.debug_struct("Credentials")
            .field("google_api_key", &redact(&self.google_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("groq_api_key", &redact(&self.groq_api_key))
            .finish()
    }
}

impl Credentials {
    /// Reads every known key from the environment; empty values count as unset
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds credentials from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            google_api_key: read(GOOGLE_API_KEY_VAR),
            openai_api_key: read(OPENAI_API_KEY_VAR),
            groq_api_key: read(GROQ_API_KEY_VAR),
        }
    }

    /// Name of the environment variable that holds the key for `provider`
    ///
    /// Returns `None` for providers that need no key (e.g. "mock").
    pub fn env_var_for(provider: &str) -> Option<&'static str> {
        match provider {
            "gemini" | "google" => Some(GOOGLE_API_KEY_VAR),
            "openai" => Some(OPENAI_API_KEY_VAR),
            "groq" => Some(GROQ_API_KEY_VAR),
            _ => None,
        }
    }

    /// Key for `provider`, or `None` when the provider needs no key
    pub fn key_for(&self, provider: &str) -> Option<&str> {
        match provider {
            "gemini" | "google" => self.google_api_key.as_deref(),
            "openai" => self.openai_api_key.as_deref(),
            "groq" => self.groq_api_key.as_deref(),
            _ => None,
        }
    }

    /// Key for `provider`, failing with a configuration error if it is required but unset
    pub fn require(&self, provider: &str) -> Result<Option<&str>> {
        match Self::env_var_for(provider) {
            None => Ok(None),
            Some(var) => self.key_for(provider).map(Some).ok_or_else(|| {
                Error::config(format!(
                    "{var} is not set (required by the '{provider}' provider)"
                ))
            }),
        }
    }
}
