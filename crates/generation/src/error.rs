//! Error types for answer generation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{provider} request failed ({kind}): {message}")]
    Request {
        provider: &'static str,
        kind: &'static str,
        message: String,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    #[error("Model returned no candidates")]
    NoCandidates,
}

impl From<GenerationError> for rageval_core::error::Error {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Config(msg) => rageval_core::error::Error::Config(msg),
            other => rageval_core::error::Error::Generation(other.to_string()),
        }
    }
}

/// Classify a reqwest failure for log and error messages
pub(crate) fn request_error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection"
    } else if err.is_request() {
        "request build"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rageval_core::Error;

    #[test]
    fn test_no_candidates_maps_to_generation_failure() {
        let err: Error = GenerationError::NoCandidates.into();
        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(err.to_string(), "Generation failed: Model returned no candidates");
    }

    #[test]
    fn test_config_maps_to_configuration_error() {
        let err: Error = GenerationError::Config("bad base url".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_api_error_message() {
        let err = GenerationError::Api {
            provider: "gemini",
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "gemini returned HTTP 429: quota");
    }
}
