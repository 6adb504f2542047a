//! Error types for the evaluation collaborator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scoring service request failed ({kind}): {message}")]
    Request { kind: &'static str, message: String },

    #[error("Scoring service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode scoring service response: {0}")]
    Decode(String),

    #[error("Scoring service returned {actual} rows for {expected} submitted")]
    RowCountMismatch { expected: usize, actual: usize },
}

impl From<EvaluationError> for rageval_core::error::Error {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::Config(msg) => rageval_core::error::Error::Config(msg),
            other => rageval_core::error::Error::Evaluation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rageval_core::Error;

    #[test]
    fn test_row_count_mismatch_is_evaluation_error() {
        let err: Error = EvaluationError::RowCountMismatch {
            expected: 3,
            actual: 2,
        }
        .into();
        assert!(matches!(err, Error::Evaluation(_)));
        assert!(err.to_string().contains("2 rows for 3 submitted"));
    }
}
