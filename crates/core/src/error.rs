use std::fmt;
use thiserror::Error;

/// Result type for rageval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage a per-query failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieval,
    Rerank,
    Generation,
    PostProcess,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Retrieval => "retrieval",
            Self::Rerank => "rerank",
            Self::Generation => "generation",
            Self::PostProcess => "post-process",
        };
        f.write_str(name)
    }
}

/// Main error type for rageval operations
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing credential or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reranker was handed zero candidate contexts
    #[error("Cannot select a context from an empty candidate set")]
    EmptyCandidateSet,

    /// Generation collaborator failed or returned no candidates
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Evaluation batch inputs have different lengths
    #[error(
        "Shape mismatch: queries={queries}, ground_truth_contexts={ground_truth_contexts}, \
         ground_truth_answers={ground_truth_answers}, selected_contexts={selected_contexts}, \
         processed_answers={processed_answers}"
    )]
    ShapeMismatch {
        queries: usize,
        ground_truth_contexts: usize,
        ground_truth_answers: usize,
        selected_contexts: usize,
        processed_answers: usize,
    },

    /// Evaluation collaborator failed
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Dataset could not be loaded or is malformed
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// A single query failed somewhere in the pipeline, aborting the run
    #[error("Query {query_index} failed during {stage}: {source}")]
    Stage {
        stage: Stage,
        query_index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a generation error
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Creates an evaluation error
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Creates a dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Tags an error with the stage and query it came from
    pub fn at_stage(stage: Stage, query_index: usize, source: Error) -> Self {
        Self::Stage {
            stage,
            query_index,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through any stage wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension trait for tagging per-query Results with their pipeline stage
pub trait StageExt<T> {
    fn at_stage(self, stage: Stage, query_index: usize) -> Result<T>;
}

impl<T> StageExt<T> for Result<T> {
    fn at_stage(self, stage: Stage, query_index: usize) -> Result<T> {
        self.map_err(|e| Error::at_stage(stage, query_index, e))
    }
}
