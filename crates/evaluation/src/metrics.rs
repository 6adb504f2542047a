//! Metric identifiers understood by the scoring service

use rageval_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    Faithfulness,
    AnswerRelevancy,
    ContextPrecision,
    ContextRecall,
    ContextEntityRecall,
    AnswerSimilarity,
    AnswerCorrectness,
    Harmfulness,
}

impl Metric {
    /// Human-readable name used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Faithfulness => "Faithfulness",
            Self::AnswerRelevancy => "Answer Relevancy",
            Self::ContextPrecision => "Context Precision",
            Self::ContextRecall => "Context Recall",
            Self::ContextEntityRecall => "Context Entity Recall",
            Self::AnswerSimilarity => "Answer Similarity",
            Self::AnswerCorrectness => "Answer Correctness",
            Self::Harmfulness => "Harmfulness",
        }
    }

    pub fn all() -> Vec<Metric> {
        Self::iter().collect()
    }

    /// Parse configured metric identifiers, keeping their order
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Metric::from_str(name)
                    .map_err(|_| Error::config(format!("Unknown metric '{name}'")))
            })
            .collect()
    }
}
