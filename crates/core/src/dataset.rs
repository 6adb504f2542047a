//! Evaluation datasets: queries with their ground truth, and optionally
//! precomputed retrieval and generation outputs

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Name of the built-in dataset driven through the full pipeline
pub const TRAVEL: &str = "travel";

/// Name of the built-in dataset with fixed retrieved contexts and answers
pub const TRAVEL_PRECOMPUTED: &str = "travel-precomputed";

/// A batch of queries and the ground truth they are graded against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,

    pub queries: Vec<String>,

    /// Ground-truth passages per query
    pub ground_truth_contexts: Vec<Vec<String>>,

    pub ground_truth_answers: Vec<String>,

    /// Contexts already retrieved for each query, if the dataset was
    /// produced outside this pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_contexts: Option<Vec<Vec<String>>>,

    /// Answers already generated for each query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_answers: Option<Vec<String>>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn travel_queries() -> Vec<String> {
    strings(&[
        "What are the top tourist attractions in Seattle?",
        "Suggest a nature hike in the US.",
        "Recommend a historical tour in Boston.",
    ])
}

fn travel_ground_truth_contexts() -> Vec<Vec<String>> {
    vec![
        strings(&["Visit the Space Needle and explore the Pike Place Market in Seattle"]),
        strings(&["Hike in the Rocky Mountains and enjoy the stunning natural scenery"]),
        strings(&["Discover the rich history of Boston with a Freedom Trail walking tour"]),
    ]
}

fn travel_ground_truth_answers() -> Vec<String> {
    strings(&[
        "The top tourist attractions in Seattle include the Space Needle and Pike Place Market.",
        "You can hike in the Rocky Mountains and enjoy the stunning natural scenery.",
        "A historical tour in Boston can be done through the Freedom Trail walking tour.",
    ])
}

impl Dataset {
    /// Three travel questions with one ground-truth passage each
    pub fn travel() -> Self {
        Self {
            name: TRAVEL.to_string(),
            queries: travel_queries(),
            ground_truth_contexts: travel_ground_truth_contexts(),
            ground_truth_answers: travel_ground_truth_answers(),
            retrieved_contexts: None,
            generated_answers: None,
        }
    }

    /// The travel questions with a fixed retrieval (one miss on the Boston
    /// query) and fixed answers, for grading without calling any model
    pub fn travel_precomputed() -> Self {
        Self {
            name: TRAVEL_PRECOMPUTED.to_string(),
            retrieved_contexts: Some(vec![
                strings(&["Visit the Space Needle and explore the Pike Place Market in Seattle"]),
                strings(&["Hike in the Rocky Mountains and enjoy the stunning natural scenery"]),
                strings(&["Visit the Liberty Bell and Independence Hall in Philadelphia"]),
            ]),
            generated_answers: Some(strings(&[
                "The top tourist attractions in Seattle are the Space Needle and Pike Place Market.",
                "A great nature hike in the US is in the Rocky Mountains.",
                "A historical tour in Boston can be done through the Liberty Bell.",
            ])),
            ..Self::travel()
        }
    }

    /// Names of the datasets compiled into the binary
    pub fn builtin_names() -> &'static [&'static str] {
        &[TRAVEL, TRAVEL_PRECOMPUTED]
    }

    /// Look up a built-in dataset by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            TRAVEL => Some(Self::travel()),
            TRAVEL_PRECOMPUTED => Some(Self::travel_precomputed()),
            _ => None,
        }
    }

    /// Load a dataset from a JSON file and validate its shape
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&content).map_err(|e| {
            Error::dataset(format!("Invalid dataset JSON in {}: {e}", path.display()))
        })?;
        dataset.validate()?;
        debug!(
            "Loaded dataset '{}' with {} queries from {}",
            dataset.name,
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Resolve `name_or_path` as a built-in name first, then as a JSON file
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if let Some(dataset) = Self::builtin(name_or_path) {
            return Ok(dataset);
        }
        let path = Path::new(name_or_path);
        if path.exists() {
            return Self::from_json_file(path);
        }
        Err(Error::dataset(format!(
            "Unknown dataset '{name_or_path}'. Built-in datasets: {:?}",
            Self::builtin_names()
        )))
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Checks that every per-query column has one entry per query
    pub fn validate(&self) -> Result<()> {
        if self.queries.is_empty() {
            return Err(Error::dataset(format!(
                "Dataset '{}' has no queries",
                self.name
            )));
        }

        let expected = self.queries.len();
        let mut columns = vec![
            ("ground_truth_contexts", self.ground_truth_contexts.len()),
            ("ground_truth_answers", self.ground_truth_answers.len()),
        ];
        if let Some(ref retrieved) = self.retrieved_contexts {
            columns.push(("retrieved_contexts", retrieved.len()));
        }
        if let Some(ref answers) = self.generated_answers {
            columns.push(("generated_answers", answers.len()));
        }

        for (column, len) in columns {
            if len != expected {
                return Err(Error::dataset(format!(
                    "Dataset '{}': {column} has {len} entries but there are {expected} queries",
                    self.name
                )));
            }
        }

        Ok(())
    }

    /// Ground-truth passages of all queries flattened into one retrieval corpus
    pub fn corpus(&self) -> Vec<String> {
        self.ground_truth_contexts.iter().flatten().cloned().collect()
    }

    /// True when the dataset can be graded without retrieval or generation
    pub fn is_precomputed(&self) -> bool {
        self.retrieved_contexts.is_some() && self.generated_answers.is_some()
    }
}
