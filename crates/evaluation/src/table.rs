//! Tabular view of an evaluation batch

use crate::record::EvaluationRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Logical field names the scoring service expects
pub const LOGICAL_FIELDS: [&str; 6] = [
    "question",
    "ground_truth",
    "contexts",
    "ground_truth_answer",
    "generated_answer",
    "answer",
];

/// Maps each logical field to the column that holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub question: String,
    pub ground_truth: String,
    pub contexts: String,
    pub ground_truth_answer: String,
    pub generated_answer: String,
    pub answer: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            question: "question".to_string(),
            ground_truth: "ground_truth".to_string(),
            contexts: "contexts".to_string(),
            ground_truth_answer: "ground_truth_answer".to_string(),
            generated_answer: "generated_answer".to_string(),
            answer: "answer".to_string(),
        }
    }
}

impl ColumnMapping {
    /// (logical field, column) pairs in [`LOGICAL_FIELDS`] order
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            (LOGICAL_FIELDS[0], self.question.as_str()),
            (LOGICAL_FIELDS[1], self.ground_truth.as_str()),
            (LOGICAL_FIELDS[2], self.contexts.as_str()),
            (LOGICAL_FIELDS[3], self.ground_truth_answer.as_str()),
            (LOGICAL_FIELDS[4], self.generated_answer.as_str()),
            (LOGICAL_FIELDS[5], self.answer.as_str()),
        ]
    }
}

/// One row of the evaluation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub question: String,
    pub ground_truth: String,
    pub contexts: Vec<String>,
    pub ground_truth_answer: String,
    pub generated_answer: String,
    /// Same text as `generated_answer`; some metrics read this column
    pub answer: String,
}

impl From<EvaluationRecord> for EvaluationRow {
    fn from(record: EvaluationRecord) -> Self {
        Self {
            answer: record.generated_answer.clone(),
            question: record.question,
            ground_truth: record.ground_truth,
            contexts: record.contexts,
            ground_truth_answer: record.ground_truth_answer,
            generated_answer: record.generated_answer,
        }
    }
}

impl EvaluationRow {
    /// Row as a JSON object keyed by the mapped column names
    pub fn to_columns(&self, mapping: &ColumnMapping) -> Map<String, Value> {
        let mut columns = Map::new();
        columns.insert(mapping.question.clone(), Value::from(self.question.clone()));
        columns.insert(
            mapping.ground_truth.clone(),
            Value::from(self.ground_truth.clone()),
        );
        columns.insert(mapping.contexts.clone(), Value::from(self.contexts.clone()));
        columns.insert(
            mapping.ground_truth_answer.clone(),
            Value::from(self.ground_truth_answer.clone()),
        );
        columns.insert(
            mapping.generated_answer.clone(),
            Value::from(self.generated_answer.clone()),
        );
        columns.insert(mapping.answer.clone(), Value::from(self.answer.clone()));
        columns
    }
}

/// Evaluation batch with one row per query, in query order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTable {
    pub rows: Vec<EvaluationRow>,
}

impl EvaluationTable {
    pub fn from_records(records: Vec<EvaluationRecord>) -> Self {
        Self {
            rows: records.into_iter().map(EvaluationRow::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json_rows(&self, mapping: &ColumnMapping) -> Vec<Map<String, Value>> {
        self.rows.iter().map(|row| row.to_columns(mapping)).collect()
    }
}

impl fmt::Display for EvaluationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            writeln!(f, "[{idx}] question:            {}", row.question)?;
            writeln!(f, "    ground_truth:        {}", row.ground_truth)?;
            writeln!(f, "    contexts:            {:?}", row.contexts)?;
            writeln!(f, "    ground_truth_answer: {}", row.ground_truth_answer)?;
            writeln!(f, "    generated_answer:    {}", row.generated_answer)?;
            writeln!(f, "    answer:              {}", row.answer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> EvaluationRecord {
        EvaluationRecord {
            question: "q".to_string(),
            ground_truth: "gt".to_string(),
            contexts: vec!["ctx".to_string()],
            ground_truth_answer: "truth".to_string(),
            generated_answer: "gen".to_string(),
        }
    }

    #[test]
    fn test_answer_column_duplicates_generated_answer() {
        let table = EvaluationTable::from_records(vec![record()]);
        assert_eq!(table.rows[0].answer, "gen");
        assert_eq!(table.rows[0].generated_answer, "gen");
    }

    #[test]
    fn test_default_mapping_is_identity() {
        for (logical, column) in ColumnMapping::default().pairs() {
            assert_eq!(logical, column);
        }
    }

    #[test]
    fn test_json_rows_use_mapped_names() {
        let mapping = ColumnMapping {
            question: "user_input".to_string(),
            ..ColumnMapping::default()
        };
        let rows = EvaluationTable::from_records(vec![record()]).to_json_rows(&mapping);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(rows[0]["user_input"], "q");
        assert!(!rows[0].contains_key("question"));
        assert_eq!(rows[0]["contexts"], serde_json::json!(["ctx"]));
    }

    #[test]
    fn test_display_lists_rows_in_order() {
        let mut second = record();
        second.question = "second".to_string();
        let table = EvaluationTable::from_records(vec![record(), second]);
        let printed = table.to_string();
        let first_pos = printed.find("[0] question").expect("row 0");
        let second_pos = printed.find("[1] question:            second").expect("row 1");
        assert!(first_pos < second_pos);
    }
}
