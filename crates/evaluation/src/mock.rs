//! Offline evaluation client

use crate::client::EvaluationClient;
use crate::metrics::Metric;
use crate::scores::ScoreTable;
use crate::table::{ColumnMapping, EvaluationTable};
use async_trait::async_trait;
use rageval_core::error::Result;
use std::collections::HashMap;

/// Client that gives every row the same fixed score per metric
#[derive(Debug, Clone)]
pub struct StaticEvaluationClient {
    default_score: f64,
    overrides: HashMap<Metric, f64>,
}

impl StaticEvaluationClient {
    /// Score every metric with `score`
    pub fn uniform(score: f64) -> Self {
        Self {
            default_score: score,
            overrides: HashMap::new(),
        }
    }

    /// Use `score` for `metric` instead of the uniform score
    pub fn with_score(mut self, metric: Metric, score: f64) -> Self {
        self.overrides.insert(metric, score);
        self
    }

    fn score_for(&self, metric: Metric) -> f64 {
        self.overrides
            .get(&metric)
            .copied()
            .unwrap_or(self.default_score)
    }
}

#[async_trait]
impl EvaluationClient for StaticEvaluationClient {
    async fn evaluate(
        &self,
        table: &EvaluationTable,
        metrics: &[Metric],
        _mapping: &ColumnMapping,
    ) -> Result<ScoreTable> {
        let row: Vec<Option<f64>> = metrics.iter().map(|m| Some(self.score_for(*m))).collect();
        ScoreTable::new(metrics.to_vec(), vec![row; table.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_one_row_per_input_row() {
        let table = EvaluationTable::default();
        let scores = StaticEvaluationClient::uniform(1.0)
            .evaluate(&table, &[Metric::Faithfulness], &ColumnMapping::default())
            .await
            .expect("scores");
        assert!(scores.is_empty());
    }

    #[test]
    fn test_override_wins() {
        let client = StaticEvaluationClient::uniform(1.0).with_score(Metric::Harmfulness, 0.0);
        assert_eq!(client.score_for(Metric::Harmfulness), 0.0);
        assert_eq!(client.score_for(Metric::Faithfulness), 1.0);
    }
}
