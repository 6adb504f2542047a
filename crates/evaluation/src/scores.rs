//! Per-row metric scores returned by an evaluation backend

use crate::metrics::Metric;
use rageval_core::error::{Error, Result};
use std::fmt;

/// Scores for every row of an evaluation table
///
/// `rows[i][j]` is the score of row `i` on `metrics[j]`; `None` means the
/// backend produced no value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    metrics: Vec<Metric>,
    rows: Vec<Vec<Option<f64>>>,
}

impl ScoreTable {
    /// Build a table, checking that every row has one entry per metric
    pub fn new(metrics: Vec<Metric>, rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != metrics.len())
        {
            return Err(Error::evaluation(format!(
                "Score row {idx} has {} values for {} metrics",
                row.len(),
                metrics.len()
            )));
        }
        Ok(Self { metrics, rows })
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn score(&self, row: usize, metric: Metric) -> Option<f64> {
        let column = self.column(metric)?;
        self.rows.get(row).and_then(|r| r.get(column).copied().flatten())
    }

    /// Mean of `metric` over rows that have a finite value
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        let column = self.column(metric)?;
        let values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row.get(column).copied().flatten())
            .filter(|value| value.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// One `Label: mean` line per metric, e.g. `Faithfulness: 0.83`
    pub fn summary_lines(&self) -> Vec<String> {
        self.metrics
            .iter()
            .map(|metric| match self.mean(*metric) {
                Some(mean) => format!("{}: {mean:.2}", metric.label()),
                None => format!("{}: n/a", metric.label()),
            })
            .collect()
    }

    fn column(&self, metric: Metric) -> Option<usize> {
        self.metrics.iter().position(|m| *m == metric)
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}", "")?;
        for metric in &self.metrics {
            write!(f, " {:>22}", metric.to_string())?;
        }
        writeln!(f)?;
        for (idx, row) in self.rows.iter().enumerate() {
            write!(f, "{idx:>4}")?;
            for value in row {
                match value {
                    Some(v) => write!(f, " {v:>22.4}")?,
                    None => write!(f, " {:>22}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> ScoreTable {
        ScoreTable::new(
            vec![Metric::Faithfulness, Metric::Harmfulness],
            vec![
                vec![Some(1.0), Some(0.0)],
                vec![Some(0.5), None],
                vec![Some(f64::NAN), Some(0.0)],
            ],
        )
        .expect("consistent rows")
    }

    #[test]
    fn test_mean_ignores_missing_and_nan() {
        let table = table();
        assert_eq!(table.mean(Metric::Faithfulness), Some(0.75));
        assert_eq!(table.mean(Metric::Harmfulness), Some(0.0));
        assert_eq!(table.mean(Metric::ContextRecall), None);
    }

    #[test]
    fn test_mean_ignores_infinite_values() {
        let table = ScoreTable::new(
            vec![Metric::AnswerRelevancy],
            vec![
                vec![Some(0.4)],
                vec![Some(f64::INFINITY)],
                vec![Some(f64::NEG_INFINITY)],
                vec![Some(0.6)],
            ],
        )
        .expect("consistent rows");
        assert_eq!(table.mean(Metric::AnswerRelevancy), Some(0.5));
    }

    #[test]
    fn test_summary_lines_use_labels() {
        assert_eq!(
            table().summary_lines(),
            vec!["Faithfulness: 0.75".to_string(), "Harmfulness: 0.00".to_string()]
        );
    }

    #[test]
    fn test_summary_without_values() {
        let table = ScoreTable::new(vec![Metric::AnswerSimilarity], vec![vec![None]])
            .expect("consistent rows");
        assert_eq!(table.summary_lines(), vec!["Answer Similarity: n/a".to_string()]);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = ScoreTable::new(vec![Metric::Faithfulness], vec![vec![Some(1.0), None]]);
        assert!(matches!(result, Err(Error::Evaluation(_))));
    }

    #[test]
    fn test_score_lookup() {
        let table = table();
        assert_eq!(table.score(1, Metric::Faithfulness), Some(0.5));
        assert_eq!(table.score(1, Metric::Harmfulness), None);
        assert_eq!(table.score(9, Metric::Faithfulness), None);
    }

    #[test]
    fn test_display_has_header_and_rows() {
        let printed = table().to_string();
        assert!(printed.lines().next().is_some_and(|h| h.contains("faithfulness")));
        assert_eq!(printed.lines().count(), 4);
    }
}
