//! Evaluation client trait

use crate::metrics::Metric;
use crate::scores::ScoreTable;
use crate::table::{ColumnMapping, EvaluationTable};
use async_trait::async_trait;
use rageval_core::error::Result;

/// Trait for backends that score an evaluation table
///
/// The returned table has one row per input row, in input order, and one
/// column per requested metric.
#[async_trait]
pub trait EvaluationClient: Send + Sync {
    async fn evaluate(
        &self,
        table: &EvaluationTable,
        metrics: &[Metric],
        mapping: &ColumnMapping,
    ) -> Result<ScoreTable>;
}
