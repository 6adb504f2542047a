//! Plain-text rendering of run results

use crate::pipeline::PipelineOutput;
use rageval_core::Dataset;
use rageval_evaluation::{EvaluationTable, ScoreTable};

/// Per-query selections and answers of a pipeline run
pub fn render_run(dataset: &Dataset, output: &PipelineOutput) -> String {
    let mut out = String::new();
    for (idx, query) in dataset.queries.iter().enumerate() {
        out.push_str(&format!("Query {idx}: {query}\n"));
        if let Some(context) = output.selected_contexts.get(idx) {
            out.push_str(&format!("  Context: {context}\n"));
        }
        if let Some(answer) = output.processed_answers.get(idx) {
            out.push_str(&format!("  Answer:  {answer}\n"));
        }
    }
    out
}

pub fn render_table(table: &EvaluationTable) -> String {
    format!("Evaluation table:\n{table}")
}

/// Per-row scores followed by the per-metric means
pub fn render_scores(scores: &ScoreTable) -> String {
    let mut out = format!("{scores}\n");
    for line in scores.summary_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_datasets() -> String {
    let mut out = String::from("Built-in datasets:\n");
    for name in Dataset::builtin_names() {
        if let Some(dataset) = Dataset::builtin(name) {
            let kind = if dataset.is_precomputed() {
                "precomputed answers"
            } else {
                "pipeline"
            };
            out.push_str(&format!(
                "  {name:<20} {} queries ({kind})\n",
                dataset.len()
            ));
        }
    }
    out
}
