//! Evaluation batch assembly

use rageval_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One query's inputs and outputs, ready to be scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub question: String,

    /// Ground-truth passages of the query joined with a single space
    pub ground_truth: String,

    /// Contexts the answer was generated from
    pub contexts: Vec<String>,

    pub ground_truth_answer: String,

    pub generated_answer: String,
}

/// Zip the per-query sequences of a pipeline run into evaluation records
///
/// Each selected context becomes the single entry of its record's
/// `contexts`. Fails with [`Error::ShapeMismatch`] unless all five
/// sequences have the same length.
pub fn assemble(
    queries: &[String],
    ground_truth_contexts: &[Vec<String>],
    ground_truth_answers: &[String],
    selected_contexts: &[String],
    processed_answers: &[String],
) -> Result<Vec<EvaluationRecord>> {
    let contexts: Vec<Vec<String>> = selected_contexts
        .iter()
        .map(|context| vec![context.clone()])
        .collect();
    assemble_with_contexts(
        queries,
        ground_truth_contexts,
        ground_truth_answers,
        &contexts,
        processed_answers,
    )
}

/// Like [`assemble`], for datasets that carry several contexts per query
pub fn assemble_with_contexts(
    queries: &[String],
    ground_truth_contexts: &[Vec<String>],
    ground_truth_answers: &[String],
    contexts: &[Vec<String>],
    answers: &[String],
) -> Result<Vec<EvaluationRecord>> {
    let expected = queries.len();
    let lengths = [
        ground_truth_contexts.len(),
        ground_truth_answers.len(),
        contexts.len(),
        answers.len(),
    ];
    if lengths.iter().any(|len| *len != expected) {
        return Err(Error::ShapeMismatch {
            queries: expected,
            ground_truth_contexts: ground_truth_contexts.len(),
            ground_truth_answers: ground_truth_answers.len(),
            selected_contexts: contexts.len(),
            processed_answers: answers.len(),
        });
    }

    let records = queries
        .iter()
        .zip(ground_truth_contexts)
        .zip(ground_truth_answers)
        .zip(contexts)
        .zip(answers)
        .map(
            |((((question, truth_contexts), truth_answer), contexts), answer)| EvaluationRecord {
                question: question.clone(),
                ground_truth: truth_contexts.join(" "),
                contexts: contexts.clone(),
                ground_truth_answer: truth_answer.clone(),
                generated_answer: answer.clone(),
            },
        )
        .collect();

    Ok(records)
}
