//! Sequential RAG pipeline: retrieve, rerank, generate, post-process

use rageval_core::config::{Config, CorrectionRule, EvaluationConfig};
use rageval_core::error::{Error, Result, Stage, StageExt};
use rageval_core::Dataset;
use rageval_evaluation::{
    assemble, assemble_with_contexts, ColumnMapping, EvaluationClient, EvaluationTable, Metric,
    ScoreTable,
};
use rageval_generation::{generate_answer, post_process, GenerationClient};
use rageval_reranking::{score_candidates, Reranker};
use rageval_retrieval::{retriever_for_dataset, Retriever};
use std::sync::Arc;
use tracing::{debug, info};

/// Per-query outputs of a pipeline run, all in query order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub candidates: Vec<Vec<String>>,
    pub selected_contexts: Vec<String>,
    pub raw_answers: Vec<String>,
    pub processed_answers: Vec<String>,
}

pub struct RagPipeline {
    reranker: Arc<dyn Reranker>,
    generator: Arc<dyn GenerationClient>,
    corrections: Vec<CorrectionRule>,
    top_n: usize,
    max_output_tokens: u32,
}

impl RagPipeline {
    pub fn new(
        reranker: Arc<dyn Reranker>,
        generator: Arc<dyn GenerationClient>,
        config: &Config,
    ) -> Self {
        Self {
            reranker,
            generator,
            corrections: config.corrections.clone(),
            top_n: config.retrieval.top_n,
            max_output_tokens: config.generation.max_output_tokens,
        }
    }

    /// Run every query of `dataset` through the pipeline, one at a time
    ///
    /// Candidates come from the dataset's own retrieved contexts when it has
    /// them, otherwise from BM25 over its ground-truth passages. The first
    /// failing query aborts the run with an [`Error::Stage`] naming the stage
    /// and query index; later queries are not attempted.
    pub async fn run(&self, dataset: &Dataset) -> Result<PipelineOutput> {
        dataset.validate()?;

        let retriever: Option<Box<dyn Retriever>> = match dataset.retrieved_contexts {
            Some(_) => None,
            None => Some(Box::new(retriever_for_dataset(dataset))),
        };

        let mut output = PipelineOutput::default();
        for (idx, query) in dataset.queries.iter().enumerate() {
            info!("Query {idx}: {query}");

            let candidates = match (&retriever, &dataset.retrieved_contexts) {
                (Some(retriever), _) => retriever.retrieve(query, self.top_n),
                (None, Some(retrieved)) => retrieved
                    .get(idx)
                    .cloned()
                    .ok_or_else(|| Error::dataset(format!("No retrieved contexts for query {idx}")))
                    .at_stage(Stage::Retrieval, idx)?,
                (None, None) => Vec::new(),
            };
            debug!("Query {idx}: {} candidate contexts", candidates.len());
            for scored in score_candidates(query, &candidates) {
                debug!("  {:.3}  {}", scored.score, scored.context);
            }

            let selected = self
                .reranker
                .select(query, &candidates)
                .at_stage(Stage::Rerank, idx)?
                .to_string();
            info!("Query {idx}: selected context: {selected}");

            let raw_answer = generate_answer(
                query,
                &selected,
                self.generator.as_ref(),
                self.max_output_tokens,
            )
            .await
            .at_stage(Stage::Generation, idx)?;

            let processed = post_process(&raw_answer, &self.corrections);
            if processed != raw_answer {
                info!("Query {idx}: corrected answer: {processed}");
            } else {
                info!("Query {idx}: answer: {processed}");
            }

            output.candidates.push(candidates);
            output.selected_contexts.push(selected);
            output.raw_answers.push(raw_answer);
            output.processed_answers.push(processed);
        }

        Ok(output)
    }
}

/// Evaluation table for a finished pipeline run
pub fn run_table(dataset: &Dataset, output: &PipelineOutput) -> Result<EvaluationTable> {
    let records = assemble(
        &dataset.queries,
        &dataset.ground_truth_contexts,
        &dataset.ground_truth_answers,
        &output.selected_contexts,
        &output.processed_answers,
    )?;
    Ok(EvaluationTable::from_records(records))
}

/// Evaluation table for a dataset that already carries contexts and answers
pub fn precomputed_table(dataset: &Dataset) -> Result<EvaluationTable> {
    let (Some(contexts), Some(answers)) = (&dataset.retrieved_contexts, &dataset.generated_answers)
    else {
        return Err(Error::dataset(format!(
            "Dataset '{}' has no precomputed contexts and answers; use `rageval run` instead",
            dataset.name
        )));
    };
    let records = assemble_with_contexts(
        &dataset.queries,
        &dataset.ground_truth_contexts,
        &dataset.ground_truth_answers,
        contexts,
        answers,
    )?;
    Ok(EvaluationTable::from_records(records))
}

/// Score `table` with the configured metrics and the identity column mapping
pub async fn score(
    client: &dyn EvaluationClient,
    table: &EvaluationTable,
    config: &EvaluationConfig,
) -> Result<ScoreTable> {
    let metrics = Metric::parse_list(&config.metrics)?;
    info!(
        "Evaluating {} rows on {} metrics",
        table.len(),
        metrics.len()
    );
    client
        .evaluate(table, &metrics, &ColumnMapping::default())
        .await
}
