//! rageval CLI - RAG pipeline evaluation
//!
//! This binary runs the retrieve, rerank, generate and post-process pipeline
//! over a dataset and sends the results to an evaluation service.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rageval::pipeline::{precomputed_table, run_table, score, RagPipeline};
use rageval::report;
use rageval_core::config::{Config, Credentials};
use rageval_core::dataset::{Dataset, TRAVEL, TRAVEL_PRECOMPUTED};
use rageval_evaluation::create_evaluation_client;
use rageval_generation::create_generation_client;
use rageval_reranking::OverlapReranker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rageval")]
#[command(about = "Evaluate a retrieval-augmented generation pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve, rerank, generate and post-process every query, then evaluate
    Run {
        /// Built-in dataset name or path to a dataset JSON file
        #[arg(short, long, default_value = TRAVEL)]
        dataset: String,

        /// Stop after printing the evaluation table
        #[arg(long)]
        skip_evaluation: bool,
    },
    /// Evaluate a dataset that already carries retrieved contexts and answers
    Evaluate {
        /// Built-in dataset name or path to a dataset JSON file
        #[arg(short, long, default_value = TRAVEL_PRECOMPUTED)]
        dataset: String,
    },
    /// List built-in datasets
    Datasets,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Run {
            dataset,
            skip_evaluation,
        }) => run(cli.config.as_deref(), &dataset, skip_evaluation).await,
        Some(Commands::Evaluate { dataset }) => evaluate(cli.config.as_deref(), &dataset).await,
        Some(Commands::Datasets) => {
            print!("{}", report::render_datasets());
            Ok(())
        }
        None => {
            println!("Run 'rageval run' to evaluate the pipeline, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!(
        "{}={level},rageval_core={level},rageval_retrieval={level},rageval_reranking={level},\
         rageval_generation={level},rageval_evaluation={level}",
        env!("CARGO_CRATE_NAME")
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Full pipeline over a dataset
async fn run(config_path: Option<&Path>, dataset_name: &str, skip_evaluation: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let credentials = Credentials::from_env();
    debug!("Credentials: {credentials:?}");

    // Build every client first so a missing key fails before any query runs
    let generator = create_generation_client(&config.generation, &credentials)?;
    let evaluator = if skip_evaluation {
        None
    } else {
        Some(create_evaluation_client(&config.evaluation, &credentials)?)
    };

    let dataset = Dataset::resolve(dataset_name)?;
    info!(
        "Running pipeline over '{}' ({} queries)",
        dataset.name,
        dataset.len()
    );

    let pipeline = RagPipeline::new(Arc::new(OverlapReranker::new()), generator, &config);
    let output = pipeline.run(&dataset).await?;
    print!("{}", report::render_run(&dataset, &output));

    let table = run_table(&dataset, &output)?;
    println!("{}", report::render_table(&table));

    if let Some(evaluator) = evaluator {
        let scores = score(evaluator.as_ref(), &table, &config.evaluation).await?;
        print!("{}", report::render_scores(&scores));
    }

    Ok(())
}

/// Score a dataset with precomputed contexts and answers
async fn evaluate(config_path: Option<&Path>, dataset_name: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let credentials = Credentials::from_env();
    let evaluator = create_evaluation_client(&config.evaluation, &credentials)?;

    let dataset = Dataset::resolve(dataset_name)?;
    let table = precomputed_table(&dataset)?;
    println!("{}", report::render_table(&table));

    let scores = score(evaluator.as_ref(), &table, &config.evaluation).await?;
    print!("{}", report::render_scores(&scores));

    Ok(())
}
