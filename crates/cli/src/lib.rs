//! Library interface for the rageval CLI
//!
//! The pipeline and report rendering live here so they can be exercised by
//! integration tests; argument parsing and process setup stay in main.rs.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod pipeline;
pub mod report;

pub use pipeline::{precomputed_table, run_table, score, PipelineOutput, RagPipeline};
