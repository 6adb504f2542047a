//! Core types for the rageval RAG evaluation pipeline
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - **Configuration**: TOML/environment configuration and API credentials
//! - **Datasets**: queries with their ground truth, built-in or loaded from JSON
//! - **Error handling**: unified error type with per-stage query attribution
//!

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod dataset;
pub mod error;

// Re-export main types for convenience
pub use config::{
    Config, CorrectionRule, Credentials, EvaluationConfig, GenerationConfig, RetrievalConfig,
};
pub use dataset::Dataset;
pub use error::{Error, Result, Stage, StageExt};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
