//! # nrc-bench-core
//!
//! Deterministic sweep planning for the Neural Radiance Caching renderer
//! benchmark.
//!
//! This crate answers three questions without touching the filesystem or
//! spawning processes:
//! - Which configurations make up a sweep (`space`, `product`)
//! - How a configuration is written to and read from the configs file
//!   (`configuration`, `formats`)
//! - What the stager and runner must do (`stage`, `runner`, `evaluate`)
//!
//! File I/O and process launching live in the app layer (apps/nrc-bench).

pub mod config;
pub mod configuration;
pub mod evaluate;
pub mod formats;
pub mod parameter;
pub mod product;
pub mod runner;
pub mod space;
pub mod stage;

pub use config::BenchConfig;
pub use configuration::Configuration;
pub use evaluate::{Evaluator, NoopEvaluator};
pub use formats::LineStyle;
pub use parameter::Parameter;
pub use product::CartesianProduct;
pub use runner::{
    FailurePolicy, LaunchFailure, Launcher, RunFailure, RunReport, Runner,
};
pub use space::SweepSpace;
pub use stage::{StageLayout, StagePlan, StageStep};

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors produced by the sweep engine.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A parameter has no options, so the product would be empty.
    #[error("parameter `{parameter}` has no options")]
    EmptyOptions { parameter: Parameter },

    /// A token is empty or contains whitespace.
    #[error("parameter `{parameter}` has invalid token {token:?}")]
    InvalidToken { parameter: Parameter, token: String },

    /// The number of combinations does not fit in `usize`.
    #[error("combination count overflows usize")]
    CombinationOverflow,

    /// A configs file line has the wrong number of tokens.
    #[error("line {line}: expected {expected} tokens, found {found}")]
    ArityMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The runner stopped at the first failing configuration.
    #[error("config {index} ({arguments}) failed: {failure}")]
    RunHalted {
        index: usize,
        arguments: String,
        failure: LaunchFailure,
    },

    #[error("unknown failure policy: {0}")]
    UnknownPolicy(String),

    #[error("unknown line style: {0}")]
    UnknownLineStyle(String),
}

/// Result alias for the sweep engine.
pub type Result<T> = std::result::Result<T, BenchError>;
