//! # nrc-bench Library
//!
//! This library exposes the nrc-bench modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod error;
pub mod launcher;
pub mod stager;

pub use error::AppError;

// Re-export nrc_bench_core for convenience
pub use nrc_bench_core;
