//! Application errors.

use nrc_bench_core::BenchError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem failure, with the path that caused it.
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The config document could not be parsed.
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] BenchError),

    /// Refusing to overwrite without `--force`.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// Collected failures at the end of a run.
    #[error("{failed} of {total} configurations failed")]
    RunFailures { failed: usize, total: usize },
}

impl AppError {
    /// Build a mapper that attaches `path` to an I/O error.
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(io::Error) -> AppError {
        let path = path.as_ref().to_path_buf();
        move |source| AppError::Io { path, source }
    }
}
