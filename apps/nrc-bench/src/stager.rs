//! # Stager
//!
//! Executes a core [`StagePlan`] against the filesystem.
//!
//! Removals tolerate absent targets. Copies are fail-fast: a missing source
//! aborts the plan with the offending path, leaving earlier steps applied.

use crate::AppError;
use nrc_bench_core::{StagePlan, StageStep};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// What a plan execution changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    /// Targets that existed and were removed.
    pub removed: usize,
    pub copied_files: usize,
    pub copied_dirs: usize,
}

/// Run every step in order.
pub fn execute_plan(plan: &StagePlan) -> Result<StageSummary, AppError> {
    let mut summary = StageSummary::default();

    for step in plan.iter() {
        debug!(%step, "stage step");
        match step {
            StageStep::RemoveFile { path } => {
                if remove_file_if_present(path)? {
                    summary.removed += 1;
                }
            }
            StageStep::RemoveDir { path } => {
                if remove_dir_if_present(path)? {
                    summary.removed += 1;
                }
            }
            StageStep::CopyFile { from, to } => {
                info!("Copying {} to {}", from.display(), to.display());
                copy_file(from, to)?;
                summary.copied_files += 1;
            }
            StageStep::CopyDir { from, to } => {
                info!("Copying directory {} to {}", from.display(), to.display());
                copy_dir_recursive(from, to)?;
                summary.copied_dirs += 1;
            }
        }
    }

    Ok(summary)
}

fn remove_file_if_present(path: &Path) -> Result<bool, AppError> {
    if !path.exists() {
        return Ok(false);
    }
    info!("Removing old copy of {}", path.display());
    fs::remove_file(path).map_err(AppError::io(path))?;
    Ok(true)
}

fn remove_dir_if_present(path: &Path) -> Result<bool, AppError> {
    if !path.exists() {
        return Ok(false);
    }
    info!("Removing old copy of {}", path.display());
    fs::remove_dir_all(path).map_err(AppError::io(path))?;
    Ok(true)
}

/// Copy one file, blaming the source only when it cannot be read and the
/// destination otherwise.
fn copy_file(from: &Path, to: &Path) -> Result<(), AppError> {
    fs::metadata(from).map_err(AppError::io(from))?;
    fs::copy(from, to).map_err(AppError::io(to))?;
    Ok(())
}

/// Copy a tree into a destination that must not exist yet.
fn copy_dir_recursive(from: &Path, to: &Path) -> Result<(), AppError> {
    let metadata = fs::metadata(from).map_err(AppError::io(from))?;
    if !metadata.is_dir() {
        return Err(AppError::Io {
            path: from.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    fs::create_dir(to).map_err(AppError::io(to))?;

    for entry in fs::read_dir(from).map_err(AppError::io(from))? {
        let entry = entry.map_err(AppError::io(from))?;
        let source = entry.path();
        let target = to.join(entry.file_name());

        if fs::metadata(&source).map_err(AppError::io(&source))?.is_dir() {
            copy_dir_recursive(&source, &target)?;
        } else {
            copy_file(&source, &target)?;
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
