//! # Process Launcher
//!
//! Runs the staged renderer once per configuration.
//!
//! The configuration line is split on whitespace and passed as separate
//! arguments; no shell is involved. The renderer runs with the bench
//! directory as its working directory so it finds its staged data.

use nrc_bench_core::{LaunchFailure, Launcher, StageLayout};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Launches a real executable and waits for it.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    executable: PathBuf,
    working_dir: PathBuf,
}

impl ProcessLauncher {
    /// `executable` is made absolute so it does not depend on how the
    /// platform resolves relative programs against `working_dir`.
    pub fn new(executable: impl AsRef<Path>, working_dir: impl Into<PathBuf>) -> Self {
        let executable = executable.as_ref();
        Self {
            executable: std::path::absolute(executable).unwrap_or_else(|_| executable.to_path_buf()),
            working_dir: working_dir.into(),
        }
    }

    /// Launcher for the staged executable of `layout`.
    pub fn from_layout(layout: &StageLayout) -> Self {
        Self::new(layout.staged_executable(), layout.bench_dir.clone())
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Launcher for ProcessLauncher {
    /// Tokens are split on whitespace only. Quotes or escapes in a
    /// hand-edited configs file are passed through literally, not
    /// interpreted.
    fn launch(&mut self, index: usize, arguments: &str) -> Result<(), LaunchFailure> {
        let status = Command::new(&self.executable)
            .args(arguments.split_whitespace())
            .current_dir(&self.working_dir)
            .status()
            .map_err(|e| LaunchFailure::Spawn(format!("{}: {e}", self.executable.display())))?;

        debug!(index, %status, "renderer finished");

        if status.success() {
            Ok(())
        } else {
            Err(LaunchFailure::Exit {
                code: status.code(),
            })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
