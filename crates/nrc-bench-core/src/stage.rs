//! # Stage Plan
//!
//! What the stager must remove and copy before a sweep.
//!
//! The plan is a pure description; the app layer executes it against the
//! filesystem. Steps run in order and the first failing copy aborts the
//! run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// LAYOUT
// =============================================================================

/// Where the renderer is built and where the sweep runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageLayout {
    /// Directory the sweep runs in; staged copies land here.
    pub bench_dir: PathBuf,
    /// Build output directory holding the executable and its libraries.
    pub build_dir: PathBuf,
    /// File name of the renderer executable.
    pub executable: String,
    /// Shared libraries copied next to the executable.
    pub runtime_libraries: Vec<String>,
    /// Source data directory.
    pub data_source: PathBuf,
    /// Name of the staged data directory inside `bench_dir`.
    pub data_dir: String,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self {
            bench_dir: PathBuf::from("."),
            build_dir: PathBuf::from("../cmake-build-default"),
            executable: "NeuralRadianceCaching.exe".to_string(),
            runtime_libraries: vec!["glfw3.dll".to_string()],
            data_source: PathBuf::from("../data"),
            data_dir: "data".to_string(),
        }
    }
}

impl StageLayout {
    /// Path of the staged executable.
    #[must_use]
    pub fn staged_executable(&self) -> PathBuf {
        self.bench_dir.join(&self.executable)
    }

    /// Path of the staged data directory.
    #[must_use]
    pub fn staged_data_dir(&self) -> PathBuf {
        self.bench_dir.join(&self.data_dir)
    }

    /// Resolve a path relative to the bench directory.
    #[must_use]
    pub fn in_bench_dir(&self, path: &Path) -> PathBuf {
        self.bench_dir.join(path)
    }
}

// =============================================================================
// STEPS
// =============================================================================

/// A single filesystem action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StageStep {
    /// Remove a file if it exists.
    RemoveFile { path: PathBuf },
    /// Remove a directory tree if it exists.
    RemoveDir { path: PathBuf },
    /// Copy a file. The source must exist.
    CopyFile { from: PathBuf, to: PathBuf },
    /// Copy a directory tree to a fresh path. The source must exist.
    CopyDir { from: PathBuf, to: PathBuf },
}

impl StageStep {
    #[must_use]
    pub fn is_removal(&self) -> bool {
        matches!(self, StageStep::RemoveFile { .. } | StageStep::RemoveDir { .. })
    }
}

impl fmt::Display for StageStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageStep::RemoveFile { path } => write!(f, "remove file {}", path.display()),
            StageStep::RemoveDir { path } => write!(f, "remove dir  {}", path.display()),
            StageStep::CopyFile { from, to } => {
                write!(f, "copy file   {} -> {}", from.display(), to.display())
            }
            StageStep::CopyDir { from, to } => {
                write!(f, "copy dir    {} -> {}", from.display(), to.display())
            }
        }
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// Ordered stage steps: all removals, then all copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    pub steps: Vec<StageStep>,
}

impl StagePlan {
    /// Plan a fresh staging of `layout`.
    ///
    /// Order: executable, runtime libraries, data directory; removals first.
    #[must_use]
    pub fn from_layout(layout: &StageLayout) -> Self {
        let mut steps = Vec::new();

        steps.push(StageStep::RemoveFile {
            path: layout.staged_executable(),
        });
        for library in &layout.runtime_libraries {
            steps.push(StageStep::RemoveFile {
                path: layout.bench_dir.join(library),
            });
        }
        steps.push(StageStep::RemoveDir {
            path: layout.staged_data_dir(),
        });

        steps.push(StageStep::CopyFile {
            from: layout.build_dir.join(&layout.executable),
            to: layout.staged_executable(),
        });
        for library in &layout.runtime_libraries {
            steps.push(StageStep::CopyFile {
                from: layout.build_dir.join(library),
                to: layout.bench_dir.join(library),
            });
        }
        steps.push(StageStep::CopyDir {
            from: layout.data_source.clone(),
            to: layout.staged_data_dir(),
        });

        Self { steps }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageStep> {
        self.steps.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
