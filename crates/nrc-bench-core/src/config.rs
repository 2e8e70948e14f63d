//! # Bench Configuration
//!
//! The JSON document that drives a sweep. Every field has a default, so an
//! empty object (`{}`) is the reference sweep.
//!
//! Reading and writing the document is done by the app; this module only
//! converts between text and values.

use crate::formats::LineStyle;
use crate::runner::FailurePolicy;
use crate::space::SweepSpace;
use crate::stage::StageLayout;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configs file name, relative to the bench directory.
pub const DEFAULT_CONFIGS_FILE: &str = "configs.csv";

/// Everything a sweep needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub layout: StageLayout,
    pub space: SweepSpace,
    /// Configs file, resolved against `layout.bench_dir` when relative.
    pub configs_file: PathBuf,
    pub line_style: LineStyle,
    pub failure_policy: FailurePolicy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            layout: StageLayout::default(),
            space: SweepSpace::default(),
            configs_file: PathBuf::from(DEFAULT_CONFIGS_FILE),
            line_style: LineStyle::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl BenchConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Location of the configs file on disk.
    #[must_use]
    pub fn configs_path(&self) -> PathBuf {
        self.layout.in_bench_dir(&self.configs_file)
    }
}

// =============================================================================
// TESTS
// =============================================================================
