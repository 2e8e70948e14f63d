//! # Parameters
//!
//! The twelve renderer hyperparameters, in the order the renderer expects
//! them on its command line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A renderer hyperparameter.
///
/// The discriminant order is the declared order: it fixes both the token
/// order inside a configuration line and the product iteration order
/// (first parameter varies slowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    LossFn,
    Optimizer,
    LearningRate,
    Encoding,
    NnWidth,
    NnDepth,
    Log2BatchSize,
    Scene,
    RenderWidth,
    RenderHeight,
    TrainSampleRatio,
    TrainSpp,
}

impl Parameter {
    /// Number of parameters, and therefore tokens per configuration line.
    pub const COUNT: usize = 12;

    /// All parameters in declared order.
    pub const ALL: [Parameter; Self::COUNT] = [
        Parameter::LossFn,
        Parameter::Optimizer,
        Parameter::LearningRate,
        Parameter::Encoding,
        Parameter::NnWidth,
        Parameter::NnDepth,
        Parameter::Log2BatchSize,
        Parameter::Scene,
        Parameter::RenderWidth,
        Parameter::RenderHeight,
        Parameter::TrainSampleRatio,
        Parameter::TrainSpp,
    ];

    /// Stable snake_case name, matching the config document keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Parameter::LossFn => "loss_fn",
            Parameter::Optimizer => "optimizer",
            Parameter::LearningRate => "learning_rate",
            Parameter::Encoding => "encoding",
            Parameter::NnWidth => "nn_width",
            Parameter::NnDepth => "nn_depth",
            Parameter::Log2BatchSize => "log2_batch_size",
            Parameter::Scene => "scene",
            Parameter::RenderWidth => "render_width",
            Parameter::RenderHeight => "render_height",
            Parameter::TrainSampleRatio => "train_sample_ratio",
            Parameter::TrainSpp => "train_spp",
        }
    }

    /// Position of this parameter in a configuration line.
    #[must_use]
    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================
