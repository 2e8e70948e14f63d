//! # Sweep Space
//!
//! The option lists of a sweep, one per [`Parameter`].
//!
//! A `SweepSpace` is an explicit value handed to the generator. Its
//! `Default` holds the reference sweep for the renderer.

use crate::product::CartesianProduct;
use crate::{BenchError, Parameter, Result};
use serde::{Deserialize, Serialize};

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Ordered option lists for every parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpace {
    pub loss_fn: Vec<String>,
    pub optimizer: Vec<String>,
    pub learning_rate: Vec<String>,
    pub encoding: Vec<String>,
    pub nn_width: Vec<String>,
    pub nn_depth: Vec<String>,
    pub log2_batch_size: Vec<String>,
    pub scene: Vec<String>,
    pub render_width: Vec<String>,
    pub render_height: Vec<String>,
    pub train_sample_ratio: Vec<String>,
    pub train_spp: Vec<String>,
}

impl Default for SweepSpace {
    fn default() -> Self {
        Self {
            loss_fn: tokens(&["RelativeL2"]),
            optimizer: tokens(&["Adam"]),
            learning_rate: tokens(&["0.01", "0.001", "0.0001", "0.00001"]),
            encoding: tokens(&["0"]),
            nn_width: tokens(&["64", "128"]),
            nn_depth: tokens(&["2", "4", "6", "8", "10"]),
            log2_batch_size: tokens(&["12", "13", "14", "15", "16"]),
            scene: tokens(&["0"]),
            render_width: tokens(&["1920"]),
            render_height: tokens(&["1080"]),
            train_sample_ratio: tokens(&["0.01", "0.02", "0.05", "0.1"]),
            train_spp: tokens(&["1", "2", "4", "8"]),
        }
    }
}

impl SweepSpace {
    /// Build a space by asking `f` for the options of each parameter.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Parameter) -> Vec<String>,
    {
        Self {
            loss_fn: f(Parameter::LossFn),
            optimizer: f(Parameter::Optimizer),
            learning_rate: f(Parameter::LearningRate),
            encoding: f(Parameter::Encoding),
            nn_width: f(Parameter::NnWidth),
            nn_depth: f(Parameter::NnDepth),
            log2_batch_size: f(Parameter::Log2BatchSize),
            scene: f(Parameter::Scene),
            render_width: f(Parameter::RenderWidth),
            render_height: f(Parameter::RenderHeight),
            train_sample_ratio: f(Parameter::TrainSampleRatio),
            train_spp: f(Parameter::TrainSpp),
        }
    }

    /// Options of a single parameter.
    #[must_use]
    pub fn options(&self, parameter: Parameter) -> &[String] {
        match parameter {
            Parameter::LossFn => &self.loss_fn,
            Parameter::Optimizer => &self.optimizer,
            Parameter::LearningRate => &self.learning_rate,
            Parameter::Encoding => &self.encoding,
            Parameter::NnWidth => &self.nn_width,
            Parameter::NnDepth => &self.nn_depth,
            Parameter::Log2BatchSize => &self.log2_batch_size,
            Parameter::Scene => &self.scene,
            Parameter::RenderWidth => &self.render_width,
            Parameter::RenderHeight => &self.render_height,
            Parameter::TrainSampleRatio => &self.train_sample_ratio,
            Parameter::TrainSpp => &self.train_spp,
        }
    }

    fn options_mut(&mut self, parameter: Parameter) -> &mut Vec<String> {
        match parameter {
            Parameter::LossFn => &mut self.loss_fn,
            Parameter::Optimizer => &mut self.optimizer,
            Parameter::LearningRate => &mut self.learning_rate,
            Parameter::Encoding => &mut self.encoding,
            Parameter::NnWidth => &mut self.nn_width,
            Parameter::NnDepth => &mut self.nn_depth,
            Parameter::Log2BatchSize => &mut self.log2_batch_size,
            Parameter::Scene => &mut self.scene,
            Parameter::RenderWidth => &mut self.render_width,
            Parameter::RenderHeight => &mut self.render_height,
            Parameter::TrainSampleRatio => &mut self.train_sample_ratio,
            Parameter::TrainSpp => &mut self.train_spp,
        }
    }

    /// Replace the options of one parameter.
    #[must_use]
    pub fn with_options<I, S>(mut self, parameter: Parameter, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.options_mut(parameter) = options.into_iter().map(Into::into).collect();
        self
    }

    /// All option lists in declared parameter order.
    pub fn lists(&self) -> impl Iterator<Item = (Parameter, &[String])> {
        Parameter::ALL.into_iter().map(|p| (p, self.options(p)))
    }

    /// Check that every list is non-empty and every token is a single word.
    ///
    /// A token must survive a whitespace split of its serialized line, so
    /// empty tokens and tokens containing whitespace are rejected.
    pub fn validate(&self) -> Result<()> {
        for (parameter, options) in self.lists() {
            if options.is_empty() {
                return Err(BenchError::EmptyOptions { parameter });
            }
            if let Some(token) = options
                .iter()
                .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
            {
                return Err(BenchError::InvalidToken {
                    parameter,
                    token: token.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of configurations in the full product.
    pub fn combination_count(&self) -> Result<usize> {
        self.validate()?;
        self.lists().try_fold(1usize, |acc, (_, options)| {
            acc.checked_mul(options.len())
                .ok_or(BenchError::CombinationOverflow)
        })
    }

    /// Iterate the full Cartesian product in declared order.
    pub fn configurations(&self) -> Result<CartesianProduct<'_>> {
        self.validate()?;
        let lists: Vec<&[String]> = self.lists().map(|(_, options)| options).collect();
        CartesianProduct::new(lists)
    }
}

// =============================================================================
// TESTS
// =============================================================================
