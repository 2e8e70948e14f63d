//! # Runner
//!
//! Sequential execution of a configs file through a [`Launcher`].
//!
//! The runner owns the ordering and the failure policy; the launcher owns
//! the process. Every configuration is launched in file order and each
//! launch blocks until it completes.

use crate::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// LAUNCHER SEAM
// =============================================================================

/// Why a single configuration did not complete successfully.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LaunchFailure {
    /// The executable could not be started.
    #[error("could not start renderer: {0}")]
    Spawn(String),

    /// The renderer exited unsuccessfully. `None` means no exit code was
    /// available (killed by a signal).
    #[error("renderer exited with {}", describe_exit(.code))]
    Exit { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code".to_string(),
    }
}

/// Runs the renderer once for a configs file line.
///
/// `arguments` is the whitespace-stripped line. Implementations block until
/// the run completes.
pub trait Launcher {
    fn launch(&mut self, index: usize, arguments: &str) -> std::result::Result<(), LaunchFailure>;
}

impl<L: Launcher + ?Sized> Launcher for &mut L {
    fn launch(&mut self, index: usize, arguments: &str) -> std::result::Result<(), LaunchFailure> {
        (**self).launch(index, arguments)
    }
}

// =============================================================================
// FAILURE POLICY
// =============================================================================

/// What to do when a configuration fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep going; failures are recorded but the run still counts as
    /// successful.
    Ignore,
    /// Stop at the first failure.
    Halt,
    /// Keep going, then report the run as failed if anything failed.
    #[default]
    Collect,
}

impl FailurePolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FailurePolicy::Ignore => "ignore",
            FailurePolicy::Halt => "halt",
            FailurePolicy::Collect => "collect",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = BenchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(FailurePolicy::Ignore),
            "halt" => Ok(FailurePolicy::Halt),
            "collect" => Ok(FailurePolicy::Collect),
            other => Err(BenchError::UnknownPolicy(other.to_string())),
        }
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// A configuration that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    /// 0-based position in the configs file.
    pub index: usize,
    pub arguments: String,
    pub failure: LaunchFailure,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub policy: FailurePolicy,
    /// Configurations launched.
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<RunFailure>,
}

impl RunReport {
    fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            total: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether the run as a whole should be treated as failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.policy == FailurePolicy::Collect && !self.failures.is_empty()
    }
}

// =============================================================================
// RUNNER
// =============================================================================

/// Drives a launcher over configs file lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    policy: FailurePolicy,
}

impl Runner {
    #[must_use]
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// Launch every line in order.
    ///
    /// Under [`FailurePolicy::Halt`] the first failure is returned as
    /// [`BenchError::RunHalted`] and later lines are not launched.
    pub fn run<L>(&self, lines: &[String], mut launcher: L) -> Result<RunReport>
    where
        L: Launcher,
    {
        let mut report = RunReport::new(self.policy);

        for (index, arguments) in lines.iter().enumerate() {
            report.total = report.total.saturating_add(1);
            match launcher.launch(index, arguments) {
                Ok(()) => report.succeeded = report.succeeded.saturating_add(1),
                Err(failure) if self.policy == FailurePolicy::Halt => {
                    return Err(BenchError::RunHalted {
                        index,
                        arguments: arguments.clone(),
                        failure,
                    });
                }
                Err(failure) => report.failures.push(RunFailure {
                    index,
                    arguments: arguments.clone(),
                    failure,
                }),
            }
        }

        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================
