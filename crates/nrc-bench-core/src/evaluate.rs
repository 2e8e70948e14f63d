//! # Evaluation
//!
//! Post-run hook. Result aggregation is not implemented; the trait marks
//! where it plugs in.

use crate::runner::RunReport;
use crate::Result;

/// Consumes the report of a finished run.
pub trait Evaluator {
    fn evaluate(&mut self, report: &RunReport) -> Result<()>;
}

/// Accepts every report and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvaluator;

impl Evaluator for NoopEvaluator {
    fn evaluate(&mut self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}
