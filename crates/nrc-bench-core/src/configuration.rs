//! # Configuration
//!
//! One element of the sweep product: one token per parameter.

use crate::formats::{LineStyle, serialize_tokens};
use crate::{BenchError, Parameter, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered tuple of tokens, one per parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    tokens: Vec<String>,
}

impl Configuration {
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Split a configs file line on whitespace.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self::new(line.split_whitespace().map(str::to_string).collect())
    }

    /// Split a line and require exactly one token per parameter.
    ///
    /// `line_number` is 1-based and only used for the error message.
    pub fn parse_full(line: &str, line_number: usize) -> Result<Self> {
        let config = Self::parse(line);
        if config.len() != Parameter::COUNT {
            return Err(BenchError::ArityMismatch {
                line: line_number,
                expected: Parameter::COUNT,
                found: config.len(),
            });
        }
        Ok(config)
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Token for a parameter, if the configuration is long enough.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> Option<&str> {
        self.tokens.get(parameter.position()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize as a configs file line, without the newline.
    #[must_use]
    pub fn to_line(&self, style: LineStyle) -> String {
        serialize_tokens(&self.tokens, style)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line(LineStyle::Compact))
    }
}

// =============================================================================
// TESTS
// =============================================================================
