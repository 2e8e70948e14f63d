//! Line-oriented configs file: one configuration per line, tokens separated
//! by a single space.

use crate::{BenchError, Configuration, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LINE STYLE
// =============================================================================

/// How tokens are joined on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// `a b c`
    #[default]
    Compact,
    /// `a b c ` (every token followed by a space), byte-compatible with
    /// configs files produced by the older sweep scripts.
    TrailingSpace,
}

impl LineStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Compact => "compact",
            LineStyle::TrailingSpace => "trailing_space",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineStyle {
    type Err = BenchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compact" => Ok(LineStyle::Compact),
            "trailing_space" | "trailing-space" | "legacy" => Ok(LineStyle::TrailingSpace),
            other => Err(BenchError::UnknownLineStyle(other.to_string())),
        }
    }
}

// =============================================================================
// WRITING
// =============================================================================

/// Join tokens into a single line (no newline).
#[must_use]
pub fn serialize_tokens(tokens: &[String], style: LineStyle) -> String {
    match style {
        LineStyle::Compact => tokens.join(" "),
        LineStyle::TrailingSpace => {
            let mut line = String::new();
            for token in tokens {
                line.push_str(token);
                line.push(' ');
            }
            line
        }
    }
}

/// A rendered configs file and the number of lines it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfigs {
    pub text: String,
    pub count: usize,
}

/// Render configurations in order, one per `\n`-terminated line.
pub fn render_config_file<I>(configs: I, style: LineStyle) -> RenderedConfigs
where
    I: IntoIterator<Item = Configuration>,
{
    let mut text = String::new();
    let mut count = 0usize;
    for config in configs {
        text.push_str(&config.to_line(style));
        text.push('\n');
        count = count.saturating_add(1);
    }
    RenderedConfigs { text, count }
}

// =============================================================================
// READING
// =============================================================================

/// Split a configs file into whitespace-stripped lines, in file order.
///
/// A terminating newline does not produce an extra empty line. Blank lines
/// inside the file are kept as empty strings.
#[must_use]
pub fn parse_config_file(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Parse every line into a full configuration, failing on the first line
/// whose token count is not one per parameter.
pub fn check_config_file(text: &str) -> Result<Vec<Configuration>> {
    parse_config_file(text)
        .iter()
        .enumerate()
        .map(|(i, line)| Configuration::parse_full(line, i.saturating_add(1)))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
