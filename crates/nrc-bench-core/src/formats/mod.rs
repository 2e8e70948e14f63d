//! # Formats Module
//!
//! Text format of the configs file.
//!
//! This module contains:
//! - Line serialization (compact or legacy trailing-space)
//! - Whole-file rendering and parsing
//!
//! Note: File I/O operations remain in the app layer (apps/nrc-bench).
//! This module only handles format conversion (pure transformations).

mod config_lines;

pub use config_lines::*;
