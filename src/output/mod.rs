//! Output formatting module
//!
//! Provides various output formats for probe results.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
