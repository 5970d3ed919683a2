pub mod formatter;

pub use formatter::Formatter;

use crate::api::{RequestOutcome, ResolutionResult};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format a register response based on the specified format
pub fn format_outcome(outcome: &RequestOutcome, format: OutputFormat) -> Result<String> {
    Formatter::new(format).format_outcome(outcome)
}

/// Format a resolution based on the specified format
pub fn format_resolution(
    query: &str,
    result: &ResolutionResult,
    format: OutputFormat,
) -> Result<String> {
    Formatter::new(format).format_resolution(query, result)
}
