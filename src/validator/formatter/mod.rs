//! Output formatters for validation results.

pub mod json;
pub mod plain;

use crate::validator::report::RunSummary;
use crate::validator::types::ValidationResult;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parse from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Format sorted results to a string.
pub fn format_results_to_string(
    results: &[ValidationResult],
    summary: &RunSummary,
    verbose: bool,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Plain => plain::format(results, summary, verbose),
        OutputFormat::Json => json::format(results, summary),
    }
}
