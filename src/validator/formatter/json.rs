//! JSON formatter.

use crate::validator::report::RunSummary;
use crate::validator::types::ValidationResult;
use serde::Serialize;

/// Format results as pretty-printed JSON.
pub fn format(results: &[ValidationResult], summary: &RunSummary) -> String {
    let output = JsonOutput {
        results,
        summary: JsonSummary {
            total: summary.total,
            failed: summary.failed,
            failure_rate: summary.failure_rate(),
            passed: summary.passed(),
        },
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [ValidationResult],
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    total: usize,
    failed: usize,
    failure_rate: f64,
    passed: bool,
}
