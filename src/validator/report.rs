//! Result aggregation: deterministic ordering, counts, overall verdict.

use crate::validator::types::ValidationResult;
use serde::Serialize;

/// Aggregate statistics over a run's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Total checks evaluated.
    pub total: usize,
    /// Checks that came back invalid.
    pub failed: usize,
}

impl RunSummary {
    /// Overall verdict: success iff nothing failed.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }

    /// Failure percentage over all checks.
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 * 100.0 / self.total as f64
        }
    }
}

/// Sort results into the deterministic reporting order (input file, rule
/// file, resource identity, rule name) so repeated runs over the same
/// inputs render byte-identically regardless of worker scheduling.
pub fn sort_results(results: &mut [ValidationResult]) {
    results.sort();
}

/// Count totals and failures.
pub fn summarize(results: &[ValidationResult]) -> RunSummary {
    RunSummary {
        total: results.len(),
        failed: results.iter().filter(|r| !r.valid).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let results = vec![
            ValidationResult::valid("a.yaml", "r.yaml", "r1", "Pod", "a"),
            ValidationResult::invalid("a.yaml", "r.yaml", "r2", "Pod", "a", "nope"),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.passed());
    }

    #[test]
    fn test_failure_percentage_one_of_two() {
        let summary = RunSummary { total: 2, failed: 1 };
        assert_eq!(format!("{:.1}", summary.failure_rate()), "50.0");
    }

    #[test]
    fn test_failure_percentage_all_failed() {
        let summary = RunSummary { total: 3, failed: 3 };
        assert_eq!(format!("{:.1}", summary.failure_rate()), "100.0");
    }

    #[test]
    fn test_empty_run_passes() {
        let summary = summarize(&[]);
        assert!(summary.passed());
        assert_eq!(summary.failure_rate(), 0.0);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let mut first = vec![
            ValidationResult::valid("b.yaml", "r.yaml", "r1", "Pod", "x"),
            ValidationResult::valid("a.yaml", "s.yaml", "r1", "Pod", "x"),
            ValidationResult::valid("a.yaml", "r.yaml", "r2", "Pod", "x"),
            ValidationResult::valid("a.yaml", "r.yaml", "r1", "Deployment", "x"),
        ];
        let mut second: Vec<_> = first.iter().rev().cloned().collect();

        sort_results(&mut first);
        sort_results(&mut second);
        assert_eq!(first, second);
        assert_eq!(first[0].resource_kind, "Deployment");
        assert_eq!(first[3].input_file, "b.yaml");
    }
}
