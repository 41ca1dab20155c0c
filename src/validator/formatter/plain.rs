//! Plain text formatter.

use crate::validator::report::RunSummary;
use crate::validator::types::ValidationResult;
use colored::Colorize;

/// Format results as plain text.
///
/// Failures always render; passes render only in verbose mode. Expects the
/// results to be sorted already.
pub fn format(results: &[ValidationResult], summary: &RunSummary, verbose: bool) -> String {
    let mut output = String::new();

    for result in results {
        if result.valid {
            if verbose {
                output.push_str(&format!(
                    "{}: [{}] {} ({})\n",
                    result.input_file,
                    "PASS".green(),
                    result.rule_name,
                    result.resource_identifier(),
                ));
            }
            continue;
        }

        let detail = result.err.as_deref().unwrap_or("invalid");
        if result.rule_name.is_empty() {
            // A file that failed to load has no rule or resource context.
            output.push_str(&format!(
                "{}: [{}] {}\n",
                result.input_file,
                "FAIL".red(),
                detail,
            ));
        } else {
            output.push_str(&format!(
                "{}: [{}] {} ({}) - {}\n",
                result.input_file,
                "FAIL".red(),
                result.rule_name,
                result.resource_identifier(),
                detail,
            ));
        }
    }

    if summary.failed > 0 {
        output.push_str(&format!(
            "\n{}/{} checks failed ({:.1}% failure rate)\n",
            summary.failed,
            summary.total,
            summary.failure_rate(),
        ));
    } else if summary.total > 0 {
        output.push_str(&format!("All {} checks passed.\n", summary.total));
    } else {
        output.push_str("No checks were run.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::report::summarize;

    fn sample() -> Vec<ValidationResult> {
        vec![
            ValidationResult::valid("a.yaml", "rules.yaml", "ok-rule", "Pod", "web"),
            ValidationResult::invalid(
                "a.yaml",
                "rules.yaml",
                "replicas",
                "Deployment",
                "web",
                "rule evaluated to false",
            ),
        ]
    }

    #[test]
    fn test_non_verbose_hides_passes() {
        let results = sample();
        let rendered = format(&results, &summarize(&results), false);
        assert!(rendered.contains("replicas (Deployment/web) - rule evaluated to false"));
        assert!(!rendered.contains("ok-rule"));
        assert!(rendered.contains("1/2 checks failed (50.0% failure rate)"));
    }

    #[test]
    fn test_verbose_shows_passes() {
        let results = sample();
        let rendered = format(&results, &summarize(&results), true);
        assert!(rendered.contains("ok-rule (Pod/web)"));
    }

    #[test]
    fn test_all_passed_has_no_percentage_line() {
        let results = vec![ValidationResult::valid("a.yaml", "r.yaml", "r", "Pod", "web")];
        let rendered = format(&results, &summarize(&results), false);
        assert!(rendered.contains("All 1 checks passed."));
        assert!(!rendered.contains("failure rate"));
    }

    #[test]
    fn test_load_failure_renders_without_rule_context() {
        let results = vec![ValidationResult::invalid(
            "bad.yaml",
            "",
            "",
            "",
            "",
            "failed to read bad.yaml: permission denied",
        )];
        let rendered = format(&results, &summarize(&results), false);
        assert!(rendered.contains("bad.yaml: ["));
        assert!(rendered.contains("failed to read bad.yaml: permission denied"));
        assert!(!rendered.contains("(/)"));
    }

    #[test]
    fn test_empty_run() {
        let rendered = format(&[], &summarize(&[]), false);
        assert!(rendered.contains("No checks were run."));
    }
}
