//! Command handlers wiring the CLI surface to the validation engine.

use crate::cli::ReportFormat;
use crate::config::EngineConfig;
use crate::error::{CelcheckError, Result};
use crate::validator::types::{RuleSet, TargetSelector};
use crate::validator::{Validator, format_results_to_string, ruleset, sort_results, summarize};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Options for one `validate` invocation, collected from flags and config
/// files into a single immutable value.
#[derive(Debug, Default)]
pub struct ValidateOptions {
    pub paths: Vec<String>,
    pub rule_files: Vec<PathBuf>,
    pub expression: Option<String>,
    pub message: Option<String>,
    pub target: Option<TargetSelector>,
    pub max_workers: Option<usize>,
    pub format: ReportFormat,
    pub no_fail: bool,
    pub verbose: bool,
    pub config_file: Option<PathBuf>,
}

/// Run a validation and render the report.
///
/// Returns `Ok(true)` when the run succeeded (zero invalid results, or
/// `no_fail` is set), `Ok(false)` when checks failed.
pub fn handle_validate(options: ValidateOptions) -> Result<bool> {
    let config = resolve_config(&options)?;

    let rule_sets = collect_rule_sets(&options)?;
    if rule_sets.is_empty() {
        return Err(CelcheckError::Config(
            "no rules supplied; use --rules or --expression".to_string(),
        ));
    }

    let files = collect_input_files(&options.paths)?;
    if files.is_empty() {
        warn!("no input files matched the given paths");
    }

    let validator = Validator::new(config.clone());
    let run = validator.validate(&rule_sets, &files)?;

    let mut results = run.results;
    sort_results(&mut results);
    let summary = summarize(&results);

    print!(
        "{}",
        format_results_to_string(&results, &summary, config.verbose, options.format.into())
    );

    if run.cancelled {
        warn!("validation was cancelled; results are incomplete");
    }

    info!(
        "validated {} files: {} checks, {} failed",
        files.len(),
        summary.total,
        summary.failed
    );
    Ok(summary.passed() || config.no_fail)
}

/// List the rules parsed from rule-definition files.
pub fn handle_rules(rule_files: &[PathBuf]) -> Result<()> {
    for file in rule_files {
        for set in ruleset::load_rule_file(file)? {
            println!("{}: {} ({} rules)", set.source, set.name, set.rules.len());
            for rule in &set.rules {
                let target = rule
                    .target
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "<any>".to_string());
                println!("  - {} [{}] {}", rule.name, target, rule.message);
            }
        }
    }
    Ok(())
}

fn resolve_config(options: &ValidateOptions) -> Result<EngineConfig> {
    let mut config = match &options.config_file {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::load_from_default().unwrap_or_default(),
    };

    // Flags win over the config file.
    if let Some(max_workers) = options.max_workers {
        config = config.with_max_workers(max_workers);
    }
    if options.verbose {
        config = config.with_verbose(true);
    }
    if options.no_fail {
        config = config.with_no_fail(true);
    }
    Ok(config)
}

fn collect_rule_sets(options: &ValidateOptions) -> Result<Vec<RuleSet>> {
    let mut rule_sets = Vec::new();
    for file in &options.rule_files {
        rule_sets.extend(ruleset::load_rule_file(file)?);
    }
    if let Some(expression) = &options.expression {
        rule_sets.push(ruleset::inline_rule_set(
            expression,
            options.message.as_deref().unwrap_or(""),
            options.target.clone(),
        ));
    }
    Ok(rule_sets)
}

/// Expand path arguments into a sorted, deduplicated list of input files.
///
/// Directories expand to their `*.yaml`/`*.yml` files recursively; glob
/// patterns expand to their matches; anything else passes through verbatim
/// so a missing file surfaces as a per-file load failure, not a hard error.
fn collect_input_files(paths: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for path_arg in paths {
        let path = Path::new(path_arg);
        if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() {
                    let ext = entry_path.extension().and_then(|e| e.to_str());
                    if matches!(ext, Some("yaml") | Some("yml")) {
                        files.push(entry_path.display().to_string());
                    }
                }
            }
        } else if path_arg.contains(['*', '?', '[']) {
            let matches = glob::glob(path_arg).map_err(|e| CelcheckError::BadPattern {
                pattern: path_arg.clone(),
                detail: e.to_string(),
            })?;
            for entry in matches {
                match entry {
                    Ok(p) => files.push(p.display().to_string()),
                    Err(e) => warn!("skipping unreadable glob match: {}", e),
                }
            }
        } else {
            files.push(path_arg.clone());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_input_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), "kind: Pod\n").unwrap();
        std::fs::write(dir.path().join("b.yml"), "kind: Pod\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not yaml\n").unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("c.yaml"), "kind: Pod\n").unwrap();

        let files =
            collect_input_files(&[dir.path().display().to_string()]).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.ends_with(".yaml") || f.ends_with(".yml")));
    }

    #[test]
    fn test_collect_input_files_glob() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.yaml"), "kind: Pod\n").unwrap();
        std::fs::write(dir.path().join("two.yaml"), "kind: Pod\n").unwrap();

        let pattern = format!("{}/*.yaml", dir.path().display());
        let files = collect_input_files(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_input_files_sorted_and_deduped() {
        let files = collect_input_files(&[
            "b.yaml".to_string(),
            "a.yaml".to_string(),
            "b.yaml".to_string(),
        ])
        .unwrap();
        assert_eq!(files, vec!["a.yaml".to_string(), "b.yaml".to_string()]);
    }

    #[test]
    fn test_bad_glob_pattern() {
        let err = collect_input_files(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, CelcheckError::BadPattern { .. }));
    }

    #[test]
    fn test_validate_requires_rules() {
        let options = ValidateOptions {
            paths: vec!["a.yaml".to_string()],
            ..Default::default()
        };
        let err = handle_validate(options).unwrap_err();
        assert!(err.to_string().contains("no rules supplied"));
    }
}
