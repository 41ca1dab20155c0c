//! The celcheck validation engine.
//!
//! Evaluates CEL rules against Kubernetes-shaped YAML documents:
//!
//! - Multi-document YAML resource loading
//! - CEL rule compilation with fail-fast, joined error reporting
//! - Target selectors (group/version/kind/name/namespace/labels/annotations)
//! - Cross-resource predicates over all resources of one file (`allObjects`)
//! - Bounded parallel evaluation across input files
//! - Deterministic, sorted reporting with pass/fail summary
//!
//! # Example
//!
//! ```rust,ignore
//! use celcheck::config::EngineConfig;
//! use celcheck::validator::{Validator, ruleset};
//!
//! let rules = vec![ruleset::inline_rule_set(
//!     "object.spec.replicas >= 3",
//!     "workloads must run at least 3 replicas",
//!     None,
//! )];
//! let validator = Validator::new(EngineConfig::default());
//! let run = validator.validate(&rules, &["k8s/deployment.yaml".to_string()])?;
//! ```

pub mod compiler;
pub mod evaluate;
pub mod formatter;
pub mod orchestrator;
pub mod report;
pub mod resource;
pub mod ruleset;
pub mod target;
pub mod types;
pub mod value;

// Re-export main types and functions
pub use compiler::{CompiledRule, compile_rule_sets};
pub use formatter::{OutputFormat, format_results_to_string};
pub use orchestrator::{CancelToken, ValidationRun, Validator};
pub use report::{RunSummary, sort_results, summarize};
pub use resource::{FsLoader, LoadError, Resource, ResourceLoader};
pub use types::{Rule, RuleSet, TargetSelector, ValidationResult};
