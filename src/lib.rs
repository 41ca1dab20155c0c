//! # Celcheck
//!
//! A Rust-based command-line tool that validates Kubernetes manifests
//! against user-supplied CEL rules and reports per-resource, per-rule
//! verdicts.
//!
//! ## Features
//!
//! - **CEL rules**: each rule is a CEL expression evaluated with `object`
//!   (the resource under test) and `allObjects` (every resource from the
//!   same file) in scope
//! - **Target selectors**: restrict rules by group, version, kind, name,
//!   namespace, labels or annotations
//! - **Fail-fast compilation**: every broken rule is reported in one pass,
//!   and nothing is evaluated until all rules compile
//! - **Bounded parallelism**: input files are validated concurrently under
//!   a configurable worker budget with deterministic reported output
//!
//! ## Example
//!
//! ```rust,no_run
//! use celcheck::EngineConfig;
//! use celcheck::validator::{Validator, ruleset};
//!
//! # fn main() -> celcheck::Result<()> {
//! let rules = vec![ruleset::inline_rule_set(
//!     "object.spec.replicas >= 3",
//!     "workloads must run at least 3 replicas",
//!     None,
//! )];
//! let validator = Validator::new(EngineConfig::default());
//! let run = validator.validate(&rules, &["k8s/deployment.yaml".to_string()])?;
//! for result in &run.results {
//!     println!("{}: {}", result.resource_identifier(), result.valid);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod validator;

// Re-export commonly used types and functions
pub use config::EngineConfig;
pub use error::{CelcheckError, CompileErrors, CompileFailure, Result};
pub use validator::{
    CancelToken, Rule, RuleSet, TargetSelector, ValidationResult, ValidationRun, Validator,
};

use cli::{Cli, Commands};
use handlers::ValidateOptions;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute a parsed CLI invocation.
///
/// Returns `Ok(false)` when validation ran but checks failed, so the
/// binary can map that to a non-zero exit code.
pub fn run_command(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Validate {
            paths,
            rules,
            expression,
            message,
            target,
            max_workers,
            format,
            no_fail,
        } => handlers::handle_validate(ValidateOptions {
            paths,
            rule_files: rules,
            expression,
            message,
            target: target.to_selector(),
            max_workers,
            format,
            no_fail,
            verbose: cli.verbose > 0,
            config_file: cli.config,
        }),
        Commands::Rules { rules } => {
            handlers::handle_rules(&rules)?;
            Ok(true)
        }
    }
}
