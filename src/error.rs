//! Error types for celcheck.

use std::fmt;
use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CelcheckError>;

/// Top-level error type for celcheck operations.
#[derive(Debug, Error)]
pub enum CelcheckError {
    /// One or more rules failed to compile. Fatal to the whole run;
    /// nothing is evaluated when this is returned.
    #[error("rule compilation failed:\n{0}")]
    Compile(#[from] CompileErrors),

    #[error("failed to read rule file {file}: {detail}")]
    RuleFileRead { file: String, detail: String },

    #[error("failed to parse rule file {file}: {detail}")]
    RuleFileParse { file: String, detail: String },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid glob pattern {pattern}: {detail}")]
    BadPattern { pattern: String, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single rule that failed to compile.
#[derive(Debug, Clone)]
pub struct CompileFailure {
    /// Provenance of the rule (rule file path, or `<inline>`).
    pub source: String,
    /// Name of the failing rule.
    pub rule: String,
    /// Compiler diagnostic.
    pub detail: String,
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: rule {:?}: {}", self.source, self.rule, self.detail)
    }
}

/// Every compilation failure from a run, joined so the user gets full
/// feedback about all broken rules in one pass.
#[derive(Debug, Clone)]
pub struct CompileErrors {
    pub failures: Vec<CompileFailure>,
}

impl CompileErrors {
    pub fn new(failures: Vec<CompileFailure>) -> Self {
        Self { failures }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}
