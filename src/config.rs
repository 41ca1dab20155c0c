//! Configuration for validation runs.
//!
//! All run options live in one immutable value passed into the engine's
//! entry point; nothing is read from process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bound on concurrently evaluated input files.
pub const DEFAULT_MAX_WORKERS: usize = 128;

/// Configuration for the validation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum number of input files evaluated concurrently. Files beyond
    /// the budget queue until a slot frees.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// If true, report passing checks as well as failing ones.
    #[serde(default)]
    pub verbose: bool,

    /// If true, never signal overall failure to the caller.
    #[serde(default)]
    pub no_fail: bool,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            verbose: false,
            no_fail: false,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency bound. A value of zero is clamped to one.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Enable verbose reporting.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Never signal overall failure.
    pub fn with_no_fail(mut self, no_fail: bool) -> Self {
        self.no_fail = no_fail;
        self
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn load_from_str(content: &str) -> crate::Result<Self> {
        serde_yaml::from_str(content).map_err(|e| crate::CelcheckError::Config(e.to_string()))
    }

    /// Try to load config from default locations (.celcheck.yaml, .celcheck.yml).
    pub fn load_from_default() -> Option<Self> {
        for filename in &[".celcheck.yaml", ".celcheck.yml"] {
            let path = Path::new(filename);
            if path.exists() {
                if let Ok(config) = Self::load_from_file(path) {
                    return Some(config);
                }
            }
        }
        None
    }
}
