//! Validation orchestration: compile once, fan out per file, merge.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::validator::compiler::compile_rule_sets;
use crate::validator::evaluate::{evaluate_file, load_error_result};
use crate::validator::resource::{FsLoader, ResourceLoader};
use crate::validator::types::{RuleSet, ValidationResult};
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal for a running validation.
///
/// Cancelling stops new file-evaluation tasks from starting; in-flight
/// tasks complete and keep their results, and the run is flagged
/// incomplete so the caller is told the merged results are partial.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The merged outcome of one validation run.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    /// Every verdict produced, in no particular order; the reporter imposes
    /// the deterministic order.
    pub results: Vec<ValidationResult>,
    /// True when the run was cancelled and the results are incomplete.
    pub cancelled: bool,
}

impl ValidationRun {
    fn empty(cancelled: bool) -> Self {
        Self {
            results: Vec::new(),
            cancelled,
        }
    }
}

/// Runs compiled rules over input files with bounded concurrency.
pub struct Validator {
    config: EngineConfig,
    loader: Arc<dyn ResourceLoader>,
    cancel: CancelToken,
}

impl Validator {
    /// A validator reading resources from the filesystem.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_loader(config, Arc::new(FsLoader))
    }

    /// A validator with a substitute resource loader.
    pub fn with_loader(config: EngineConfig, loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            config,
            loader,
            cancel: CancelToken::new(),
        }
    }

    /// Handle for cancelling this validator's runs from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Validate every file against every rule set.
    ///
    /// Compilation happens first and gates the whole run: any compile error
    /// aborts with zero results. Each file is then evaluated as an
    /// independent task on a pool of at most `max_workers` threads; a
    /// file's load failure becomes one invalid result without affecting
    /// the other files. An empty file list or empty rule set is a
    /// legitimate degenerate run yielding an empty collection.
    pub fn validate(&self, rule_sets: &[RuleSet], files: &[String]) -> Result<ValidationRun> {
        let rules = compile_rule_sets(rule_sets)?;

        if rules.is_empty() || files.is_empty() {
            debug!(
                "nothing to validate ({} rules, {} files)",
                rules.len(),
                files.len()
            );
            return Ok(ValidationRun::empty(self.cancel.is_cancelled()));
        }

        let workers = self.config.max_workers.clamp(1, files.len());
        debug!(
            "validating {} files against {} rules on {} workers",
            files.len(),
            rules.len(),
            workers
        );

        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

        let rules = &rules;
        let loader = &self.loader;
        let cancel = &self.cancel;
        let nested: Vec<Vec<ValidationResult>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    if cancel.is_cancelled() {
                        debug!("skipping {} after cancellation", file);
                        return Vec::new();
                    }
                    match loader.load(file) {
                        Ok(resources) => evaluate_file(file, &resources, rules),
                        Err(err) => {
                            warn!("{}", err);
                            vec![load_error_result(file, &err)]
                        }
                    }
                })
                .collect()
        });

        Ok(ValidationRun {
            results: nested.into_iter().flatten().collect(),
            cancelled: self.cancel.is_cancelled(),
        })
    }
}
