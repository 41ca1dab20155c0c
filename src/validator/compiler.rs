//! Rule compilation.
//!
//! Every rule expression is compiled up front, before any evaluation, and
//! every failure is reported together so the user gets feedback about all
//! broken rules in one pass.

use crate::error::{CompileErrors, CompileFailure};
use crate::validator::target::CompiledTarget;
use crate::validator::types::RuleSet;
use cel::Program;
use log::debug;

/// A rule ready for evaluation.
///
/// Built exactly once per run. The program carries no mutable evaluation
/// state, so one `CompiledRule` may be evaluated from many threads at once.
pub struct CompiledRule {
    pub source_file: String,
    pub name: String,
    pub message: String,
    pub target: Option<CompiledTarget>,
    pub program: Program,
}

impl std::fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledRule")
            .field("source_file", &self.source_file)
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Compile every rule of every rule set.
///
/// Rule expressions see exactly two bindings: `object` (the resource under
/// test) and `allObjects` (every resource from the same input file, in
/// document order). Target selectors are compiled in the same pass.
///
/// Returns either the full compiled list or the joined set of every
/// compilation failure; on error no programs are produced and callers must
/// not evaluate anything.
pub fn compile_rule_sets(rule_sets: &[RuleSet]) -> Result<Vec<CompiledRule>, CompileErrors> {
    let mut compiled = Vec::new();
    let mut failures = Vec::new();

    for set in rule_sets {
        for rule in &set.rules {
            let mut rule_failed = false;

            let program = match Program::compile(&rule.expression) {
                Ok(program) => Some(program),
                Err(e) => {
                    rule_failed = true;
                    failures.push(CompileFailure {
                        source: set.source.clone(),
                        rule: rule.name.clone(),
                        detail: e.to_string(),
                    });
                    None
                }
            };

            let target = match &rule.target {
                Some(selector) => match CompiledTarget::compile(selector) {
                    Ok(target) => Some(target),
                    Err(detail) => {
                        rule_failed = true;
                        failures.push(CompileFailure {
                            source: set.source.clone(),
                            rule: rule.name.clone(),
                            detail,
                        });
                        None
                    }
                },
                None => None,
            };

            if rule_failed {
                continue;
            }
            let Some(program) = program else {
                continue;
            };
            debug!("compiled rule {:?} from {}", rule.name, set.source);
            compiled.push(CompiledRule {
                source_file: set.source.clone(),
                name: rule.name.clone(),
                message: rule.message.clone(),
                target,
                program,
            });
        }
    }

    if failures.is_empty() {
        Ok(compiled)
    } else {
        Err(CompileErrors::new(failures))
    }
}
