//! Per-file rule evaluation.
//!
//! One call covers every (resource, applicable rule) pair of a single input
//! file. Cross-resource predicates see the whole file through `allObjects`.

use crate::validator::compiler::CompiledRule;
use crate::validator::resource::{LoadError, Resource};
use crate::validator::types::ValidationResult;
use crate::validator::value::to_cel;
use cel::{Context, Value};
use log::trace;
use std::sync::Arc;

/// Sentinel error detail for rules that evaluated cleanly to `false`,
/// distinguishing a failed check from a crashed one.
pub const FALSE_MESSAGE: &str = "rule evaluated to false";

/// Evaluate every compiled rule against every resource of one file.
///
/// Pairs whose target selector does not match produce no result at all.
/// Outcome mapping for matching pairs:
/// - evaluation error: invalid, error detail wraps the evaluator's message
/// - `true`: valid
/// - `false`: invalid with the [`FALSE_MESSAGE`] sentinel (plus the rule's
///   own message, when it has one)
/// - any non-boolean value: valid; rules are allowed to return other values
///   and only a clean `false` fails a check
pub fn evaluate_file(
    input_file: &str,
    resources: &[Resource],
    rules: &[CompiledRule],
) -> Vec<ValidationResult> {
    // Built once per file and shared read-only by every evaluation.
    let all_objects = Value::List(Arc::new(resources.iter().map(|r| to_cel(&r.doc)).collect()));

    let mut results = Vec::new();
    for resource in resources {
        let object = to_cel(&resource.doc);
        let kind = resource.kind();
        let name = resource.display_name();

        for rule in rules {
            if let Some(target) = &rule.target {
                if !target.matches(resource) {
                    trace!(
                        "rule {:?} does not target {}/{} in {}",
                        rule.name, kind, name, input_file
                    );
                    continue;
                }
            }

            let mut ctx = Context::default();
            ctx.add_variable_from_value("object", object.clone());
            ctx.add_variable_from_value("allObjects", all_objects.clone());

            let result = match rule.program.execute(&ctx) {
                Ok(Value::Bool(true)) => ValidationResult::valid(
                    input_file,
                    &rule.source_file,
                    &rule.name,
                    kind,
                    name,
                ),
                Ok(Value::Bool(false)) => ValidationResult::invalid(
                    input_file,
                    &rule.source_file,
                    &rule.name,
                    kind,
                    name,
                    predicate_false_detail(&rule.message),
                ),
                Ok(_) => ValidationResult::valid(
                    input_file,
                    &rule.source_file,
                    &rule.name,
                    kind,
                    name,
                ),
                Err(e) => ValidationResult::invalid(
                    input_file,
                    &rule.source_file,
                    &rule.name,
                    kind,
                    name,
                    format!("evaluation error: {}", e),
                ),
            };
            results.push(result);
        }
    }
    results
}

/// The single result emitted for a file whose resources could not be
/// loaded. No per-rule evaluation happens for such a file.
pub fn load_error_result(input_file: &str, err: &LoadError) -> ValidationResult {
    ValidationResult::invalid(input_file, "", "", "", "", err.to_string())
}

fn predicate_false_detail(message: &str) -> String {
    if message.is_empty() {
        FALSE_MESSAGE.to_string()
    } else {
        format!("{}: {}", FALSE_MESSAGE, message)
    }
}
