//! Core types for the celcheck validator.
//!
//! - `Rule` / `RuleSet` - user-supplied rule definitions
//! - `TargetSelector` - restricts which resources a rule is evaluated against
//! - `ValidationResult` - one verdict per (file, resource, applicable rule)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Provenance sentinel for rules supplied on the command line rather than
/// loaded from a rule file.
pub const INLINE_RULE_SOURCE: &str = "<inline>";

/// Name given to the synthetic rule built from an inline expression.
pub const INLINE_RULE_NAME: &str = "inline";

/// Reported resource name for resources without `metadata.name`.
pub const UNNAMED_RESOURCE: &str = "<unnamed>";

/// A named CEL predicate with a human-readable failure message and an
/// optional applicability filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Rule name. Should be unique within one rule set for unambiguous
    /// reporting; uniqueness across rule sets is not required.
    pub name: String,
    /// The CEL expression evaluated per resource.
    pub expression: String,
    /// Message shown alongside failures of this rule.
    #[serde(default)]
    pub message: String,
    /// Optional selector restricting which resources this rule applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSelector>,
}

/// A named collection of rules with a provenance identifier.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    /// Logical name of the collection.
    pub name: String,
    /// The file the rules came from, or [`INLINE_RULE_SOURCE`].
    pub source: String,
    /// The rules, in declaration order.
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, source: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            rules,
        }
    }
}

/// Match criteria restricting which resources a rule is evaluated against.
///
/// An empty field matches any value for that field. `kind` and `name` are
/// regular expressions (find semantics); `group`, `version` and `namespace`
/// are compared exactly; the selector fields use `key=value[,key2=value2]`
/// syntax with all terms ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetSelector {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub label_selector: String,
    pub annotation_selector: String,
}

impl TargetSelector {
    /// True when every field is empty, i.e. the selector matches everything.
    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
            && self.version.is_empty()
            && self.kind.is_empty()
            && self.name.is_empty()
            && self.namespace.is_empty()
            && self.label_selector.is_empty()
            && self.annotation_selector.is_empty()
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<String> = Vec::new();
        for (field, value) in [
            ("group", &self.group),
            ("version", &self.version),
            ("kind", &self.kind),
            ("name", &self.name),
            ("namespace", &self.namespace),
            ("labels", &self.label_selector),
            ("annotations", &self.annotation_selector),
        ] {
            if !value.is_empty() {
                terms.push(format!("{}={}", field, value));
            }
        }
        if terms.is_empty() {
            write!(f, "<any>")
        } else {
            write!(f, "{}", terms.join(" "))
        }
    }
}

/// The verdict for one (input file, resource, rule) triple, or for a file
/// that failed to load (in which case `rule_file`/`rule_name` are empty).
///
/// Created once during evaluation, immutable thereafter, consumed only by
/// the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub input_file: String,
    pub rule_file: String,
    pub rule_name: String,
    pub resource_kind: String,
    pub resource_name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ValidationResult {
    /// A passing verdict.
    pub fn valid(
        input_file: impl Into<String>,
        rule_file: impl Into<String>,
        rule_name: impl Into<String>,
        resource_kind: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            rule_file: rule_file.into(),
            rule_name: rule_name.into(),
            resource_kind: resource_kind.into(),
            resource_name: resource_name.into(),
            valid: true,
            err: None,
        }
    }

    /// A failing verdict with error detail.
    pub fn invalid(
        input_file: impl Into<String>,
        rule_file: impl Into<String>,
        rule_name: impl Into<String>,
        resource_kind: impl Into<String>,
        resource_name: impl Into<String>,
        err: impl Into<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            rule_file: rule_file.into(),
            rule_name: rule_name.into(),
            resource_kind: resource_kind.into(),
            resource_name: resource_name.into(),
            valid: false,
            err: Some(err.into()),
        }
    }

    /// `kind/name` identifier for display.
    pub fn resource_identifier(&self) -> String {
        format!("{}/{}", self.resource_kind, self.resource_name)
    }
}

impl Ord for ValidationResult {
    fn cmp(&self, other: &Self) -> Ordering {
        // Sort by input file, then rule file, then resource identity, then
        // rule name, so repeated runs render byte-identically.
        self.input_file
            .cmp(&other.input_file)
            .then_with(|| self.rule_file.cmp(&other.rule_file))
            .then_with(|| self.resource_kind.cmp(&other.resource_kind))
            .then_with(|| self.resource_name.cmp(&other.resource_name))
            .then_with(|| self.rule_name.cmp(&other.rule_name))
    }
}

impl PartialOrd for ValidationResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
