//! Target matching: decides whether a rule applies to a resource.

use crate::validator::resource::Resource;
use crate::validator::types::TargetSelector;
use regex::Regex;

/// A pre-compiled [`TargetSelector`] for fast, repeated matching.
///
/// Compilation happens once per rule, alongside expression compilation, so
/// a bad pattern fails the run before anything is evaluated.
#[derive(Debug)]
pub struct CompiledTarget {
    group: String,
    version: String,
    namespace: String,
    kind: Option<Regex>,
    name: Option<Regex>,
    labels: Vec<(String, String)>,
    annotations: Vec<(String, String)>,
}

impl CompiledTarget {
    pub fn compile(selector: &TargetSelector) -> Result<Self, String> {
        Ok(Self {
            group: selector.group.clone(),
            version: selector.version.clone(),
            namespace: selector.namespace.clone(),
            kind: compile_pattern(&selector.kind, "kind")?,
            name: compile_pattern(&selector.name, "name")?,
            labels: parse_selector_terms(&selector.label_selector, "label selector")?,
            annotations: parse_selector_terms(&selector.annotation_selector, "annotation selector")?,
        })
    }

    /// True when every non-empty selector field matches the resource.
    ///
    /// Pure function of the selector and the resource.
    pub fn matches(&self, resource: &Resource) -> bool {
        let (group, version) = resource.group_version();
        if !self.group.is_empty() && self.group != group {
            return false;
        }
        if !self.version.is_empty() && self.version != version {
            return false;
        }
        if !self.namespace.is_empty() && resource.namespace() != Some(self.namespace.as_str()) {
            return false;
        }
        if let Some(kind) = &self.kind {
            if !kind.is_match(resource.kind()) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !name.is_match(resource.name().unwrap_or("")) {
                return false;
            }
        }
        for (key, value) in &self.labels {
            if resource.metadata_entry("labels", key) != Some(value.as_str()) {
                return false;
            }
        }
        for (key, value) in &self.annotations {
            if resource.metadata_entry("annotations", key) != Some(value.as_str()) {
                return false;
            }
        }
        true
    }
}

fn compile_pattern(pattern: &str, field: &str) -> Result<Option<Regex>, String> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|e| format!("invalid {} pattern: {}", field, e))
}

/// Parse `key=value[,key2=value2,...]` selector syntax. All terms are ANDed
/// by the matcher.
fn parse_selector_terms(selector: &str, field: &str) -> Result<Vec<(String, String)>, String> {
    if selector.is_empty() {
        return Ok(Vec::new());
    }

    selector
        .split(',')
        .map(|term| {
            let term = term.trim();
            match term.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.trim().to_string()))
                }
                _ => Err(format!(
                    "invalid {} term {:?}: expected key=value",
                    field, term
                )),
            }
        })
        .collect()
}
