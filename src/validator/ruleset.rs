//! Rule set suppliers: rule-definition files and inline expressions.

use crate::error::{CelcheckError, Result};
use crate::validator::types::{
    INLINE_RULE_NAME, INLINE_RULE_SOURCE, Rule, RuleSet, TargetSelector,
};
use serde::Deserialize;
use std::path::Path;

/// One rule-definition document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleSetDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Load every rule set from a rule-definition file. Each YAML document in
/// the file yields one `RuleSet` tagged with the file as its source.
pub fn load_rule_file(path: &Path) -> Result<Vec<RuleSet>> {
    let file = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CelcheckError::RuleFileRead {
        file: file.clone(),
        detail: e.to_string(),
    })?;
    parse_rule_sets(&content, &file)
}

/// Parse rule-definition documents from a string.
pub fn parse_rule_sets(content: &str, source: &str) -> Result<Vec<RuleSet>> {
    let mut sets = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value =
            serde_yaml::Value::deserialize(document).map_err(|e| CelcheckError::RuleFileParse {
                file: source.to_string(),
                detail: e.to_string(),
            })?;
        if value.is_null() {
            continue;
        }

        let doc: RuleSetDoc =
            serde_yaml::from_value(value).map_err(|e| CelcheckError::RuleFileParse {
                file: source.to_string(),
                detail: e.to_string(),
            })?;

        let name = doc
            .name
            .unwrap_or_else(|| default_set_name(source, index));
        sets.push(RuleSet::new(name, source, doc.rules));
    }

    Ok(sets)
}

/// Wrap a CLI-supplied expression into a single synthetic rule set.
pub fn inline_rule_set(
    expression: &str,
    message: &str,
    target: Option<TargetSelector>,
) -> RuleSet {
    RuleSet::new(
        INLINE_RULE_NAME,
        INLINE_RULE_SOURCE,
        vec![Rule {
            name: INLINE_RULE_NAME.to_string(),
            expression: expression.to_string(),
            message: message.to_string(),
            target,
        }],
    )
}

fn default_set_name(source: &str, index: usize) -> String {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rules");
    if index == 0 {
        stem.to_string()
    } else {
        format!("{}-{}", stem, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_document() {
        let yaml = r#"
name: workload-policies
rules:
  - name: minimum-replicas
    expression: object.spec.replicas >= 3
    message: workloads must run at least 3 replicas
    target:
      kind: Deployment
"#;
        let sets = parse_rule_sets(yaml, "policies.yaml").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "workload-policies");
        assert_eq!(sets[0].source, "policies.yaml");
        assert_eq!(sets[0].rules.len(), 1);
        assert_eq!(sets[0].rules[0].name, "minimum-replicas");
        assert_eq!(
            sets[0].rules[0].target.as_ref().unwrap().kind,
            "Deployment"
        );
    }

    #[test]
    fn test_multi_document_yields_multiple_sets() {
        let yaml = r#"
rules:
  - name: first
    expression: "true"
---
rules:
  - name: second
    expression: "false"
"#;
        let sets = parse_rule_sets(yaml, "dir/policies.yaml").unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "policies");
        assert_eq!(sets[1].name, "policies-2");
        assert_eq!(sets[1].source, "dir/policies.yaml");
    }

    #[test]
    fn test_undecodable_document_is_an_error() {
        let yaml = "rules: definitely-not-a-list\n";
        let err = parse_rule_sets(yaml, "bad.yaml").unwrap_err();
        assert!(matches!(err, CelcheckError::RuleFileParse { .. }));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_rule_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, CelcheckError::RuleFileRead { .. }));
    }

    #[test]
    fn test_inline_rule_set() {
        let set = inline_rule_set("object.kind != \"Pod\"", "no bare pods", None);
        assert_eq!(set.name, "inline");
        assert_eq!(set.source, "<inline>");
        assert_eq!(set.rules.len(), 1);
        assert_eq!(set.rules[0].name, "inline");
        assert_eq!(set.rules[0].message, "no bare pods");
    }
}
