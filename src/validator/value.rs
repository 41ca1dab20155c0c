//! Conversion from parsed YAML documents into CEL values.

use cel::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Convert a `serde_yaml::Value` into a `cel::Value`.
///
/// Integers become CEL `int` whenever they fit in an `i64` so rule literals
/// like `>= 3` compare without type surprises; anything larger degrades to
/// `double`. Non-string mapping keys are stringified.
pub fn to_cel(value: &serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_yaml::Value::String(s) => Value::String(Arc::new(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            Value::List(Arc::new(seq.iter().map(to_cel).collect()))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut entries: HashMap<String, Value> = HashMap::with_capacity(mapping.len());
            for (key, val) in mapping {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                entries.insert(key, to_cel(val));
            }
            Value::Map(entries.into())
        }
        serde_yaml::Value::Tagged(tagged) => to_cel(&tagged.value),
    }
}
