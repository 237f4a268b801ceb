use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Merge `overrides` into `base`. Objects merge key by key, recursively;
/// anything else in `overrides` replaces the value in `base` outright,
/// including when the two sides have different types.
pub fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// Read a JSON file that must hold an object (template payloads, overrides).
pub fn read_json_object(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if !value.is_object() {
        bail!("{} must contain a JSON object", path.display());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::{deep_merge, read_json_object};

    fn merged(mut base: serde_json::Value, overrides: serde_json::Value) -> serde_json::Value {
        deep_merge(&mut base, overrides);
        base
    }

    #[test]
    fn disjoint_keys_are_combined() {
        assert_eq!(merged(json!({"a": 1}), json!({"b": 2})), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        assert_eq!(
            merged(json!({"a": {"x": 1}}), json!({"a": {"y": 2}})),
            json!({"a": {"x": 1, "y": 2}})
        );
    }

    #[test]
    fn scalar_override_wins() {
        assert_eq!(merged(json!({"a": 1}), json!({"a": 2})), json!({"a": 2}));
    }

    #[test]
    fn mismatched_types_are_replaced_wholesale() {
        assert_eq!(
            merged(json!({"a": {"x": 1}}), json!({"a": [1, 2]})),
            json!({"a": [1, 2]})
        );
        assert_eq!(
            merged(json!({"a": [1, 2]}), json!({"a": {"x": 1}})),
            json!({"a": {"x": 1}})
        );
        assert_eq!(merged(json!({"a": 1}), json!({"a": null})), json!({"a": null}));
    }

    #[test]
    fn empty_overrides_are_a_no_op() {
        let base = json!({"guest": {"id": "g1"}, "items": [1]});
        assert_eq!(merged(base.clone(), json!({})), base);
    }

    #[test]
    fn rejects_non_object_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        let err = read_json_object(file.path()).unwrap_err();
        assert!(err.to_string().contains("must contain a JSON object"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"amount": 10}}"#).unwrap();
        assert_eq!(read_json_object(file.path()).unwrap(), json!({"amount": 10}));
    }
}
