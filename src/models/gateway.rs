// ============================================================================
// GATEWAY CONFIG - Typed form fields over a free-form JSON object
// ============================================================================
// The backend owns the schema: whatever object it returns is flattened into
// `section.key` fields, and a save PATCHes back only the keys whose coerced
// value differs from what was loaded.
// ============================================================================

use std::collections::BTreeMap;
use serde_json::{Map, Number, Value};
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Toggle,
    Number,
    Text,
    /// Arrays, edited as raw JSON.
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayField {
    /// Dotted path, e.g. `mqtt.port`.
    pub key: String,
    pub value: Value,
}

impl GatewayField {
    pub fn kind(&self) -> FieldKind {
        match self.value {
            Value::Bool(_) => FieldKind::Toggle,
            Value::Number(_) => FieldKind::Number,
            Value::Array(_) | Value::Object(_) => FieldKind::Json,
            Value::String(_) | Value::Null => FieldKind::Text,
        }
    }

    pub fn section(&self) -> Option<&str> {
        self.key.rsplit_once('.').map(|(section, _)| section)
    }

    /// `retry_limit` -> `Retry limit`
    pub fn label(&self) -> String {
        let leaf = self.key.rsplit('.').next().unwrap_or(&self.key);
        let words = leaf.replace(['_', '-'], " ");
        let mut chars = words.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Value as it goes into the input's `value` attribute.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Leaf fields of a config object, nested objects flattened with dots.
pub fn flatten(config: &Value) -> Vec<GatewayField> {
    let mut fields = Vec::new();
    if let Value::Object(map) = config {
        flatten_into(map, "", &mut fields);
    }
    fields
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<GatewayField>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(inner, &path, out),
            other => out.push(GatewayField { key: path, value: other.clone() }),
        }
    }
}

/// Convert a submitted form string back to the JSON type of `original`.
/// `None` means the input was absent (an unchecked checkbox).
pub fn coerce(key: &str, original: &Value, raw: Option<&str>) -> DashboardResult<Value> {
    match original {
        Value::Bool(_) => Ok(Value::Bool(matches!(raw, Some("on") | Some("true") | Some("1")))),
        Value::Number(n) => {
            let Some(raw) = raw.map(str::trim) else {
                return Ok(original.clone());
            };
            let invalid = || DashboardError::validation(format!("{} must be a number", key));
            if n.is_f64() {
                raw.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(invalid)
            } else if let Ok(int) = raw.parse::<i64>() {
                Ok(Value::Number(int.into()))
            } else {
                raw.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(invalid)
            }
        }
        Value::String(_) => Ok(raw.map(|s| Value::String(s.to_string())).unwrap_or_else(|| original.clone())),
        Value::Null => Ok(match raw.map(str::trim) {
            Some(s) if !s.is_empty() => Value::String(s.to_string()),
            _ => Value::Null,
        }),
        Value::Array(_) | Value::Object(_) => match raw {
            Some(s) => serde_json::from_str(s)
                .map_err(|_| DashboardError::validation(format!("{} must be valid JSON", key))),
            None => Ok(original.clone()),
        },
    }
}

/// `1883` and `1883.0` are the same setting.
fn same_value(submitted: &Value, original: &Value) -> bool {
    match (submitted.as_f64(), original.as_f64()) {
        (Some(a), Some(b)) if submitted.is_number() && original.is_number() => a == b,
        _ => submitted == original,
    }
}

/// Dotted keys whose submitted value differs from the loaded config.
pub fn changed_fields(
    config: &Value,
    submitted: &BTreeMap<String, String>,
) -> DashboardResult<BTreeMap<String, Value>> {
    let mut changes = BTreeMap::new();
    for field in flatten(config) {
        let raw = submitted.get(&field.key).map(String::as_str);
        let value = coerce(&field.key, &field.value, raw)?;
        if !same_value(&value, &field.value) {
            changes.insert(field.key, value);
        }
    }
    Ok(changes)
}

/// Rebuild the nested object shape the backend expects for a PATCH.
pub fn unflatten(changes: &BTreeMap<String, Value>) -> Value {
    let mut root = Map::new();
    for (key, value) in changes {
        let mut cursor = &mut root;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                cursor.insert(part.to_string(), value.clone());
                break;
            }
            let slot = cursor
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            cursor = match slot {
                Value::Object(map) => map,
                _ => break,
            };
        }
    }
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Value {
        json!({
            "name": "hall",
            "debug": true,
            "mqtt": {"port": 1883, "qos": 0.5, "topics": ["a"]},
            "note": null
        })
    }

    fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn flattens_nested_sections() {
        let keys: Vec<_> = flatten(&config()).into_iter().map(|f| f.key).collect();
        assert!(keys.contains(&"mqtt.port".to_string()));
        assert!(keys.contains(&"mqtt.topics".to_string()));
        assert!(!keys.contains(&"mqtt".to_string()));
    }

    #[test]
    fn kinds_and_labels() {
        let field = GatewayField { key: "mqtt.retry_limit".into(), value: json!(3) };
        assert_eq!(field.kind(), FieldKind::Number);
        assert_eq!(field.label(), "Retry limit");
        assert_eq!(field.section(), Some("mqtt"));
    }

    #[test]
    fn unchanged_form_yields_no_changes() {
        let submitted = form(&[
            ("name", "hall"),
            ("debug", "on"),
            ("mqtt.port", "1883"),
            ("mqtt.qos", "0.5"),
            ("mqtt.topics", "[\"a\"]"),
            ("note", ""),
        ]);
        assert!(changed_fields(&config(), &submitted).unwrap().is_empty());
    }

    #[test]
    fn unchecked_checkbox_and_number_change() {
        let submitted = form(&[("name", "hall"), ("mqtt.port", "8883")]);
        let changes = changed_fields(&config(), &submitted).unwrap();
        assert_eq!(changes.get("debug"), Some(&json!(false)));
        assert_eq!(changes.get("mqtt.port"), Some(&json!(8883)));
        assert_eq!(
            unflatten(&changes),
            json!({"debug": false, "mqtt": {"port": 8883}})
        );
    }

    #[test]
    fn integer_written_as_float_is_unchanged() {
        let submitted = form(&[("name", "hall"), ("debug", "on"), ("mqtt.port", "1883.0"), ("mqtt.qos", "0.50")]);
        assert!(changed_fields(&config(), &submitted).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_number_is_validation_error() {
        let submitted = form(&[("mqtt.port", "eighty")]);
        let err = changed_fields(&config(), &submitted).unwrap_err();
        assert_eq!(err, DashboardError::validation("mqtt.port must be a number"));
    }
}
