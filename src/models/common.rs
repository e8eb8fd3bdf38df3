use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend ids arrive as strings or integers depending on the table.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

/// `{success, message}` reply of test/sync/reset style endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OperationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OperationResult {
    /// 2xx replies without a `success` flag count as successful.
    pub fn from_reply(value: Value) -> Self {
        let explicit = value.get("success").and_then(Value::as_bool);
        let mut result: Self = serde_json::from_value(value).unwrap_or_default();
        result.success = explicit.unwrap_or(true);
        result
    }

    pub fn summary(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}
