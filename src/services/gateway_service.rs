use serde_json::Value;
use crate::error::{DashboardError, DashboardResult};
use crate::services::ApiClient;

const BASE: &str = "/api/gateway-config";

pub async fn load_config(api: &ApiClient) -> DashboardResult<Value> {
    let config: Value = api.get(BASE).await?;
    if !config.is_object() {
        return Err(DashboardError::Parse("Gateway config is not an object".to_string()));
    }
    Ok(config)
}

/// PATCH the changed keys; the reply is the updated config when the backend
/// sends one.
pub async fn patch_config(api: &ApiClient, changes: &Value) -> DashboardResult<Option<Value>> {
    let reply: Value = api.patch(BASE, changes).await?;
    Ok(reply.is_object().then_some(reply))
}

pub async fn reset_config(api: &ApiClient) -> DashboardResult<Value> {
    log::warn!("⚠️ [GATEWAY] Resetting configuration to defaults");
    let reply: Value = api.post_empty(&format!("{}/reset", BASE)).await?;
    // Some deployments wrap the defaults
    match reply {
        Value::Object(ref map) if map.get("config").map(Value::is_object).unwrap_or(false) => {
            Ok(map.get("config").cloned().unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
