// ============================================================================
// GUEST SERVICE - Anonymous device/session bootstrap
// ============================================================================

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;
use crate::error::DashboardResult;
use crate::models::{GuestProfile, UserContext, UserSessionStart};
use crate::services::ApiClient;
use crate::utils::storage::{load_json, save_json, KeyValueStorage};
use crate::utils::{DEVICE_ID_KEY, SESSION_ID_KEY, USER_CONTEXT_KEY};

/// Persistent per-browser id, created on first use.
pub fn ensure_device_id(storage: &dyn KeyValueStorage) -> String {
    if let Some(existing) = storage.get(DEVICE_ID_KEY).filter(|id| !id.trim().is_empty()) {
        return existing;
    }
    let device_id = Uuid::new_v4().to_string();
    if let Err(e) = storage.set(DEVICE_ID_KEY, &device_id) {
        log::warn!("⚠️ [GUEST] Could not persist device id: {}", e);
    }
    log::info!("🆕 [GUEST] New device {}", device_id);
    device_id
}

/// Fresh id for this page load.
pub fn start_session_id(storage: &dyn KeyValueStorage) -> String {
    let session_id = Uuid::new_v4().to_string();
    if let Err(e) = storage.set(SESSION_ID_KEY, &session_id) {
        log::warn!("⚠️ [GUEST] Could not persist session id: {}", e);
    }
    session_id
}

pub fn stored_context(storage: &dyn KeyValueStorage) -> Option<UserContext> {
    load_json(storage, USER_CONTEXT_KEY)
}

pub fn clear_guest_keys(storage: &dyn KeyValueStorage) {
    for key in [DEVICE_ID_KEY, SESSION_ID_KEY, USER_CONTEXT_KEY] {
        storage.remove(key);
    }
}

/// Register this visit and cache what the backend knows about the device.
///
/// The context is saved even when the backend calls fail, with `guest`
/// left empty.
pub async fn bootstrap(
    api: &ApiClient,
    storage: &dyn KeyValueStorage,
    user_agent: Option<String>,
    now: DateTime<Utc>,
) -> DashboardResult<UserContext> {
    let device_id = ensure_device_id(storage);
    let session_id = start_session_id(storage);

    let start = UserSessionStart {
        device_id: device_id.clone(),
        session_id: session_id.clone(),
        started_at: now,
        user_agent,
    };

    let guest = match register_visit(api, &start).await {
        Ok(guest) => guest,
        Err(e) => {
            log::warn!("⚠️ [GUEST] Visit not registered: {}", e);
            None
        }
    };

    let context = UserContext {
        device_id,
        session_id,
        started_at: now,
        guest,
    };
    save_json(storage, USER_CONTEXT_KEY, &context)?;
    Ok(context)
}

async fn register_visit(api: &ApiClient, start: &UserSessionStart) -> DashboardResult<Option<GuestProfile>> {
    let _: Value = api.post("/api/user-sessions", start).await?;
    let path = format!("/api/guests/{}", urlencoding::encode(&start.device_id));
    let guest: GuestProfile = api.get(&path).await?;
    log::info!("👤 [GUEST] {} visit(s) from this device", guest.visits);
    Ok(Some(guest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::HttpMethod;
    use crate::testing::{api_fixture, MemoryStorage};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn device_id_is_stable_session_id_is_not() {
        let storage = MemoryStorage::default();
        let device = ensure_device_id(&storage);
        assert_eq!(ensure_device_id(&storage), device);
        assert!(Uuid::parse_str(&device).is_ok());
        assert_ne!(start_session_id(&storage), start_session_id(&storage));
    }

    #[test]
    fn bootstrap_registers_and_caches_context() {
        let (_, transport, api) = api_fixture();
        let storage = MemoryStorage::default();
        storage.set(DEVICE_ID_KEY, "dev-1").unwrap();
        transport.respond_json(HttpMethod::Post, "/api/user-sessions", json!({"ok": true}));
        transport.respond_json(HttpMethod::Get, "/api/guests/dev-1", json!({"device_id": "dev-1", "visits": 3}));

        let context = block_on(bootstrap(&api, &storage, Some("test-agent".into()), Utc::now())).unwrap();
        assert_eq!(context.device_id, "dev-1");
        assert!(context.guest.as_ref().unwrap().is_returning());
        assert_eq!(stored_context(&storage), Some(context.clone()));

        let body = transport.requests_to(HttpMethod::Post, "/api/user-sessions")[0].json_body();
        assert_eq!(body["device_id"], "dev-1");
        assert_eq!(body["user_agent"], "test-agent");
    }

    #[test]
    fn bootstrap_survives_backend_failure() {
        let (_, _transport, api) = api_fixture();
        let storage = MemoryStorage::default();
        let context = block_on(bootstrap(&api, &storage, None, Utc::now())).unwrap();
        assert!(context.guest.is_none());
        assert!(stored_context(&storage).is_some());

        clear_guest_keys(&storage);
        assert!(stored_context(&storage).is_none());
        assert!(storage.get(DEVICE_ID_KEY).is_none());
    }
}
