// ============================================================================
// STORAGE - Persistent key/value storage (localStorage in the browser)
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use crate::error::DashboardResult;

/// String-keyed persistent storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> DashboardResult<()>;
    fn remove(&self, key: &str);
}

pub fn save_json<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> DashboardResult<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

/// Missing keys and unparseable payloads both read as `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let json = storage.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Ignoring unreadable '{}': {}", key, e);
            None
        }
    }
}

/// `window.localStorage`, raw string values.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| crate::error::DashboardError::Storage(format!("could not write '{}'", key)))
    }

    fn remove(&self, key: &str) {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::delete(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        compact: bool,
    }

    #[test]
    fn json_values_survive_storage() {
        let storage = MemoryStorage::default();
        let prefs = Prefs { theme: "dark".to_string(), compact: true };
        save_json(&storage, "prefs", &prefs).unwrap();
        assert_eq!(load_json::<Prefs>(&storage, "prefs"), Some(prefs));
    }

    #[test]
    fn corrupt_json_reads_as_missing() {
        let storage = MemoryStorage::default();
        storage.set("prefs", "{not json").unwrap();
        assert_eq!(load_json::<Prefs>(&storage, "prefs"), None);
        assert_eq!(load_json::<Prefs>(&storage, "absent"), None);
    }
}
