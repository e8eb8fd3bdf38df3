use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /api/user-sessions` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSessionStart {
    pub device_id: String,
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// What the backend remembers about a device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GuestProfile {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visits: u32,
    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferences: Value,
}

impl GuestProfile {
    pub fn is_returning(&self) -> bool {
        self.visits > 1
    }
}

/// Persisted under `user_context`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserContext {
    pub device_id: String,
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub guest: Option<GuestProfile>,
}
