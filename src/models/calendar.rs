use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::common::id_string;

fn default_provider() -> String {
    "ical".to_string()
}

fn default_true() -> bool {
    true
}

/// External calendar feed synced by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSource {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_status: Option<String>,
    #[serde(default)]
    pub event_count: Option<u64>,
}

impl CalendarSource {
    pub fn status_label(&self) -> &str {
        self.last_status.as_deref().unwrap_or("never synced")
    }

    pub fn last_sync_failed(&self) -> bool {
        matches!(self.last_status.as_deref(), Some("error") | Some("failed"))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewCalendarSource {
    pub name: String,
    pub url: String,
    pub provider: String,
}

impl NewCalendarSource {
    pub fn new(name: String, url: String, provider: Option<String>) -> Self {
        Self {
            name,
            url,
            provider: provider.unwrap_or_else(default_provider),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarToggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarUrlTest {
    pub url: String,
}
