use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /api/dashboard` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub services: Vec<ServiceStatus>,
    #[serde(default, alias = "recent_events")]
    pub events: Vec<DashboardEvent>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn unhealthy_services(&self) -> usize {
        self.services.iter().filter(|s| !s.is_healthy()).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    /// Oldest first.
    #[serde(default)]
    pub history: Vec<f64>,
}

impl Metric {
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceStatus {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ServiceStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(
            self.status.to_lowercase().as_str(),
            "ok" | "healthy" | "up" | "online" | "running"
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardEvent {
    #[serde(default, alias = "timestamp")]
    pub at: Option<DateTime<Utc>>,
    #[serde(default = "default_level")]
    pub level: String,
    pub message: String,
}

fn default_level() -> String {
    "info".to_string()
}
