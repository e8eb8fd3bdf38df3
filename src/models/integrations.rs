use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::DashboardError;

/// A third-party integration shown on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationDescriptor {
    pub id: &'static str,
    pub label: &'static str,
}

pub const INTEGRATIONS: [IntegrationDescriptor; 6] = [
    IntegrationDescriptor { id: "home-assistant", label: "Home Assistant" },
    IntegrationDescriptor { id: "google-calendar", label: "Google Calendar" },
    IntegrationDescriptor { id: "spotify", label: "Spotify" },
    IntegrationDescriptor { id: "sonos", label: "Sonos" },
    IntegrationDescriptor { id: "weather", label: "Weather" },
    IntegrationDescriptor { id: "email", label: "Email" },
];

pub fn find_integration(id: &str) -> Option<IntegrationDescriptor> {
    INTEGRATIONS.iter().copied().find(|i| i.id == id)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntegrationStatus {
    #[serde(default, alias = "status")]
    pub state: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

impl IntegrationStatus {
    /// Card state for a status call that itself failed.
    pub fn unreachable(message: &str) -> Self {
        Self {
            state: "error".to_string(),
            message: Some(message.to_string()),
            last_checked: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state.as_str(), "connected" | "ok" | "online")
    }

    pub fn css_class(&self) -> &'static str {
        if self.is_connected() {
            "status-ok"
        } else if self.state == "error" {
            "status-error"
        } else {
            "status-idle"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationCard {
    pub descriptor: IntegrationDescriptor,
    pub status: IntegrationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationOp {
    Test,
    Reconnect,
    Disconnect,
}

impl IntegrationOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Reconnect => "reconnect",
            Self::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for IntegrationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationOp {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "reconnect" => Ok(Self::Reconnect),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(DashboardError::validation(format!("Unknown integration action '{}'", other))),
        }
    }
}
