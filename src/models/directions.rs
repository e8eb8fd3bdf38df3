use serde::{Deserialize, Serialize};
use super::common::id_string;

pub const TRAVEL_MODES: [&str; 4] = ["driving", "walking", "bicycling", "transit"];

fn default_mode() -> String {
    "driving".to_string()
}

/// Routing preferences for one directions profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsProfile {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_mode")]
    pub travel_mode: String,
    #[serde(default)]
    pub avoid_tolls: bool,
    #[serde(default)]
    pub avoid_highways: bool,
    #[serde(default)]
    pub departure_buffer_minutes: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectionsUpdate {
    pub travel_mode: String,
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub departure_buffer_minutes: u32,
}
