use serde::{Deserialize, Serialize};

/// Audio follow-me settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FollowMeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub transfer_delay_seconds: u32,
    #[serde(default)]
    pub volume_percent: u8,
    #[serde(default)]
    pub resume_playback: bool,
}

/// Room with the media player that plays in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub media_player: String,
}

/// Device that never triggers follow-me
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcludedDevice {
    pub name: String,
}

/// Config, rooms and exclusions loaded together for the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowMeOverview {
    pub config: FollowMeConfig,
    pub rooms: Vec<Room>,
    pub excluded: Vec<ExcludedDevice>,
}
