use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::{ExcludedDevice, FollowMeConfig, FollowMeOverview, Room};
use crate::services::ApiClient;

const CONFIG: &str = "/api/follow-me/config";
const ROOMS: &str = "/api/follow-me/rooms";
const EXCLUDED: &str = "/api/follow-me/excluded";

/// Config, rooms and exclusions fetched concurrently; any failure fails all.
pub async fn load_overview(api: &ApiClient) -> DashboardResult<FollowMeOverview> {
    let (config, rooms, excluded) = futures::try_join!(
        api.get::<FollowMeConfig>(CONFIG),
        api.get_list::<Room>(ROOMS),
        api.get_list::<ExcludedDevice>(EXCLUDED),
    )?;
    log::info!(
        "🎵 [FOLLOW-ME] {} rooms, {} excluded",
        rooms.len(),
        excluded.len()
    );
    Ok(FollowMeOverview { config, rooms, excluded })
}

pub async fn save_config(api: &ApiClient, config: &FollowMeConfig) -> DashboardResult<()> {
    let _: Value = api.put(CONFIG, config).await?;
    Ok(())
}

pub async fn add_room(api: &ApiClient, room: &Room) -> DashboardResult<()> {
    let _: Value = api.post(ROOMS, room).await?;
    Ok(())
}

pub async fn remove_room(api: &ApiClient, name: &str) -> DashboardResult<()> {
    api.delete(&format!("{}/{}", ROOMS, urlencoding::encode(name))).await
}

pub async fn add_excluded(api: &ApiClient, device: &ExcludedDevice) -> DashboardResult<()> {
    let _: Value = api.post(EXCLUDED, device).await?;
    Ok(())
}

pub async fn remove_excluded(api: &ApiClient, name: &str) -> DashboardResult<()> {
    api.delete(&format!("{}/{}", EXCLUDED, urlencoding::encode(name))).await
}
