use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::{DirectionsProfile, DirectionsUpdate};
use crate::services::ApiClient;

const BASE: &str = "/api/directions-settings";

pub async fn list_profiles(api: &ApiClient) -> DashboardResult<Vec<DirectionsProfile>> {
    api.get_list(BASE).await
}

pub async fn save_profile(api: &ApiClient, id: &str, update: &DirectionsUpdate) -> DashboardResult<()> {
    let _: Value = api.put(&format!("{}/{}", BASE, urlencoding::encode(id)), update).await?;
    log::info!("🗺️ [DIRECTIONS] Saved profile {}", id);
    Ok(())
}

pub async fn reset_profile(api: &ApiClient, id: &str) -> DashboardResult<()> {
    let _: Value = api
        .post_empty(&format!("{}/{}/reset", BASE, urlencoding::encode(id)))
        .await?;
    log::info!("🗺️ [DIRECTIONS] Reset profile {}", id);
    Ok(())
}
