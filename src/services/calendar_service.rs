use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::calendar::{CalendarToggle, CalendarUrlTest};
use crate::models::{CalendarSource, NewCalendarSource, OperationResult};
use crate::services::ApiClient;

const BASE: &str = "/api/calendar-sources";

fn source_path(id: &str, suffix: &str) -> String {
    format!("{}/{}{}", BASE, urlencoding::encode(id), suffix)
}

pub async fn list_sources(api: &ApiClient) -> DashboardResult<Vec<CalendarSource>> {
    api.get_list(BASE).await
}

pub async fn create_source(api: &ApiClient, source: &NewCalendarSource) -> DashboardResult<()> {
    let _: Value = api.post(BASE, source).await?;
    log::info!("📅 [CALENDAR] Added source '{}'", source.name);
    Ok(())
}

pub async fn set_enabled(api: &ApiClient, id: &str, enabled: bool) -> DashboardResult<()> {
    let _: Value = api.put(&source_path(id, ""), &CalendarToggle { enabled }).await?;
    Ok(())
}

pub async fn delete_source(api: &ApiClient, id: &str) -> DashboardResult<()> {
    api.delete(&source_path(id, "")).await
}

pub async fn sync_source(api: &ApiClient, id: &str) -> DashboardResult<OperationResult> {
    log::info!("🔄 [CALENDAR] Syncing {}", id);
    let reply: Value = api.post_empty(&source_path(id, "/sync")).await?;
    Ok(OperationResult::from_reply(reply))
}

pub async fn test_source(api: &ApiClient, id: &str) -> DashboardResult<OperationResult> {
    let reply: Value = api.post_empty(&source_path(id, "/test")).await?;
    Ok(OperationResult::from_reply(reply))
}

pub async fn sync_all(api: &ApiClient) -> DashboardResult<OperationResult> {
    log::info!("🔄 [CALENDAR] Syncing all sources");
    let reply: Value = api.post_empty(&format!("{}/sync-all", BASE)).await?;
    Ok(OperationResult::from_reply(reply))
}

/// Probe a feed URL before adding it.
pub async fn test_url(api: &ApiClient, url: &str) -> DashboardResult<OperationResult> {
    let reply: Value = api
        .post(&format!("{}/test-url", BASE), &CalendarUrlTest { url: url.to_string() })
        .await?;
    Ok(OperationResult::from_reply(reply))
}
