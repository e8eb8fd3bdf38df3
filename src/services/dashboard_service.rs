use crate::error::DashboardResult;
use crate::models::DashboardSnapshot;
use crate::services::ApiClient;
use crate::utils::DASHBOARD_REQUEST;

/// Mission-control snapshot, aborted if the user navigates away mid-flight.
pub async fn fetch_snapshot(api: &ApiClient) -> DashboardResult<DashboardSnapshot> {
    api.get_tracked(DASHBOARD_REQUEST, "/api/dashboard").await
}
