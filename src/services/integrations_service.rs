use futures::future::join_all;
use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::integrations::{IntegrationDescriptor, INTEGRATIONS};
use crate::models::{IntegrationCard, IntegrationOp, IntegrationStatus, OperationResult};
use crate::services::ApiClient;

pub async fn fetch_status(api: &ApiClient, id: &str) -> DashboardResult<IntegrationStatus> {
    api.get(&format!("/api/integrations/{}/status", urlencoding::encode(id))).await
}

/// Status of every catalog integration. A failed status call becomes an
/// `error` card; only an expired session fails the whole grid.
pub async fn fetch_cards(api: &ApiClient) -> DashboardResult<Vec<IntegrationCard>> {
    let calls = INTEGRATIONS.iter().map(|descriptor| fetch_card(api, *descriptor));
    let mut cards = Vec::with_capacity(INTEGRATIONS.len());
    for card in join_all(calls).await {
        cards.push(card?);
    }
    Ok(cards)
}

async fn fetch_card(api: &ApiClient, descriptor: IntegrationDescriptor) -> DashboardResult<IntegrationCard> {
    let status = match fetch_status(api, descriptor.id).await {
        Ok(status) => status,
        Err(e) if e.is_auth() || e.is_cancelled() => return Err(e),
        Err(e) => {
            log::warn!("⚠️ [INTEGRATIONS] {} status failed: {}", descriptor.id, e);
            IntegrationStatus::unreachable(&e.to_string())
        }
    };
    Ok(IntegrationCard { descriptor, status })
}

pub async fn run_action(api: &ApiClient, id: &str, op: IntegrationOp) -> DashboardResult<OperationResult> {
    log::info!("🔌 [INTEGRATIONS] {} -> {}", id, op);
    let reply: Value = api
        .post_empty(&format!("/api/integrations/{}/{}", urlencoding::encode(id), op.as_str()))
        .await?;
    Ok(OperationResult::from_reply(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::services::api_client::HttpMethod;
    use crate::testing::api_fixture;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn failing_status_becomes_error_card() {
        let (_, transport, api) = api_fixture();
        transport.respond_json(HttpMethod::Get, "/api/integrations/spotify/status", json!({"state": "connected"}));
        // everything else is unscripted and answers 404
        let cards = block_on(fetch_cards(&api)).unwrap();
        assert_eq!(cards.len(), INTEGRATIONS.len());
        let spotify = cards.iter().find(|c| c.descriptor.id == "spotify").unwrap();
        assert!(spotify.status.is_connected());
        let sonos = cards.iter().find(|c| c.descriptor.id == "sonos").unwrap();
        assert_eq!(sonos.status.state, "error");
    }

    #[test]
    fn unauthorized_fails_the_grid() {
        let (_, transport, api) = api_fixture();
        transport.fail(HttpMethod::Get, "/api/integrations/email/status", DashboardError::Unauthorized);
        assert_eq!(block_on(fetch_cards(&api)).unwrap_err(), DashboardError::Unauthorized);
    }
}
