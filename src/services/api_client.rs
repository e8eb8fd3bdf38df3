// ============================================================================
// API CLIENT - HTTP plumbing only (no page logic)
// ============================================================================
// Base URL, bearer token, status mapping and JSON decoding on top of a
// `Transport`. Domain calls live in the sibling `*_service` modules.
// ============================================================================

use std::fmt;
use std::rc::Rc;
use async_trait::async_trait;
use futures::future::{AbortHandle, Abortable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::config::join_url;
use crate::error::{DashboardError, DashboardResult};
use crate::state::Store;

/// Wrapper keys accepted around list payloads.
const LIST_KEYS: [&str; 5] = ["items", "data", "entries", "sources", "rooms"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body parsed as JSON, `Value::Null` when absent.
    pub fn json_body(&self) -> Value {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
            .unwrap_or(Value::Null)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse>;
}

/// `fetch` through gloo-net.
#[cfg(target_arch = "wasm32")]
pub struct GlooTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Patch => Request::patch(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| DashboardError::Network(format!("Request build error: {}", e)))?;

        let response = built
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse { status, status_text, body })
    }
}

/// Best human-readable message out of an error response.
pub fn extract_error_message(response: &ApiResponse) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&response.body) {
        for key in ["error", "message", "detail"] {
            match map.get(key) {
                Some(Value::String(message)) if !message.trim().is_empty() => {
                    return message.trim().to_string();
                }
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(message)) = inner.get("message") {
                        return message.trim().to_string();
                    }
                }
                _ => {}
            }
        }
    }

    let raw = response.body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }
    if response.status_text.trim().is_empty() {
        "Request failed".to_string()
    } else {
        response.status_text.clone()
    }
}

/// Accepts `[...]` or `{"items": [...]}` style envelopes.
pub fn unwrap_list(value: Value) -> DashboardResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| DashboardError::Parse("Expected a list payload".to_string())),
        Value::Null => Ok(Vec::new()),
        other => Err(DashboardError::Parse(format!("Expected a list payload, got {}", other))),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> DashboardResult<T> {
    if body.trim().is_empty() {
        // 204 and friends
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(body)?)
}

/// HTTP client bound to the store for the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: Store,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, store: Store, transport: Rc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.to_string(),
            store,
            transport,
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> ApiRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.store.get_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        ApiRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }

    /// Send and map non-2xx statuses to errors. Body is returned undecoded.
    pub async fn send_raw(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> DashboardResult<ApiResponse> {
        let request = self.build_request(method, path, body);
        log::debug!("🌐 [API] {} {}", method, request.url);

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            log::warn!("🔒 [API] {} {} -> 401", method, path);
            return Err(DashboardError::Unauthorized);
        }
        if !response.ok() {
            let message = extract_error_message(&response);
            log::error!("❌ [API] {} {} -> {}: {}", method, path, response.status, message);
            return Err(DashboardError::Http {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> DashboardResult<T> {
        let response = self.send_raw(method, path, body).await?;
        decode(&response.body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// GET a list, tolerating the wrapped envelope shapes.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<Vec<T>> {
        let value: Value = self.get(path).await?;
        let items = unwrap_list(value)?;
        Ok(serde_json::from_value(Value::Array(items))?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> DashboardResult<T> {
        let body = serde_json::to_string(body)?;
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// POST without a body (sync/test/reset style endpoints).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        self.request(HttpMethod::Post, path, None).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> DashboardResult<T> {
        let body = serde_json::to_string(body)?;
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> DashboardResult<T> {
        let body = serde_json::to_string(body)?;
        self.request(HttpMethod::Patch, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> DashboardResult<()> {
        self.send_raw(HttpMethod::Delete, path, None).await?;
        Ok(())
    }

    /// GET registered in the store's pending-request registry under `name`,
    /// so a route change aborts it. Aborted calls resolve to `Cancelled`.
    pub async fn get_tracked<T: DeserializeOwned>(&self, name: &str, path: &str) -> DashboardResult<T> {
        let (handle, registration) = AbortHandle::new_pair();
        self.store.register_request(name, Box::new(handle));

        match Abortable::new(self.get::<T>(path), registration).await {
            Ok(result) => {
                self.store.unregister_request(name);
                result
            }
            Err(_aborted) => {
                log::debug!("🛑 [API] Tracked request '{}' aborted", name);
                Err(DashboardError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AuthStatus;
    use crate::testing::{api_fixture, MockTransport};
    use futures::executor::block_on;
    use futures::FutureExt;
    use serde_json::json;

    #[test]
    fn attaches_bearer_token_when_present() {
        let (store, transport, api) = api_fixture();
        transport.respond_json(HttpMethod::Get, "/api/dashboard", json!({}));

        block_on(api.get::<Value>("/api/dashboard")).unwrap();
        assert_eq!(transport.last_request().unwrap().header("authorization"), None);

        store.set_auth_state(AuthStatus::Authenticated, Some("tok".to_string()), None);
        block_on(api.get::<Value>("/api/dashboard")).unwrap();
        assert_eq!(
            transport.last_request().unwrap().header("Authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn maps_401_to_unauthorized() {
        let (_, transport, api) = api_fixture();
        transport.respond(HttpMethod::Get, "/api/gateway-config", 401, "");
        let err = block_on(api.get::<Value>("/api/gateway-config")).unwrap_err();
        assert_eq!(err, DashboardError::Unauthorized);
    }

    #[test]
    fn error_message_from_json_or_text() {
        let (_, transport, api) = api_fixture();
        transport.respond(HttpMethod::Post, "/api/base-knowledge", 422, r#"{"detail":"title too long"}"#);
        let err = block_on(api.post::<_, Value>("/api/base-knowledge", &json!({}))).unwrap_err();
        assert_eq!(
            err,
            DashboardError::Http { status: 422, message: "title too long".to_string() }
        );

        let response = ApiResponse {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "  upstream down \n".to_string(),
        };
        assert_eq!(extract_error_message(&response), "upstream down");

        let response = ApiResponse { body: String::new(), ..response };
        assert_eq!(extract_error_message(&response), "Bad Gateway");
    }

    #[test]
    fn list_envelopes() {
        assert_eq!(unwrap_list(json!([1, 2])).unwrap().len(), 2);
        assert_eq!(unwrap_list(json!({"sources": [1]})).unwrap().len(), 1);
        assert_eq!(unwrap_list(json!({"total": 0, "items": []})).unwrap().len(), 0);
        assert!(unwrap_list(json!({"count": 3})).is_err());
    }

    #[test]
    fn empty_body_decodes_as_unit_or_null() {
        let (_, transport, api) = api_fixture();
        transport.respond(HttpMethod::Put, "/api/follow-me/config", 204, "");
        let value: Value = block_on(api.put("/api/follow-me/config", &json!({"enabled": true}))).unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(
            transport.last_request().unwrap().json_body(),
            json!({"enabled": true})
        );
    }

    #[test]
    fn tracked_request_unregisters_on_completion() {
        let (store, transport, api) = api_fixture();
        transport.respond_json(HttpMethod::Get, "/api/dashboard", json!({"ok": true}));
        let value: Value = block_on(api.get_tracked("mission-control", "/api/dashboard")).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(store.pending_request_count(), 0);
    }

    #[test]
    fn aborted_tracked_request_is_cancelled() {
        let (store, transport, api) = api_fixture();
        transport.hang(HttpMethod::Get, "/api/dashboard");

        let (result, ()) = block_on(async {
            futures::join!(
                api.get_tracked::<Value>("mission-control", "/api/dashboard"),
                async { store.abort_all_requests() }
            )
        });
        assert_eq!(result.unwrap_err(), DashboardError::Cancelled);
        assert_eq!(store.pending_request_count(), 0);
    }

    #[test]
    fn overlapping_tracked_requests_stay_abortable() {
        let (store, transport, api) = api_fixture();
        transport.hang(HttpMethod::Get, "/api/dashboard");

        let mut poll = Box::pin(api.get_tracked::<Value>("mission-control", "/api/dashboard"));
        let mut refresh = Box::pin(api.get_tracked::<Value>("mission-control", "/api/dashboard"));
        assert!(poll.as_mut().now_or_never().is_none());
        assert!(refresh.as_mut().now_or_never().is_none());

        // The newer call superseded the older one
        assert_eq!(poll.as_mut().now_or_never(), Some(Err(DashboardError::Cancelled)));
        assert_eq!(store.pending_request_count(), 1);

        store.abort_all_requests();
        assert_eq!(refresh.as_mut().now_or_never(), Some(Err(DashboardError::Cancelled)));
        assert_eq!(store.pending_request_count(), 0);
    }
}
