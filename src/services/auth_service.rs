use crate::error::DashboardResult;
use crate::models::{LoginRequest, LoginResponse, UserProfile};
use crate::services::ApiClient;
use crate::state::{AuthStatus, Store};

/// Exchange credentials for a token and sign the store in.
pub async fn perform_login(
    api: &ApiClient,
    store: &Store,
    username: &str,
    password: &str,
) -> DashboardResult<LoginResponse> {
    log::info!("🔐 [AUTH] Signing in as {}", username);
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let response: LoginResponse = api.post("/api/auth/login", &request).await?;

    let user = response
        .user
        .clone()
        .unwrap_or_else(|| UserProfile::named(username));
    store.set_auth_state(AuthStatus::Authenticated, Some(response.token.clone()), Some(user));
    log::info!("✅ [AUTH] Signed in");
    Ok(response)
}

/// Confirm a restored token with the backend.
///
/// Without a token the store goes straight to `Unauthenticated`. A rejected
/// token is cleared; a network failure keeps the token and leaves the status
/// at `Checking` so the next call can retry.
pub async fn verify_session(api: &ApiClient, store: &Store) -> DashboardResult<AuthStatus> {
    let Some(token) = store.get_token() else {
        store.set_auth_state(AuthStatus::Unauthenticated, None, None);
        return Ok(AuthStatus::Unauthenticated);
    };

    match api.get::<UserProfile>("/api/auth/me").await {
        Ok(user) => {
            log::info!("✅ [AUTH] Session restored for {}", user.display_name());
            store.set_auth_state(AuthStatus::Authenticated, Some(token), Some(user));
            Ok(AuthStatus::Authenticated)
        }
        Err(e) if e.is_auth() => {
            log::warn!("🔒 [AUTH] Stored token rejected");
            store.set_auth_state(AuthStatus::Unauthenticated, None, None);
            Ok(AuthStatus::Unauthenticated)
        }
        Err(e) => {
            log::error!("❌ [AUTH] Could not verify session: {}", e);
            Err(e)
        }
    }
}
