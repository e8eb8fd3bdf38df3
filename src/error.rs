// ============================================================================
// ERRORS - Error type shared by store, router, services and pages
// ============================================================================

use thiserror::Error;

/// Errors produced anywhere in the dashboard.
///
/// Nothing here is fatal: callers surface these as a toast, an inline error
/// panel or the login prompt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Callback failed: {0}")]
    Callback(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    /// 401s and explicit "not authenticated" answers.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DashboardError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_includes_status() {
        let err = DashboardError::Http {
            status: 503,
            message: "backend down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: backend down");
    }

    #[test]
    fn validation_displays_bare_message() {
        assert_eq!(
            DashboardError::validation("Title is required").to_string(),
            "Title is required"
        );
    }

    #[test]
    fn serde_errors_become_parse_errors() {
        let err: DashboardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DashboardError::Parse(_)));
        assert!(!err.is_auth());
    }
}
