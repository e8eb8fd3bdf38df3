use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub home_route: String,
    pub dashboard_refresh_ms: u32,
    pub integrations_refresh_ms: u32,
    pub toast_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            home_route: "dashboard".to_string(),
            dashboard_refresh_ms: 30_000,
            integrations_refresh_ms: 60_000,
            toast_duration_ms: 4_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables.
    /// `build.rs` forwards a local `.env` file when present.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            log_level: option_env!("LOG_LEVEL")
                .unwrap_or("info").to_string(),
            home_route: option_env!("HOME_ROUTE")
                .unwrap_or("dashboard").to_string(),
            dashboard_refresh_ms: option_env!("DASHBOARD_REFRESH_MS")
                .unwrap_or("30000").parse().unwrap_or(defaults.dashboard_refresh_ms),
            integrations_refresh_ms: option_env!("INTEGRATIONS_REFRESH_MS")
                .unwrap_or("60000").parse().unwrap_or(defaults.integrations_refresh_ms),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .unwrap_or("4000").parse().unwrap_or(defaults.toast_duration_ms),
        }
    }

    /// Absolute URL for an API path. An empty backend URL means same origin.
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.backend_url, path)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Parsed log level; unknown values fall back to `Info`.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
