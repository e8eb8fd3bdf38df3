// Storage keys (localStorage)
pub const TOKEN_STORAGE_KEY: &str = "auth_token";
pub const DEVICE_ID_KEY: &str = "device_id";
pub const SESSION_ID_KEY: &str = "session_id";
pub const USER_CONTEXT_KEY: &str = "user_context";

// DOM anchors in index.html
pub const PAGE_ROOT_ID: &str = "page-content";
pub const NAV_ROOT_ID: &str = "main-nav";
pub const PALETTE_ROOT_ID: &str = "command-palette";
pub const TOAST_ROOT_ID: &str = "toast-container";

// Named timers / requests owned by pages
pub const DASHBOARD_REFRESH_TIMER: &str = "mission-control-refresh";
pub const DASHBOARD_REQUEST: &str = "mission-control";
pub const INTEGRATIONS_REFRESH_TIMER: &str = "integrations-refresh";
