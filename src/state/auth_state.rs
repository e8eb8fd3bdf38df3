// ============================================================================
// AUTH STATE - Authentication snapshot held by the store
// ============================================================================

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::models::auth::UserProfile;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    /// Startup state until the backend confirms or rejects a stored token.
    #[default]
    Checking,
    Unauthenticated,
    Authenticated,
}

impl FromStr for AuthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" | "unknown" => Ok(Self::Checking),
            "unauthenticated" => Ok(Self::Unauthenticated),
            "authenticated" => Ok(Self::Authenticated),
            other => Err(format!("unknown auth status '{}'", other)),
        }
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Checking => "checking",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        };
        f.write_str(label)
    }
}

/// Auth fields, always replaced together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSnapshot {
    pub status: AuthStatus,
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated && self.token.is_some()
    }
}
