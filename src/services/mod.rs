pub mod api_client;
pub mod auth_service;
pub mod calendar_service;
pub mod dashboard_service;
pub mod directions_service;
pub mod follow_me_service;
pub mod gateway_service;
pub mod guest_service;
pub mod integrations_service;
pub mod knowledge_service;

pub use api_client::{ApiClient, Transport};
