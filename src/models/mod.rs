pub mod auth;
pub mod calendar;
pub mod common;
pub mod dashboard;
pub mod directions;
pub mod follow_me;
pub mod gateway;
pub mod guest;
pub mod integrations;
pub mod knowledge;

pub use auth::{LoginRequest, LoginResponse, UserProfile};
pub use calendar::{CalendarSource, NewCalendarSource};
pub use common::OperationResult;
pub use dashboard::DashboardSnapshot;
pub use directions::{DirectionsProfile, DirectionsUpdate};
pub use follow_me::{ExcludedDevice, FollowMeConfig, FollowMeOverview, Room};
pub use guest::{GuestProfile, UserContext, UserSessionStart};
pub use integrations::{IntegrationCard, IntegrationOp, IntegrationStatus};
pub use knowledge::{KnowledgeDraft, KnowledgeEntry};
