// Page controllers: fetch through services, render views, bind actions

pub mod calendar_viewmodel;
pub mod command_palette;
pub mod context;
pub mod directions_viewmodel;
pub mod follow_me_viewmodel;
pub mod gateway_viewmodel;
pub mod guest_viewmodel;
pub mod integrations_viewmodel;
pub mod knowledge_viewmodel;
pub mod login_viewmodel;
pub mod mission_control_viewmodel;

pub use calendar_viewmodel::CalendarViewModel;
pub use command_palette::{Command, CommandPalette, Navigate};
pub use context::PageContext;
pub use directions_viewmodel::DirectionsViewModel;
pub use follow_me_viewmodel::FollowMeViewModel;
pub use gateway_viewmodel::GatewayViewModel;
pub use guest_viewmodel::GuestViewModel;
pub use integrations_viewmodel::IntegrationsViewModel;
pub use knowledge_viewmodel::KnowledgeViewModel;
pub use login_viewmodel::{logout, LoginViewModel, LOGIN_ROUTE, LOGOUT_ROUTE};
pub use mission_control_viewmodel::MissionControlViewModel;
