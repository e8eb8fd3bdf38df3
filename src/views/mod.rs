pub mod calendar;
pub mod chart;
pub mod command_palette;
pub mod directions;
pub mod follow_me;
pub mod gateway;
pub mod guest;
pub mod integrations;
pub mod knowledge;
pub mod login;
pub mod mission_control;
pub mod shell;

pub use calendar::render_calendar_page;
pub use directions::render_directions_page;
pub use follow_me::render_follow_me_page;
pub use gateway::render_gateway_page;
pub use guest::render_guest_page;
pub use integrations::render_integrations_page;
pub use knowledge::render_knowledge_page;
pub use login::render_login;
pub use mission_control::render_mission_control;
pub use command_palette::render_palette;
