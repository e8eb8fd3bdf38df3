// ============================================================================
// FOLLOW-ME VIEWMODEL - Audio hand-off config, rooms and exclusions
// ============================================================================
// Config, rooms and excluded devices load concurrently; any one failing
// fails the page.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{ExcludedDevice, FollowMeConfig, FollowMeOverview, Room};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::follow_me_service;
use crate::viewmodels::context::PageContext;
use crate::views::render_follow_me_page;

pub struct FollowMeViewModel {
    ctx: PageContext,
    overview: RefCell<FollowMeOverview>,
}

fn parse_number<T: std::str::FromStr>(event: &ActionEvent, name: &str, label: &str) -> DashboardResult<T> {
    let raw = event.required_field(name, label)?;
    raw.parse()
        .map_err(|_| DashboardError::validation(format!("{} must be a number", label)))
}

fn config_from(event: &ActionEvent) -> DashboardResult<FollowMeConfig> {
    let volume: i64 = parse_number(event, "volume_percent", "Volume")?;
    Ok(FollowMeConfig {
        enabled: event.checkbox("enabled"),
        transfer_delay_seconds: parse_number(event, "transfer_delay_seconds", "Transfer delay")?,
        volume_percent: volume.clamp(0, 100) as u8,
        resume_playback: event.checkbox("resume_playback"),
    })
}

impl FollowMeViewModel {
    pub fn new(ctx: PageContext) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            overview: RefCell::new(FollowMeOverview::default()),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("follow-me settings");
        self.reload().await
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let overview = follow_me_service::load_overview(&self.ctx.api).await?;
        *self.overview.borrow_mut() = overview;
        self.render();
        Ok(())
    }

    fn render(self: &Rc<Self>) {
        let markup = render_follow_me_page(&self.overview.borrow());
        self.ctx.render(markup, self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let ctx = &self.ctx;
        let save = self.clone();
        let add_room = self.clone();
        let remove_room = self.clone();
        let add_excluded = self.clone();
        let remove_excluded = self.clone();
        ActionBindings::new()
            .on("follow-me-save", ctx.guard("follow-me-save", move |e| save.clone().save(e)))
            .on("follow-me-add-room", ctx.guard("follow-me-add-room", move |e| add_room.clone().add_room(e)))
            .on(
                "follow-me-remove-room",
                ctx.guard("follow-me-remove-room", move |e| remove_room.clone().remove_room(e)),
            )
            .on(
                "follow-me-add-excluded",
                ctx.guard("follow-me-add-excluded", move |e| add_excluded.clone().add_excluded(e)),
            )
            .on(
                "follow-me-remove-excluded",
                ctx.guard("follow-me-remove-excluded", move |e| remove_excluded.clone().remove_excluded(e)),
            )
    }

    async fn save(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let config = config_from(&event)?;
        follow_me_service::save_config(&self.ctx.api, &config).await?;
        self.ctx.success("Follow-me settings saved");
        self.reload().await
    }

    async fn add_room(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let room = Room {
            name: event.required_field("name", "Room name")?,
            media_player: event.required_field("media_player", "Media player")?,
        };
        follow_me_service::add_room(&self.ctx.api, &room).await?;
        self.ctx.success(&format!("Room '{}' added", room.name));
        self.reload().await
    }

    async fn remove_room(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let name = event.required_target()?;
        follow_me_service::remove_room(&self.ctx.api, &name).await?;
        self.ctx.success(&format!("Room '{}' removed", name));
        self.reload().await
    }

    async fn add_excluded(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let device = ExcludedDevice {
            name: event.required_field("name", "Device name")?,
        };
        follow_me_service::add_excluded(&self.ctx.api, &device).await?;
        self.ctx.success(&format!("'{}' excluded", device.name));
        self.reload().await
    }

    async fn remove_excluded(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let name = event.required_target()?;
        follow_me_service::remove_excluded(&self.ctx.api, &name).await?;
        self.ctx.success(&format!("'{}' no longer excluded", name));
        self.reload().await
    }
}
