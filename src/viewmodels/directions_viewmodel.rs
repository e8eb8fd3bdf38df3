use std::cell::RefCell;
use std::rc::Rc;
use crate::error::{DashboardError, DashboardResult};
use crate::models::directions::TRAVEL_MODES;
use crate::models::{DirectionsProfile, DirectionsUpdate};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::directions_service;
use crate::viewmodels::context::PageContext;
use crate::views::render_directions_page;

pub struct DirectionsViewModel {
    ctx: PageContext,
    profiles: RefCell<Vec<DirectionsProfile>>,
}

fn update_from(event: &ActionEvent) -> DashboardResult<DirectionsUpdate> {
    let travel_mode = event.required_field("travel_mode", "Travel mode")?;
    if !TRAVEL_MODES.contains(&travel_mode.as_str()) {
        return Err(DashboardError::validation(format!("Unknown travel mode '{}'", travel_mode)));
    }
    let departure_buffer_minutes = match event.optional_field("departure_buffer_minutes") {
        Some(raw) => raw
            .parse()
            .map_err(|_| DashboardError::validation("Departure buffer must be a number"))?,
        None => 0,
    };
    Ok(DirectionsUpdate {
        travel_mode,
        avoid_tolls: event.checkbox("avoid_tolls"),
        avoid_highways: event.checkbox("avoid_highways"),
        departure_buffer_minutes,
    })
}

impl DirectionsViewModel {
    pub fn new(ctx: PageContext) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            profiles: RefCell::new(Vec::new()),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("directions settings");
        self.reload().await
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let profiles = directions_service::list_profiles(&self.ctx.api).await?;
        *self.profiles.borrow_mut() = profiles;
        let markup = render_directions_page(&self.profiles.borrow());
        self.ctx.render(markup, self.bindings());
        Ok(())
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let save = self.clone();
        let reset = self.clone();
        ActionBindings::new()
            .on("directions-save", self.ctx.guard("directions-save", move |e| save.clone().save(e)))
            .on("directions-reset", self.ctx.guard("directions-reset", move |e| reset.clone().reset(e)))
    }

    async fn save(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let update = update_from(&event)?;
        directions_service::save_profile(&self.ctx.api, &id, &update).await?;
        self.ctx.success("Directions profile saved");
        self.reload().await
    }

    async fn reset(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        directions_service::reset_profile(&self.ctx.api, &id).await?;
        self.ctx.success("Directions profile reset");
        self.reload().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ToastLevel;
    use crate::services::api_client::HttpMethod;
    use crate::testing::PageHarness;
    use futures::executor::block_on;
    use serde_json::json;

    fn loaded() -> PageHarness {
        let harness = PageHarness::signed_in();
        harness.transport.respond_json(
            HttpMethod::Get,
            "/api/directions-settings",
            json!({"data": [{"id": 4, "name": "Commute", "travel_mode": "transit"}]}),
        );
        block_on(DirectionsViewModel::new(harness.ctx.clone()).load()).unwrap();
        harness
    }

    #[test]
    fn renders_selected_mode() {
        let harness = loaded();
        assert!(harness.view.html().contains(r#"<option value="transit" selected>"#));
    }

    #[test]
    fn save_puts_profile() {
        let harness = loaded();
        harness.transport.respond_json(HttpMethod::Put, "/api/directions-settings/4", json!({}));
        harness.dispatch(
            ActionEvent::new("directions-save")
                .with_target("4")
                .with_field("travel_mode", "walking")
                .with_field("avoid_tolls", "on")
                .with_field("departure_buffer_minutes", "10"),
        );
        let body = harness.transport.requests_to(HttpMethod::Put, "/api/directions-settings/4")[0].json_body();
        assert_eq!(
            body,
            json!({"travel_mode": "walking", "avoid_tolls": true, "avoid_highways": false, "departure_buffer_minutes": 10})
        );
    }

    #[test]
    fn reset_posts_and_toasts() {
        let harness = loaded();
        harness.transport.respond(HttpMethod::Post, "/api/directions-settings/4/reset", 204, "");
        harness.dispatch(ActionEvent::new("directions-reset").with_target("4"));
        assert_eq!(
            harness.last_toast(),
            Some((ToastLevel::Success, "Directions profile reset".to_string()))
        );
    }
}
