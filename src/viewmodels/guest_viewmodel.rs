use std::rc::Rc;
use chrono::Utc;
use crate::error::DashboardResult;
use crate::models::UserContext;
use crate::platform::ActionBindings;
use crate::services::guest_service;
use crate::viewmodels::context::PageContext;
use crate::views::render_guest_page;

pub struct GuestViewModel {
    ctx: PageContext,
    user_agent: Option<String>,
}

impl GuestViewModel {
    pub fn new(ctx: PageContext, user_agent: Option<String>) -> Rc<Self> {
        Rc::new(Self { ctx, user_agent })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        let context = guest_service::stored_context(self.ctx.store.storage().as_ref());
        self.show(context.as_ref());
        Ok(())
    }

    fn show(self: &Rc<Self>, context: Option<&UserContext>) {
        let markup = render_guest_page(context, Utc::now());
        self.ctx.render(markup, self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let vm = self.clone();
        ActionBindings::new().on(
            "guest-reset",
            self.ctx.guard("guest-reset", move |_| vm.clone().reset()),
        )
    }

    async fn reset(self: Rc<Self>) -> DashboardResult<()> {
        let storage = self.ctx.store.storage();
        guest_service::clear_guest_keys(storage.as_ref());
        log::info!("🧹 [GUEST] Identity cleared, bootstrapping again");
        let context =
            guest_service::bootstrap(&self.ctx.api, storage.as_ref(), self.user_agent.clone(), Utc::now()).await?;
        self.ctx.success("Guest identity reset");
        self.show(Some(&context));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ActionEvent, ToastLevel};
    use crate::services::api_client::HttpMethod;
    use crate::testing::PageHarness;
    use crate::utils::DEVICE_ID_KEY;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn empty_state_without_context() {
        let harness = PageHarness::signed_in();
        block_on(GuestViewModel::new(harness.ctx.clone(), None).load()).unwrap();
        assert!(harness.view.html().contains("No guest context"));
        assert!(harness.view.has_action("guest-reset"));
    }

    #[test]
    fn reset_issues_new_device_id() {
        let harness = PageHarness::signed_in();
        let storage = harness.store.storage();
        storage.set(DEVICE_ID_KEY, "old-device").unwrap();
        harness.transport.respond_json(HttpMethod::Post, "/api/user-sessions", json!({}));

        block_on(GuestViewModel::new(harness.ctx.clone(), Some("agent".into())).load()).unwrap();
        harness.dispatch(ActionEvent::new("guest-reset"));

        let device = storage.get(DEVICE_ID_KEY).unwrap();
        assert_ne!(device, "old-device");
        assert!(harness.view.html().contains(&device));
        assert_eq!(
            harness.last_toast(),
            Some((ToastLevel::Success, "Guest identity reset".to_string()))
        );
        // The token lives in the same storage and must survive the reset
        assert!(harness.store.is_authenticated());
        assert_eq!(storage.get(crate::utils::TOKEN_STORAGE_KEY).as_deref(), Some("test-token"));
    }
}
