// ============================================================================
// LOGIN VIEWMODEL - Sign-in form and logout
// ============================================================================
// Login errors stay inside the form instead of toasting, so the user can fix
// credentials in place.
// ============================================================================

use std::rc::Rc;
use futures::FutureExt;
use crate::error::{DashboardError, DashboardResult};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::auth_service;
use crate::state::Store;
use crate::viewmodels::command_palette::Navigate;
use crate::viewmodels::context::PageContext;
use crate::views::render_login;

pub const LOGIN_ROUTE: &str = "login";
pub const LOGOUT_ROUTE: &str = "logout";

pub struct LoginViewModel {
    ctx: PageContext,
    navigate: Navigate,
    home_route: String,
}

fn login_message(error: &DashboardError) -> String {
    if error.is_auth() {
        "Invalid username or password".to_string()
    } else {
        error.to_string()
    }
}

impl LoginViewModel {
    pub fn new(ctx: PageContext, navigate: Navigate, home_route: &str) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            navigate,
            home_route: home_route.to_string(),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.show(None, "");
        Ok(())
    }

    fn show(self: &Rc<Self>, error: Option<&str>, username: &str) {
        self.ctx.render(render_login(error, username), self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let vm = self.clone();
        ActionBindings::new().on("login-submit", move |event| vm.clone().submit(event).boxed_local())
    }

    /// Where to go after signing in: the page the user was on, unless that
    /// was the login/logout route itself.
    fn return_route(&self) -> String {
        self.ctx
            .store
            .previous_tab()
            .filter(|tab| tab != LOGIN_ROUTE && tab != LOGOUT_ROUTE)
            .unwrap_or_else(|| self.home_route.clone())
    }

    async fn submit(self: Rc<Self>, event: ActionEvent) {
        let username = event.optional_field("username").unwrap_or_default();
        if let Err(e) = self.clone().try_submit(&event).await {
            log::warn!("🔐 [LOGIN] Sign-in failed: {}", e);
            self.show(Some(&login_message(&e)), &username);
        }
    }

    async fn try_submit(self: Rc<Self>, event: &ActionEvent) -> DashboardResult<()> {
        let username = event.required_field("username", "Username")?;
        let password = event.required_field("password", "Password")?;
        auth_service::perform_login(&self.ctx.api, &self.ctx.store, &username, &password).await?;
        let target = self.return_route();
        self.ctx.success(&format!("Welcome, {}", self.display_name(&username)));
        (self.navigate)(&target);
        Ok(())
    }

    fn display_name(&self, fallback: &str) -> String {
        self.ctx
            .store
            .get_user()
            .map(|user| user.display_name())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Drop the session and everything page-scoped, then show the login form.
pub fn logout(store: &Store, navigate: &Navigate) {
    log::info!("👋 [LOGIN] Signing out");
    store.reset();
    navigate(LOGIN_ROUTE);
}
