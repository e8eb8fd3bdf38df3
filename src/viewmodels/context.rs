// ============================================================================
// PAGE CONTEXT - Everything a page controller talks to
// ============================================================================

use std::future::Future;
use std::rc::Rc;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use maud::Markup;
use crate::error::{DashboardError, DashboardResult};
use crate::models::OperationResult;
use crate::platform::{ActionBindings, ActionEvent, ActionFuture, Scheduler, ToastLevel, Toaster, ViewTarget};
use crate::services::{auth_service, ApiClient};
use crate::state::{AuthStatus, Store};
use crate::views::shell;

#[derive(Clone)]
pub struct PageContext {
    pub store: Store,
    pub api: ApiClient,
    pub view: Rc<dyn ViewTarget>,
    pub toaster: Rc<dyn Toaster>,
    pub scheduler: Rc<dyn Scheduler>,
}

impl PageContext {
    pub fn new(
        store: Store,
        api: ApiClient,
        view: Rc<dyn ViewTarget>,
        toaster: Rc<dyn Toaster>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self { store, api, view, toaster, scheduler }
    }

    /// A restored token that was never confirmed (startup check hit a network
    /// error) is verified again here. Only a backend rejection drops it; any
    /// other failure comes back as that error with the token kept.
    pub async fn require_auth(&self) -> DashboardResult<()> {
        if self.store.is_authenticated() {
            return Ok(());
        }
        let pending = self.store.auth_status() == AuthStatus::Checking && self.store.get_token().is_some();
        if pending && auth_service::verify_session(&self.api, &self.store).await? == AuthStatus::Authenticated {
            return Ok(());
        }
        Err(DashboardError::Unauthorized)
    }

    pub fn render(&self, markup: Markup, bindings: ActionBindings) {
        self.view.render(&markup.into_string());
        self.view.bind(bindings);
    }

    pub fn show_loading(&self, label: &str) {
        self.view.render(&shell::loading(label).into_string());
    }

    pub fn success(&self, message: &str) {
        self.toaster.show(ToastLevel::Success, message);
    }

    pub fn info(&self, message: &str) {
        self.toaster.show(ToastLevel::Info, message);
    }

    /// Toast an operation reply at the level its `success` flag implies.
    pub fn announce(&self, result: &OperationResult, fallback: &str) {
        let level = if result.success { ToastLevel::Success } else { ToastLevel::Error };
        self.toaster.show(level, &result.summary(fallback));
    }

    /// Surface a failed action. Expired sessions swap the page for the
    /// login prompt; cancellations stay silent.
    pub fn report(&self, action: &str, error: &DashboardError) {
        match error {
            DashboardError::Cancelled => {
                log::debug!("🛑 [PAGE] '{}' cancelled", action);
            }
            DashboardError::Unauthorized => {
                log::warn!("🔒 [PAGE] '{}' rejected, session expired", action);
                self.store.set_auth_state(AuthStatus::Unauthenticated, None, None);
                self.view.render(&shell::login_required().into_string());
            }
            other => {
                log::error!("❌ [PAGE] '{}' failed: {}", action, other);
                self.toaster.show(ToastLevel::Error, &other.to_string());
            }
        }
    }

    /// Turn a fallible action into a bindable handler. Failures are reported
    /// through `report` and never escape the handler.
    pub fn guard<F, Fut>(&self, action: &'static str, handler: F) -> impl Fn(ActionEvent) -> ActionFuture + 'static
    where
        F: Fn(ActionEvent) -> Fut + 'static,
        Fut: Future<Output = DashboardResult<()>> + 'static,
    {
        let ctx = self.clone();
        move |event: ActionEvent| {
            let ctx = ctx.clone();
            let pending = handler(event);
            async move {
                if let Err(e) = pending.await {
                    ctx.report(action, &e);
                }
            }
            .boxed_local()
        }
    }

    /// Start a named repeating timer owned by the store. Re-registering a
    /// name replaces (and stops) the previous timer.
    pub fn every(&self, name: &str, period_ms: u32, tick: Box<dyn FnMut()>) {
        let handle = self.scheduler.every(period_ms, tick);
        self.store.register_interval(name, handle);
    }

    pub fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.scheduler.spawn(task);
    }
}
