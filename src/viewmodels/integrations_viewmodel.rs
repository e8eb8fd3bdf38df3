// ============================================================================
// INTEGRATIONS VIEWMODEL - Status grid with per-integration actions
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use chrono::Utc;
use futures::FutureExt;
use crate::error::{DashboardError, DashboardResult};
use crate::models::integrations::find_integration;
use crate::models::{IntegrationCard, IntegrationOp};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::integrations_service;
use crate::utils::INTEGRATIONS_REFRESH_TIMER;
use crate::viewmodels::context::PageContext;
use crate::views::render_integrations_page;

pub struct IntegrationsViewModel {
    ctx: PageContext,
    refresh_ms: u32,
    cards: RefCell<Vec<IntegrationCard>>,
}

impl IntegrationsViewModel {
    pub fn new(ctx: PageContext, refresh_ms: u32) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            refresh_ms,
            cards: RefCell::new(Vec::new()),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("integrations");
        self.reload().await?;

        let vm = self.clone();
        self.ctx.every(
            INTEGRATIONS_REFRESH_TIMER,
            self.refresh_ms,
            Box::new(move || {
                let vm = vm.clone();
                let ctx = vm.ctx.clone();
                ctx.spawn(
                    async move {
                        if let Err(e) = vm.reload().await {
                            log::warn!("⚠️ [INTEGRATIONS] Poll failed: {}", e);
                            if e.is_auth() {
                                vm.ctx.report("integrations-poll", &e);
                            }
                        }
                    }
                    .boxed_local(),
                );
            }),
        );
        Ok(())
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let cards = integrations_service::fetch_cards(&self.ctx.api).await?;
        let markup = render_integrations_page(&cards, Utc::now());
        *self.cards.borrow_mut() = cards;
        self.ctx.render(markup, self.bindings());
        Ok(())
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let vm = self.clone();
        ActionBindings::new().on(
            "integration-action",
            self.ctx.guard("integration-action", move |e| vm.clone().run(e)),
        )
    }

    async fn run(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let descriptor = find_integration(&id)
            .ok_or_else(|| DashboardError::validation(format!("Unknown integration '{}'", id)))?;
        let op: IntegrationOp = event.required_field("op", "Action")?.parse()?;

        let result = integrations_service::run_action(&self.ctx.api, descriptor.id, op).await?;
        self.ctx
            .announce(&result, &format!("{}: {} done", descriptor.label, op));
        self.reload().await
    }

    pub fn cards(&self) -> Vec<IntegrationCard> {
        self.cards.borrow().clone()
    }
}
