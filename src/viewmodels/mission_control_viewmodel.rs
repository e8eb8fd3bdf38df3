// ============================================================================
// MISSION CONTROL VIEWMODEL - Home dashboard with periodic refresh
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use chrono::Utc;
use futures::FutureExt;
use crate::error::DashboardResult;
use crate::models::DashboardSnapshot;
use crate::platform::ActionBindings;
use crate::services::dashboard_service;
use crate::utils::DASHBOARD_REFRESH_TIMER;
use crate::viewmodels::context::PageContext;
use crate::views::render_mission_control;

pub struct MissionControlViewModel {
    ctx: PageContext,
    refresh_ms: u32,
    snapshot: RefCell<Option<DashboardSnapshot>>,
}

impl MissionControlViewModel {
    pub fn new(ctx: PageContext, refresh_ms: u32) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            refresh_ms,
            snapshot: RefCell::new(None),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("mission control");
        self.refresh().await?;
        self.start_polling();
        Ok(())
    }

    async fn refresh(self: &Rc<Self>) -> DashboardResult<()> {
        let snapshot = dashboard_service::fetch_snapshot(&self.ctx.api).await?;
        let markup = render_mission_control(&snapshot, Utc::now());
        *self.snapshot.borrow_mut() = Some(snapshot);
        self.ctx.render(markup, self.bindings());
        Ok(())
    }

    /// Background refresh. Failures keep the last snapshot on screen.
    fn start_polling(self: &Rc<Self>) {
        let vm = self.clone();
        self.ctx.every(
            DASHBOARD_REFRESH_TIMER,
            self.refresh_ms,
            Box::new(move || {
                let vm = vm.clone();
                vm.ctx.clone().spawn(
                    async move {
                        if let Err(e) = vm.refresh().await {
                            if e.is_auth() {
                                vm.ctx.report("dashboard-poll", &e);
                            } else {
                                log::warn!("⚠️ [DASHBOARD] Refresh skipped: {}", e);
                            }
                        }
                    }
                    .boxed_local(),
                );
            }),
        );
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let vm = self.clone();
        ActionBindings::new().on(
            "dashboard-refresh",
            self.ctx.guard("dashboard-refresh", move |_| {
                let vm = vm.clone();
                async move { vm.refresh().await }
            }),
        )
    }

    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.snapshot.borrow().clone()
    }
}
