// ============================================================================
// CALENDAR VIEWMODEL - Calendar source list, sync and test controls
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use chrono::Utc;
use crate::error::DashboardResult;
use crate::models::{CalendarSource, NewCalendarSource};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::calendar_service;
use crate::viewmodels::context::PageContext;
use crate::views::render_calendar_page;

pub struct CalendarViewModel {
    ctx: PageContext,
    sources: RefCell<Vec<CalendarSource>>,
}

impl CalendarViewModel {
    pub fn new(ctx: PageContext) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            sources: RefCell::new(Vec::new()),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("calendar sources");
        self.reload().await
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let sources = calendar_service::list_sources(&self.ctx.api).await?;
        *self.sources.borrow_mut() = sources;
        self.render();
        Ok(())
    }

    fn render(self: &Rc<Self>) {
        let markup = render_calendar_page(&self.sources.borrow(), Utc::now());
        self.ctx.render(markup, self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let ctx = &self.ctx;
        let create = self.clone();
        let toggle = self.clone();
        let delete = self.clone();
        let sync = self.clone();
        let test = self.clone();
        let sync_all = self.clone();
        let test_url = self.clone();
        ActionBindings::new()
            .on("calendar-create", ctx.guard("calendar-create", move |e| create.clone().create(e)))
            .on("calendar-toggle", ctx.guard("calendar-toggle", move |e| toggle.clone().toggle(e)))
            .on("calendar-delete", ctx.guard("calendar-delete", move |e| delete.clone().delete(e)))
            .on("calendar-sync", ctx.guard("calendar-sync", move |e| sync.clone().sync(e)))
            .on("calendar-test", ctx.guard("calendar-test", move |e| test.clone().test(e)))
            .on("calendar-sync-all", ctx.guard("calendar-sync-all", move |_| sync_all.clone().sync_all()))
            .on("calendar-test-url", ctx.guard("calendar-test-url", move |e| test_url.clone().test_url(e)))
    }

    async fn create(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let source = NewCalendarSource::new(
            event.required_field("name", "Name")?,
            event.required_field("url", "URL")?,
            event.optional_field("provider"),
        );
        calendar_service::create_source(&self.ctx.api, &source).await?;
        self.ctx.success("Calendar source added");
        self.reload().await
    }

    async fn toggle(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let currently = match event.field("enabled") {
            Some(flag) => flag == "true",
            None => self
                .sources
                .borrow()
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.enabled)
                .unwrap_or(false),
        };
        calendar_service::set_enabled(&self.ctx.api, &id, !currently).await?;
        self.ctx.success(if currently { "Source disabled" } else { "Source enabled" });
        self.reload().await
    }

    async fn delete(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        calendar_service::delete_source(&self.ctx.api, &id).await?;
        self.ctx.success("Calendar source removed");
        self.reload().await
    }

    async fn sync(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let result = calendar_service::sync_source(&self.ctx.api, &id).await?;
        self.ctx.announce(&result, "Sync complete");
        self.reload().await
    }

    async fn test(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let result = calendar_service::test_source(&self.ctx.api, &id).await?;
        self.ctx.announce(&result, "Connection OK");
        Ok(())
    }

    async fn sync_all(self: Rc<Self>) -> DashboardResult<()> {
        let result = calendar_service::sync_all(&self.ctx.api).await?;
        self.ctx.announce(&result, "All sources synced");
        self.reload().await
    }

    async fn test_url(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let url = event.required_field("url", "URL")?;
        let result = calendar_service::test_url(&self.ctx.api, &url).await?;
        self.ctx.announce(&result, "Feed is reachable");
        Ok(())
    }
}
