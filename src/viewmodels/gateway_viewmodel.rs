// ============================================================================
// GATEWAY VIEWMODEL - Free-form gateway config as a typed form
// ============================================================================
// The loaded object is kept as the baseline; saves diff against it.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::gateway::{changed_fields, unflatten};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::gateway_service;
use crate::viewmodels::context::PageContext;
use crate::views::render_gateway_page;

pub struct GatewayViewModel {
    ctx: PageContext,
    /// Config as last loaded; saves diff against it.
    config: RefCell<Value>,
}

impl GatewayViewModel {
    pub fn new(ctx: PageContext) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            config: RefCell::new(Value::Null),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("gateway configuration");
        self.reload().await
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let config = gateway_service::load_config(&self.ctx.api).await?;
        self.show(config);
        Ok(())
    }

    fn show(self: &Rc<Self>, config: Value) {
        let markup = render_gateway_page(&config);
        *self.config.borrow_mut() = config;
        self.ctx.render(markup, self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let save = self.clone();
        let reset = self.clone();
        ActionBindings::new()
            .on("gateway-save", self.ctx.guard("gateway-save", move |e| save.clone().save(e)))
            .on("gateway-reset", self.ctx.guard("gateway-reset", move |_| reset.clone().reset()))
    }

    async fn save(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let changes = changed_fields(&self.config.borrow(), &event.fields)?;
        if changes.is_empty() {
            self.ctx.info("No changes");
            return Ok(());
        }
        log::info!("🛠️ [GATEWAY] Saving {} changed key(s)", changes.len());
        let updated = gateway_service::patch_config(&self.ctx.api, &unflatten(&changes)).await?;
        self.ctx.success("Gateway configuration saved");
        match updated {
            Some(config) => {
                self.show(config);
                Ok(())
            }
            None => self.reload().await,
        }
    }

    async fn reset(self: Rc<Self>) -> DashboardResult<()> {
        let defaults = gateway_service::reset_config(&self.ctx.api).await?;
        self.ctx.success("Gateway configuration reset");
        if defaults.is_object() {
            self.show(defaults);
            Ok(())
        } else {
            self.reload().await
        }
    }
}
