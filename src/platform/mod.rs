// ============================================================================
// PLATFORM - Seams between page logic and the browser
// ============================================================================
// Pages talk to these traits only. `browser` implements them with web-sys and
// gloo on wasm32; tests plug in-memory versions.
// ============================================================================

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use futures::future::LocalBoxFuture;
use crate::error::{DashboardError, DashboardResult};
use crate::state::timers::TimerHandle;

#[cfg(target_arch = "wasm32")]
pub mod browser;

/// A user action coming out of a rendered view (button click or form submit).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionEvent {
    pub action: String,
    /// `data-id` of the element that triggered the action.
    pub target_id: Option<String>,
    /// Named form fields (or `data-*` attributes for plain buttons).
    pub fields: BTreeMap<String, String>,
}

impl ActionEvent {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, id: &str) -> Self {
        self.target_id = Some(id.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Trimmed field value, `None` when missing or blank.
    pub fn optional_field(&self, name: &str) -> Option<String> {
        self.field(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }

    /// Presence check done before any backend call.
    pub fn required_field(&self, name: &str, label: &str) -> DashboardResult<String> {
        self.optional_field(name)
            .ok_or_else(|| DashboardError::validation(format!("{} is required", label)))
    }

    /// Checkbox semantics: absent means unchecked.
    pub fn checkbox(&self, name: &str) -> bool {
        matches!(self.field(name), Some("on") | Some("true") | Some("1"))
    }

    pub fn required_target(&self) -> DashboardResult<String> {
        self.target_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DashboardError::validation("Missing item id"))
    }
}

pub type ActionFuture = LocalBoxFuture<'static, ()>;
pub type ActionHandler = Rc<dyn Fn(ActionEvent) -> ActionFuture>;

/// Action name -> handler, registered on a view after each render.
#[derive(Clone, Default)]
pub struct ActionBindings {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, action: &str, handler: F) -> Self
    where
        F: Fn(ActionEvent) -> ActionFuture + 'static,
    {
        self.handlers.insert(action.to_string(), Rc::new(handler));
        self
    }

    /// Future for the matching handler, `None` for unbound actions.
    pub fn dispatch(&self, event: ActionEvent) -> Option<ActionFuture> {
        match self.handlers.get(&event.action) {
            Some(handler) => Some(handler(event)),
            None => {
                log::warn!("⚠️ [ACTIONS] No handler bound for '{}'", event.action);
                None
            }
        }
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    pub fn actions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }
}

/// A DOM container pages render into.
pub trait ViewTarget {
    fn render(&self, html: &str);

    /// Replace the action handlers for this container.
    fn bind(&self, bindings: ActionBindings);

    /// Cosmetic "active route" marker in navigation.
    fn highlight_route(&self, _route: &str) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Info => "toast-info",
            Self::Error => "toast-error",
        }
    }
}

/// Transient user-facing notifications.
pub trait Toaster {
    fn show(&self, level: ToastLevel, message: &str);
}

/// Timers and background tasks.
pub trait Scheduler {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle>;
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
