// ============================================================================
// BROWSER ADAPTERS - web-sys / gloo implementations of the platform seams
// ============================================================================
// App-lifetime listeners (container delegation, hashchange, keydown) are
// registered once at startup and leaked with `Closure::forget`. Containers
// keep their listeners across re-renders because only `innerHTML` changes.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent};
use futures::future::LocalBoxFuture;
use crate::error::{DashboardError, DashboardResult};
use crate::platform::{ActionBindings, ActionEvent, Scheduler, ToastLevel, Toaster, ViewTarget};
use crate::router::Router;
use crate::state::TimerHandle;
use crate::viewmodels::CommandPalette;

pub fn document() -> DashboardResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DashboardError::Dom("no document".to_string()))
}

pub fn element_by_id(id: &str) -> DashboardResult<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DashboardError::Dom(format!("#{} not found", id)))
}

pub fn user_agent() -> Option<String> {
    web_sys::window()?.navigator().user_agent().ok()
}

/// Closest ancestor (or self) carrying `data-action`.
fn action_element(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest("[data-action]").ok().flatten()
}

/// `data-id` becomes the target; every other `data-*` becomes a field.
fn read_data_attributes(element: &Element, action: &mut ActionEvent) {
    for name in element.get_attribute_names().iter().filter_map(|n| n.as_string()) {
        let Some(key) = name.strip_prefix("data-") else { continue };
        let Some(value) = element.get_attribute(&name) else { continue };
        match key {
            "action" => {}
            "id" => action.target_id = Some(value),
            other => {
                action.fields.insert(other.to_string(), value);
            }
        }
    }
}

/// Text entries of a form; file inputs are skipped.
fn read_form(form: &HtmlFormElement, action: &mut ActionEvent) {
    let Ok(data) = web_sys::FormData::new_with_form(form) else { return };
    let Ok(Some(entries)) = js_sys::try_iter(data.as_ref()) else { return };
    for entry in entries.flatten() {
        let pair: js_sys::Array = entry.unchecked_into();
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            action.fields.insert(name, value);
        }
    }
}

fn enclosing_form(element: &Element) -> Option<HtmlFormElement> {
    element
        .closest("form")
        .ok()
        .flatten()
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
}

fn is_text_control(element: &Element) -> bool {
    matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

/// A container that pages render into. Clicks, submits and inputs inside it
/// are turned into `ActionEvent`s for whatever bindings were set last.
pub struct BrowserView {
    root: Element,
    nav_root: Option<Element>,
    bindings: Rc<RefCell<ActionBindings>>,
}

impl BrowserView {
    pub fn attach(root_id: &str, nav_root_id: Option<&str>) -> DashboardResult<Rc<Self>> {
        let root = element_by_id(root_id)?;
        let nav_root = match nav_root_id {
            Some(id) => Some(element_by_id(id)?),
            None => None,
        };
        let view = Rc::new(Self {
            root,
            nav_root,
            bindings: Rc::new(RefCell::new(ActionBindings::new())),
        });
        view.listen("click", Self::on_click)?;
        view.listen("submit", Self::on_submit)?;
        view.listen("input", Self::on_input)?;
        log::debug!("🧩 [VIEW] Attached to #{}", root_id);
        Ok(view)
    }

    fn listen(&self, kind: &str, extract: fn(&Event) -> Option<ActionEvent>) -> DashboardResult<()> {
        let bindings = self.bindings.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(action) = extract(&event) else { return };
            event.prevent_default();
            // Clone so a handler may re-render and rebind while it runs
            let current = bindings.borrow().clone();
            if let Some(future) = current.dispatch(action) {
                wasm_bindgen_futures::spawn_local(future);
            }
        }) as Box<dyn FnMut(Event)>);
        self.root
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn on_click(event: &Event) -> Option<ActionEvent> {
        let element = action_element(event)?;
        // Forms dispatch on submit, inputs on input
        if element.tag_name() == "FORM" || is_text_control(&element) {
            return None;
        }
        let mut action = ActionEvent::new(&element.get_attribute("data-action")?);
        if let Some(form) = enclosing_form(&element) {
            read_form(&form, &mut action);
        }
        read_data_attributes(&element, &mut action);
        Some(action)
    }

    fn on_submit(event: &Event) -> Option<ActionEvent> {
        let form = event.target()?.dyn_into::<HtmlFormElement>().ok()?;
        let name = form.get_attribute("data-action")?;
        let mut action = ActionEvent::new(&name);
        read_form(&form, &mut action);
        read_data_attributes(&form, &mut action);
        Some(action)
    }

    fn on_input(event: &Event) -> Option<ActionEvent> {
        let element = event.target()?.dyn_into::<Element>().ok()?;
        let name = element.get_attribute("data-action")?;
        let input = element.dyn_into::<HtmlInputElement>().ok()?;
        Some(ActionEvent::new(&name).with_field(&input.name(), &input.value()))
    }

    fn focus_autofocus(&self) {
        let Ok(Some(element)) = self.root.query_selector("[autofocus]") else { return };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            let _ = input.focus();
            let end = input.value().len() as u32;
            let _ = input.set_selection_range(end, end);
        } else if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let _ = html.focus();
        }
    }
}

impl ViewTarget for BrowserView {
    fn render(&self, html: &str) {
        self.root.set_inner_html(html);
        self.focus_autofocus();
    }

    fn bind(&self, bindings: ActionBindings) {
        *self.bindings.borrow_mut() = bindings;
    }

    fn highlight_route(&self, route: &str) {
        let Some(nav) = &self.nav_root else { return };
        let Ok(links) = nav.query_selector_all("[data-route]") else { return };
        for index in 0..links.length() {
            let Some(link) = links.get(index).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
            let active = link.get_attribute("data-route").as_deref() == Some(route);
            let _ = link.class_list().toggle_with_force("active", active);
        }
    }
}

/// Stacked toasts that remove themselves after `duration_ms`.
pub struct BrowserToaster {
    container_id: String,
    duration_ms: u32,
}

impl BrowserToaster {
    pub fn new(container_id: &str, duration_ms: u32) -> Self {
        Self {
            container_id: container_id.to_string(),
            duration_ms,
        }
    }

    fn try_show(&self, level: ToastLevel, message: &str) -> DashboardResult<()> {
        let container = element_by_id(&self.container_id)?;
        let toast = document()?.create_element("div")?;
        toast.set_class_name(&format!("toast {}", level.css_class()));
        toast.set_attribute("role", "status")?;
        toast.set_text_content(Some(message));
        container.append_child(&toast)?;
        Timeout::new(self.duration_ms, move || toast.remove()).forget();
        Ok(())
    }
}

impl Toaster for BrowserToaster {
    fn show(&self, level: ToastLevel, message: &str) {
        if let Err(e) = self.try_show(level, message) {
            log::error!("❌ [TOAST] Could not show '{}': {}", message, e);
        }
    }
}

/// `setInterval` timers and `spawn_local` tasks.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        Box::new(Interval::new(period_ms, move || tick()))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Run the router on every fragment change.
pub fn listen_hashchange(router: Router) -> DashboardResult<()> {
    let window = web_sys::window().ok_or_else(|| DashboardError::Dom("no window".to_string()))?;
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        let router = router.clone();
        wasm_bindgen_futures::spawn_local(async move {
            router.handle_route_change().await;
        });
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Global shortcuts for the command palette (`Ctrl+K` / `Cmd+K`, arrows,
/// Enter, Escape).
pub fn listen_palette_keys(palette: Rc<CommandPalette>) -> DashboardResult<()> {
    let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let ctrl_or_meta = event.ctrl_key() || event.meta_key();
        if palette.handle_key(&event.key(), ctrl_or_meta) {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document()?.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
