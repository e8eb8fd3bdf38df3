// In-memory implementations of every browser seam, for native unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use async_trait::async_trait;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde_json::Value;
use crate::error::{DashboardError, DashboardResult};
use crate::platform::{ActionBindings, ActionEvent, Scheduler, ToastLevel, Toaster, ViewTarget};
use crate::router::HashLocation;
use crate::services::api_client::{ApiClient, ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::state::{AuthStatus, Store, TimerHandle};
use crate::models::auth::UserProfile;
use crate::utils::storage::KeyValueStorage;
use crate::viewmodels::context::PageContext;

pub const TEST_BASE_URL: &str = "http://backend.test";

#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

pub struct FakeTimer {
    cancelled: Rc<Cell<bool>>,
}

impl FakeTimer {
    pub fn new() -> (Box<FakeTimer>, Rc<Cell<bool>>) {
        let cancelled = Rc::new(Cell::new(false));
        (Box::new(FakeTimer { cancelled: cancelled.clone() }), cancelled)
    }
}

impl TimerHandle for FakeTimer {
    fn cancel(self: Box<Self>) {
        self.cancelled.set(true);
    }
}

#[derive(Default)]
pub struct MemoryLocation {
    fragment: RefCell<String>,
    changes: Cell<usize>,
}

impl MemoryLocation {
    pub fn change_count(&self) -> usize {
        self.changes.get()
    }
}

impl HashLocation for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, route: &str) {
        *self.fragment.borrow_mut() = route.to_string();
        self.changes.set(self.changes.get() + 1);
    }
}

#[derive(Default)]
pub struct MemoryView {
    html: RefCell<String>,
    bindings: RefCell<ActionBindings>,
    highlighted: RefCell<Option<String>>,
    renders: Cell<usize>,
}

impl MemoryView {
    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }

    pub fn highlighted(&self) -> Option<String> {
        self.highlighted.borrow().clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.bindings.borrow().contains(action)
    }

    /// Run the bound handler to completion. `false` when nothing is bound.
    pub fn dispatch(&self, event: ActionEvent) -> bool {
        let bindings = self.bindings.borrow().clone();
        match bindings.dispatch(event) {
            Some(future) => {
                block_on(future);
                true
            }
            None => false,
        }
    }
}

impl ViewTarget for MemoryView {
    fn render(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
        self.renders.set(self.renders.get() + 1);
    }

    fn bind(&self, bindings: ActionBindings) {
        *self.bindings.borrow_mut() = bindings;
    }

    fn highlight_route(&self, route: &str) {
        *self.highlighted.borrow_mut() = Some(route.to_string());
    }
}

#[derive(Default)]
pub struct RecordingToaster {
    toasts: RefCell<Vec<(ToastLevel, String)>>,
}

impl RecordingToaster {
    pub fn toasts(&self) -> Vec<(ToastLevel, String)> {
        self.toasts.borrow().clone()
    }

    pub fn last(&self) -> Option<(ToastLevel, String)> {
        self.toasts.borrow().last().cloned()
    }
}

impl Toaster for RecordingToaster {
    fn show(&self, level: ToastLevel, message: &str) {
        self.toasts.borrow_mut().push((level, message.to_string()));
    }
}

struct ScheduledTick {
    period_ms: u32,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
    cancelled: Rc<Cell<bool>>,
}

/// Timers fire only when the test calls `tick`; spawned tasks wait for
/// `run_spawned`.
#[derive(Default)]
pub struct ManualScheduler {
    ticks: RefCell<Vec<ScheduledTick>>,
    spawned: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl ManualScheduler {
    pub fn active_timers(&self) -> Vec<u32> {
        self.ticks
            .borrow()
            .iter()
            .filter(|t| !t.cancelled.get())
            .map(|t| t.period_ms)
            .collect()
    }

    /// Fire every live timer once, then drain spawned work.
    pub fn tick(&self) {
        let live: Vec<_> = self
            .ticks
            .borrow()
            .iter()
            .filter(|t| !t.cancelled.get())
            .map(|t| t.tick.clone())
            .collect();
        for tick in live {
            (tick.borrow_mut())();
        }
        self.run_spawned();
    }

    pub fn run_spawned(&self) {
        loop {
            let batch: Vec<_> = self.spawned.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                block_on(task);
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let (timer, cancelled) = FakeTimer::new();
        self.ticks.borrow_mut().push(ScheduledTick {
            period_ms,
            tick: Rc::new(RefCell::new(tick)),
            cancelled,
        });
        timer
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawned.borrow_mut().push(task);
    }
}

#[derive(Clone)]
enum Scripted {
    Reply(DashboardResult<ApiResponse>),
    Hang,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Scripted>,
    front_served: bool,
}

/// Scripted backend keyed by method and path. Replies are served in order and
/// the last one repeats; unscripted calls answer 404.
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<HashMap<(HttpMethod, String), Script>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    fn push(&self, method: HttpMethod, path: &str, reply: Scripted) {
        self.script
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .replies
            .push_back(reply);
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Scripted::Reply(Ok(ApiResponse {
                status,
                status_text: String::new(),
                body: body.to_string(),
            })),
        );
    }

    pub fn respond_json(&self, method: HttpMethod, path: &str, body: Value) {
        self.respond(method, path, 200, &body.to_string());
    }

    pub fn fail(&self, method: HttpMethod, path: &str, error: DashboardError) {
        self.push(method, path, Scripted::Reply(Err(error)));
    }

    /// Never resolves.
    pub fn hang(&self, method: HttpMethod, path: &str) {
        self.push(method, path, Scripted::Hang);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<ApiRequest> {
        let url = format!("{}{}", TEST_BASE_URL, path);
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    fn next(&self, method: HttpMethod, path: &str) -> Option<Scripted> {
        let mut script = self.script.borrow_mut();
        let entry = script.get_mut(&(method, path.to_string()))?;
        if entry.front_served && entry.replies.len() > 1 {
            entry.replies.pop_front();
        }
        entry.front_served = true;
        entry.replies.front().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> DashboardResult<ApiResponse> {
        let path = request
            .url
            .strip_prefix(TEST_BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;
        self.requests.borrow_mut().push(request);

        match self.next(method, &path) {
            Some(Scripted::Reply(reply)) => reply,
            Some(Scripted::Hang) => futures::future::pending::<DashboardResult<ApiResponse>>().await,
            None => Ok(ApiResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: format!(r#"{{"error":"no script for {} {}"}}"#, method, path),
            }),
        }
    }
}

pub fn api_fixture() -> (Store, Rc<MockTransport>, ApiClient) {
    let store = Store::new(Rc::new(MemoryStorage::default()));
    let transport = Rc::new(MockTransport::default());
    let api = ApiClient::new(TEST_BASE_URL, store.clone(), transport.clone());
    (store, transport, api)
}

/// Everything a page controller needs, wired to in-memory seams.
pub struct PageHarness {
    pub store: Store,
    pub transport: Rc<MockTransport>,
    pub view: Rc<MemoryView>,
    pub toaster: Rc<RecordingToaster>,
    pub scheduler: Rc<ManualScheduler>,
    pub ctx: PageContext,
}

impl PageHarness {
    pub fn new() -> Self {
        let (store, transport, api) = api_fixture();
        let view = Rc::new(MemoryView::default());
        let toaster = Rc::new(RecordingToaster::default());
        let scheduler = Rc::new(ManualScheduler::default());
        let ctx = PageContext::new(
            store.clone(),
            api,
            view.clone(),
            toaster.clone(),
            scheduler.clone(),
        );
        Self { store, transport, view, toaster, scheduler, ctx }
    }

    pub fn signed_in() -> Self {
        let harness = Self::new();
        harness.store.set_auth_state(
            AuthStatus::Authenticated,
            Some("test-token".to_string()),
            Some(UserProfile::named("Ada")),
        );
        harness
    }

    pub fn dispatch(&self, event: ActionEvent) -> bool {
        self.view.dispatch(event)
    }

    pub fn last_toast(&self) -> Option<(ToastLevel, String)> {
        self.toaster.last()
    }
}
