// ============================================================================
// ROUTER - Hash-fragment route dispatcher
// ============================================================================
// States: no route active / route active(name). Each change runs the outgoing
// cleanup, lets the store drop timers and requests, then awaits the incoming
// loader. Overlapping changes are not serialized: a second hashchange that
// arrives while a loader is pending starts another loader.
// ============================================================================

pub mod location;

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use crate::error::{DashboardError, DashboardResult};
use crate::platform::{ActionBindings, ViewTarget};
use crate::state::{AuthStatus, Store};
use crate::views::shell;

pub use location::{route_from_fragment, HashLocation};

pub type LoaderFuture = LocalBoxFuture<'static, DashboardResult<()>>;
pub type Loader = Rc<dyn Fn() -> LoaderFuture>;
pub type Cleanup = Rc<dyn Fn() -> DashboardResult<()>>;
/// Legacy dispatch for unregistered routes: `Some` when it handles the route.
pub type Fallback = Rc<dyn Fn(&str) -> Option<LoaderFuture>>;

/// `{on_enter, on_exit?}` pair for one route key.
#[derive(Clone)]
pub struct Route {
    pub label: String,
    pub on_enter: Loader,
    pub on_exit: Option<Cleanup>,
}

impl Route {
    pub fn new<F, Fut>(label: &str, loader: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = DashboardResult<()>> + 'static,
    {
        Self {
            label: label.to_string(),
            on_enter: Rc::new(move || loader().boxed_local()),
            on_exit: None,
        }
    }

    pub fn with_cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn() -> DashboardResult<()> + 'static,
    {
        self.on_exit = Some(Rc::new(cleanup));
        self
    }
}

#[derive(Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Route>,
    order: Vec<String>,
}

impl RouteTable {
    /// Re-inserting a key overwrites the previous route.
    pub fn insert(&mut self, path: &str, route: Route) {
        if !self.routes.contains_key(path) {
            self.order.push(path.to_string());
        }
        self.routes.insert(path.to_string(), route);
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// `(path, label)` in registration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.order
            .iter()
            .filter_map(|path| self.routes.get(path).map(|r| (path.clone(), r.label.clone())))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Active(String),
}

/// What a call to `handle_route_change` ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    Unchanged(String),
    Loaded(String),
    Failed(String, DashboardError),
    Fallback(String),
    NotFound(String),
}

#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

struct RouterInner {
    table: RefCell<RouteTable>,
    state: RefCell<RouterState>,
    fallback: RefCell<Option<Fallback>>,
    store: Store,
    location: Rc<dyn HashLocation>,
    view: Rc<dyn ViewTarget>,
    home_route: String,
}

impl Router {
    pub fn new(
        store: Store,
        location: Rc<dyn HashLocation>,
        view: Rc<dyn ViewTarget>,
        home_route: &str,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                table: RefCell::new(RouteTable::default()),
                state: RefCell::new(RouterState::Idle),
                fallback: RefCell::new(None),
                store,
                location,
                view,
                home_route: home_route.to_string(),
            }),
        }
    }

    pub fn register(&self, path: &str, loader: Loader, cleanup: Option<Cleanup>) {
        let label = path.to_string();
        self.register_route(path, Route { label, on_enter: loader, on_exit: cleanup });
    }

    pub fn register_route(&self, path: &str, route: Route) {
        log::debug!("🧭 [ROUTER] Registered '{}'", path);
        self.inner.table.borrow_mut().insert(path, route);
    }

    pub fn set_fallback(&self, fallback: Fallback) {
        *self.inner.fallback.borrow_mut() = Some(fallback);
    }

    pub fn routes(&self) -> Vec<(String, String)> {
        self.inner.table.borrow().entries()
    }

    pub fn home_route(&self) -> &str {
        &self.inner.home_route
    }

    pub fn state(&self) -> RouterState {
        self.inner.state.borrow().clone()
    }

    pub fn active_route(&self) -> Option<String> {
        match &*self.inner.state.borrow() {
            RouterState::Active(name) => Some(name.clone()),
            RouterState::Idle => None,
        }
    }

    /// Point the fragment at `path`. The hashchange event runs the loader.
    pub fn navigate(&self, path: &str) {
        let target = if path.trim().is_empty() {
            self.inner.home_route.as_str()
        } else {
            path.trim()
        };
        log::info!("🧭 [ROUTER] Navigate -> '{}'", target);
        self.inner.location.set_fragment(target);
    }

    /// Forget the active route and dispatch the current fragment again.
    pub async fn reload(&self) -> RouteOutcome {
        *self.inner.state.borrow_mut() = RouterState::Idle;
        self.handle_route_change().await
    }

    pub async fn handle_route_change(&self) -> RouteOutcome {
        let target = route_from_fragment(&self.inner.location.fragment(), &self.inner.home_route);

        let outgoing = match &*self.inner.state.borrow() {
            RouterState::Active(name) if *name == target => {
                return RouteOutcome::Unchanged(target);
            }
            RouterState::Active(name) => Some(name.clone()),
            RouterState::Idle => None,
        };

        if let Some(outgoing) = outgoing {
            let cleanup = self
                .inner
                .table
                .borrow()
                .get(&outgoing)
                .and_then(|route| route.on_exit.clone());
            if let Some(cleanup) = cleanup {
                if let Err(e) = cleanup() {
                    log::error!("❌ [ROUTER] Cleanup for '{}' failed: {}", outgoing, e);
                }
            }
        }

        // Route changes own timer lifetime
        self.inner.store.clear_all_intervals();
        self.inner.store.set_current_tab(&target);

        *self.inner.state.borrow_mut() = RouterState::Active(target.clone());
        self.inner.view.highlight_route(&target);

        let loader = self
            .inner
            .table
            .borrow()
            .get(&target)
            .map(|route| route.on_enter.clone());

        match loader {
            Some(loader) => {
                log::info!("🧭 [ROUTER] Loading '{}'", target);
                match loader().await {
                    Ok(()) => RouteOutcome::Loaded(target),
                    Err(e) => {
                        self.present_failure(&target, &e);
                        RouteOutcome::Failed(target, e)
                    }
                }
            }
            None => {
                let fallback = self.inner.fallback.borrow().clone();
                let handled = fallback.and_then(|fallback| fallback(&target));
                match handled {
                    Some(legacy) => {
                        log::info!("🧭 [ROUTER] '{}' handled by legacy dispatch", target);
                        match legacy.await {
                            Ok(()) => RouteOutcome::Fallback(target),
                            Err(e) => {
                                self.present_failure(&target, &e);
                                RouteOutcome::Failed(target, e)
                            }
                        }
                    }
                    None => {
                        log::warn!("⚠️ [ROUTER] No route registered for '{}'", target);
                        self.inner
                            .view
                            .render(&shell::not_found(&target, &self.inner.home_route).into_string());
                        RouteOutcome::NotFound(target)
                    }
                }
            }
        }
    }

    fn present_failure(&self, route: &str, error: &DashboardError) {
        match error {
            // Aborted by a later navigation; that page owns the view now
            DashboardError::Cancelled => {
                log::debug!("🛑 [ROUTER] Loader for '{}' cancelled", route);
            }
            DashboardError::Unauthorized => {
                log::warn!("🔒 [ROUTER] '{}' requires authentication", route);
                self.inner.store.set_auth_state(AuthStatus::Unauthenticated, None, None);
                self.inner.view.render(&shell::login_required().into_string());
            }
            other => {
                log::error!("❌ [ROUTER] Loader for '{}' failed: {}", route, other);
                self.inner.view.render(
                    &shell::route_error(route, &other.to_string(), &self.inner.home_route)
                        .into_string(),
                );
                self.inner.view.bind(self.retry_bindings());
            }
        }
    }

    /// The view holds these, so they reach the router through a weak handle.
    fn retry_bindings(&self) -> ActionBindings {
        let weak: Weak<RouterInner> = Rc::downgrade(&self.inner);
        ActionBindings::new().on(shell::RETRY_ROUTE_ACTION, move |_| {
            let weak = weak.clone();
            async move {
                if let Some(inner) = weak.upgrade() {
                    Router { inner }.reload().await;
                }
            }
            .boxed_local()
        })
    }
}
