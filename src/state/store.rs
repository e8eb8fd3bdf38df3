// ============================================================================
// STORE - Auth/navigation bookkeeping shared by every page
// ============================================================================
// Explicit context object (cheap Rc clone) handed to pages and the router.
// Every mutation goes through these methods; no RefCell borrow is held while
// a callback, timer cancel or request cancel runs, so callbacks may re-enter.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::error::DashboardResult;
use crate::models::auth::UserProfile;
use crate::state::auth_state::{AuthSnapshot, AuthStatus};
use crate::state::navigation_state::NavigationSnapshot;
use crate::state::reactivity::{StoreEvent, Subscribers, Subscription};
use crate::state::requests::{CancelHandle, PendingRequestRegistry};
use crate::state::timers::{TimerHandle, TimerRegistry};
use crate::utils::constants::TOKEN_STORAGE_KEY;
use crate::utils::storage::KeyValueStorage;

/// Invoked when the tab it was registered for is left.
pub type DestroyCallback = Rc<dyn Fn() -> DashboardResult<()>>;

#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

struct StoreInner {
    auth: RefCell<AuthSnapshot>,
    navigation: RefCell<NavigationSnapshot>,
    timers: RefCell<TimerRegistry>,
    requests: RefCell<PendingRequestRegistry>,
    destroy_callbacks: RefCell<HashMap<String, DestroyCallback>>,
    subscribers: Rc<Subscribers>,
    storage: Rc<dyn KeyValueStorage>,
}

impl Store {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                auth: RefCell::new(AuthSnapshot::default()),
                navigation: RefCell::new(NavigationSnapshot::default()),
                timers: RefCell::new(TimerRegistry::default()),
                requests: RefCell::new(PendingRequestRegistry::default()),
                destroy_callbacks: RefCell::new(HashMap::new()),
                subscribers: Rc::new(Subscribers::default()),
                storage,
            }),
        }
    }

    /// New store that picks up a token persisted by a previous page load.
    /// Status stays `Checking` until the backend confirms the token.
    pub fn restore(storage: Rc<dyn KeyValueStorage>) -> Self {
        let token = storage.get(TOKEN_STORAGE_KEY);
        let store = Self::new(storage);
        if token.is_some() {
            log::info!("💾 [STORE] Token found in storage, session pending verification");
            store.inner.auth.borrow_mut().token = token;
        }
        store
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Replace all auth fields at once, mirror the token into storage, notify.
    pub fn set_auth_state(&self, status: AuthStatus, token: Option<String>, user: Option<UserProfile>) {
        match &token {
            Some(value) => {
                if let Err(e) = self.inner.storage.set(TOKEN_STORAGE_KEY, value) {
                    log::warn!("⚠️ [STORE] Token not persisted: {}", e);
                }
            }
            None => self.inner.storage.remove(TOKEN_STORAGE_KEY),
        }

        let snapshot = AuthSnapshot { status, token, user };
        *self.inner.auth.borrow_mut() = snapshot.clone();
        log::info!("🔐 [STORE] Auth state -> {}", status);
        self.inner.subscribers.notify(&StoreEvent::Auth(snapshot));
    }

    pub fn auth(&self) -> AuthSnapshot {
        self.inner.auth.borrow().clone()
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.inner.auth.borrow().status
    }

    pub fn get_token(&self) -> Option<String> {
        self.inner.auth.borrow().token.clone()
    }

    pub fn get_user(&self) -> Option<UserProfile> {
        self.inner.auth.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.auth.borrow().is_authenticated()
    }

    /// Backing key-value storage, shared with the guest bootstrap.
    pub fn storage(&self) -> Rc<dyn KeyValueStorage> {
        self.inner.storage.clone()
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Register a repeating timer; an older timer with the same name is cancelled.
    pub fn register_interval(&self, name: &str, handle: Box<dyn TimerHandle>) {
        let replaced = self.inner.timers.borrow_mut().register(name, handle);
        if let Some(old) = replaced {
            log::debug!("⏱️ [STORE] Replacing interval '{}'", name);
            old.cancel();
        }
    }

    pub fn clear_interval(&self, name: &str) -> bool {
        let removed = self.inner.timers.borrow_mut().remove(name);
        match removed {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every registered timer. Safe to call on an empty registry.
    pub fn clear_all_intervals(&self) {
        let drained = self.inner.timers.borrow_mut().drain();
        if !drained.is_empty() {
            log::debug!("⏱️ [STORE] Clearing {} interval(s)", drained.len());
        }
        for (_, handle) in drained {
            handle.cancel();
        }
    }

    pub fn has_interval(&self, name: &str) -> bool {
        self.inner.timers.borrow().contains(name)
    }

    pub fn interval_count(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    // ------------------------------------------------------------------
    // Pending requests
    // ------------------------------------------------------------------

    /// One in-flight request per name: a newer registration aborts the older
    /// call, so mass-abort always reaches whatever is still running.
    pub fn register_request(&self, name: &str, handle: Box<dyn CancelHandle>) {
        let replaced = self.inner.requests.borrow_mut().register(name, handle);
        if let Some(old) = replaced {
            log::debug!("🛑 [STORE] Superseding request '{}'", name);
            old.cancel();
        }
    }

    pub fn unregister_request(&self, name: &str) -> bool {
        self.inner.requests.borrow_mut().unregister(name)
    }

    pub fn abort_all_requests(&self) {
        let drained = self.inner.requests.borrow_mut().drain();
        if !drained.is_empty() {
            log::info!("🛑 [STORE] Aborting {} pending request(s)", drained.len());
        }
        for (_, handle) in drained {
            handle.cancel();
        }
    }

    pub fn pending_request_count(&self) -> usize {
        self.inner.requests.borrow().len()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Register the callback run when `tab` stops being the current tab.
    pub fn register_destroy(&self, tab: &str, callback: DestroyCallback) {
        self.inner
            .destroy_callbacks
            .borrow_mut()
            .insert(tab.to_string(), callback);
    }

    pub fn set_current_tab(&self, name: &str) {
        let outgoing = self.inner.navigation.borrow().current_tab.clone();
        if outgoing.as_deref() == Some(name) {
            return;
        }

        if let Some(tab) = outgoing {
            let destroy = self.inner.destroy_callbacks.borrow().get(&tab).cloned();
            if let Some(destroy) = destroy {
                if let Err(e) = destroy() {
                    log::error!("❌ [STORE] Destroy callback for '{}' failed: {}", tab, e);
                }
            }
        }

        self.clear_all_intervals();
        self.abort_all_requests();

        let snapshot = {
            let mut navigation = self.inner.navigation.borrow_mut();
            navigation.shift_to(name);
            navigation.clone()
        };
        log::info!("🧭 [STORE] Current tab -> '{}'", name);
        self.inner.subscribers.notify(&StoreEvent::Navigation(snapshot));
    }

    pub fn navigation(&self) -> NavigationSnapshot {
        self.inner.navigation.borrow().clone()
    }

    pub fn current_tab(&self) -> Option<String> {
        self.inner.navigation.borrow().current_tab.clone()
    }

    pub fn previous_tab(&self) -> Option<String> {
        self.inner.navigation.borrow().previous_tab.clone()
    }

    // ------------------------------------------------------------------
    // Subscribers / reset
    // ------------------------------------------------------------------

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StoreEvent) -> DashboardResult<()> + 'static,
    {
        let id = self.inner.subscribers.add(Rc::new(callback));
        Subscription::new(id, &self.inner.subscribers)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Back to the startup state: logout and test teardown.
    pub fn reset(&self) {
        self.clear_all_intervals();
        self.abort_all_requests();
        self.inner.destroy_callbacks.borrow_mut().clear();
        self.inner.storage.remove(TOKEN_STORAGE_KEY);

        let auth = AuthSnapshot::default();
        *self.inner.auth.borrow_mut() = auth.clone();
        let navigation = NavigationSnapshot::default();
        *self.inner.navigation.borrow_mut() = navigation.clone();

        log::info!("🧹 [STORE] Reset");
        self.inner.subscribers.notify(&StoreEvent::Auth(auth));
        self.inner.subscribers.notify(&StoreEvent::Navigation(navigation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use futures::future::{AbortHandle, Abortable};
    use crate::error::DashboardError;
    use crate::testing::{FakeTimer, MemoryStorage};

    fn store() -> (Store, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::default());
        (Store::new(storage.clone()), storage)
    }

    #[test]
    fn set_auth_state_then_get_token() {
        let (store, storage) = store();
        store.set_auth_state(
            AuthStatus::Authenticated,
            Some("tok123".to_string()),
            Some(UserProfile::named("Alice")),
        );
        assert_eq!(store.get_token().as_deref(), Some("tok123"));
        assert!(store.is_authenticated());
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some("tok123"));
        assert_eq!(store.get_user().and_then(|u| u.name).as_deref(), Some("Alice"));
    }

    #[test]
    fn is_authenticated_false_without_token_or_status() {
        let (store, _) = store();
        store.set_auth_state(AuthStatus::Authenticated, None, None);
        assert!(!store.is_authenticated());
        store.set_auth_state(AuthStatus::Checking, Some("tok".to_string()), None);
        assert!(!store.is_authenticated());
        store.set_auth_state(AuthStatus::Unauthenticated, Some("tok".to_string()), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clearing_token_removes_it_from_storage() {
        let (store, storage) = store();
        store.set_auth_state(AuthStatus::Authenticated, Some("t".to_string()), None);
        store.set_auth_state(AuthStatus::Unauthenticated, None, None);
        assert_eq!(storage.get(TOKEN_STORAGE_KEY), None);
    }

    #[test]
    fn restore_reads_token_but_keeps_checking() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set(TOKEN_STORAGE_KEY, "persisted").unwrap();
        let store = Store::restore(storage);
        assert_eq!(store.get_token().as_deref(), Some("persisted"));
        assert_eq!(store.auth_status(), AuthStatus::Checking);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn second_interval_with_same_name_cancels_first() {
        let (store, _) = store();
        let (h1, h1_cancelled) = FakeTimer::new();
        let (h2, h2_cancelled) = FakeTimer::new();
        store.register_interval("x", h1);
        store.register_interval("x", h2);
        assert!(h1_cancelled.get());
        assert!(!h2_cancelled.get());
        assert_eq!(store.interval_count(), 1);
        assert!(store.has_interval("x"));
    }

    #[test]
    fn clear_all_intervals_is_idempotent() {
        let (store, _) = store();
        let (h, cancelled) = FakeTimer::new();
        store.register_interval("poll", h);
        store.clear_all_intervals();
        store.clear_all_intervals();
        assert!(cancelled.get());
        assert_eq!(store.interval_count(), 0);
    }

    #[test]
    fn clear_interval_by_name() {
        let (store, _) = store();
        store.register_interval("a", FakeTimer::new().0);
        assert!(store.clear_interval("a"));
        assert!(!store.clear_interval("a"));
    }

    #[test]
    fn tab_change_runs_destroy_and_clears_resources() {
        let (store, _) = store();
        let destroyed = Rc::new(Cell::new(0));
        let destroyed_clone = destroyed.clone();
        store.register_destroy("knowledge", Rc::new(move || {
            destroyed_clone.set(destroyed_clone.get() + 1);
            Ok(())
        }));

        store.set_current_tab("knowledge");
        let (timer, timer_cancelled) = FakeTimer::new();
        store.register_interval("poll", timer);
        let (abort, registration) = AbortHandle::new_pair();
        store.register_request("load", Box::new(abort));

        store.set_current_tab("dashboard");

        assert_eq!(destroyed.get(), 1);
        assert!(timer_cancelled.get());
        let aborted = futures::executor::block_on(Abortable::new(async {}, registration));
        assert!(aborted.is_err());
        assert_eq!(store.pending_request_count(), 0);
        assert_eq!(store.current_tab().as_deref(), Some("dashboard"));
        assert_eq!(store.previous_tab().as_deref(), Some("knowledge"));
    }

    #[test]
    fn same_tab_is_noop() {
        let (store, _) = store();
        let events = Rc::new(Cell::new(0));
        let events_clone = events.clone();
        let _sub = store.subscribe(move |_| {
            events_clone.set(events_clone.get() + 1);
            Ok(())
        });
        store.set_current_tab("dashboard");
        store.set_current_tab("dashboard");
        assert_eq!(events.get(), 1);
        assert_eq!(store.previous_tab(), None);
    }

    #[test]
    fn failing_destroy_callback_does_not_stop_navigation() {
        let (store, _) = store();
        store.register_destroy("a", Rc::new(|| Err(DashboardError::callback("teardown blew up"))));
        store.set_current_tab("a");
        store.set_current_tab("b");
        assert_eq!(store.current_tab().as_deref(), Some("b"));
    }

    #[test]
    fn throwing_navigation_subscriber_does_not_block_second() {
        let (store, _) = store();
        let _bad = store.subscribe(|event| match event {
            StoreEvent::Navigation(_) => Err(DashboardError::callback("nope")),
            _ => Ok(()),
        });
        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();
        let _good = store.subscribe(move |event| {
            if event.kind() == "navigation" {
                reached_clone.set(true);
            }
            Ok(())
        });
        store.set_current_tab("integrations");
        assert!(reached.get());
    }

    #[test]
    fn subscribers_may_read_store_during_notify() {
        let (store, _) = store();
        let reader = store.clone();
        let seen = Rc::new(RefCell::new(None));
        let seen_clone = seen.clone();
        let _sub = store.subscribe(move |_| {
            *seen_clone.borrow_mut() = reader.get_token();
            Ok(())
        });
        store.set_auth_state(AuthStatus::Authenticated, Some("abc".to_string()), None);
        assert_eq!(seen.borrow().as_deref(), Some("abc"));
    }

    #[test]
    fn unsubscribe_stops_events() {
        let (store, _) = store();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let sub = store.subscribe(move |_| {
            count_clone.set(count_clone.get() + 1);
            Ok(())
        });
        store.set_current_tab("a");
        assert!(sub.unsubscribe());
        store.set_current_tab("b");
        assert_eq!(count.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let (store, storage) = store();
        store.set_auth_state(AuthStatus::Authenticated, Some("tok".to_string()), None);
        store.set_current_tab("knowledge");
        let (timer, cancelled) = FakeTimer::new();
        store.register_interval("poll", timer);
        store.register_request("load", Box::new(AbortHandle::new_pair().0));

        store.reset();

        assert!(!store.is_authenticated());
        assert_eq!(store.auth_status(), AuthStatus::Checking);
        assert_eq!(store.current_tab(), None);
        assert_eq!(store.previous_tab(), None);
        assert!(cancelled.get());
        assert_eq!(store.pending_request_count(), 0);
        assert_eq!(storage.get(TOKEN_STORAGE_KEY), None);
    }
}
