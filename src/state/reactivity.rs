// ============================================================================
// REACTIVITY - Subscriber list for store events
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use crate::error::DashboardResult;
use crate::state::auth_state::AuthSnapshot;
use crate::state::navigation_state::NavigationSnapshot;

/// Event delivered to subscribers after a store mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    Auth(AuthSnapshot),
    Navigation(NavigationSnapshot),
}

impl StoreEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Navigation(_) => "navigation",
        }
    }
}

type Callback = Rc<dyn Fn(&StoreEvent) -> DashboardResult<()>>;

#[derive(Default)]
pub struct Subscribers {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback)>>,
}

impl Subscribers {
    pub fn add(&self, callback: Callback) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, callback));
        id
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Call every subscriber; a failing one is logged and skipped.
    /// Returns how many failed.
    pub fn notify(&self, event: &StoreEvent) -> usize {
        // Snapshot so callbacks may subscribe/unsubscribe while we iterate
        let callbacks: Vec<Callback> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        let mut failures = 0;
        for callback in callbacks {
            if let Err(e) = callback(event) {
                failures += 1;
                log::error!("❌ [STORE] Subscriber failed on '{}' event: {}", event.kind(), e);
            }
        }
        failures
    }
}

/// Returned by `Store::subscribe`; call `unsubscribe` to stop receiving events.
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub(crate) fn new(id: u64, subscribers: &Rc<Subscribers>) -> Self {
        Self {
            id,
            subscribers: Rc::downgrade(subscribers),
        }
    }

    pub fn unsubscribe(self) -> bool {
        match self.subscribers.upgrade() {
            Some(subscribers) => subscribers.remove(self.id),
            None => false,
        }
    }
}
