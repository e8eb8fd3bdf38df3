// ============================================================================
// PENDING REQUESTS - Cancellation handles for in-flight network calls
// ============================================================================

use std::collections::HashMap;

/// Something that can abort an in-flight call.
pub trait CancelHandle {
    fn cancel(&self);
}

impl CancelHandle for futures::future::AbortHandle {
    fn cancel(&self) {
        self.abort();
    }
}

#[cfg(target_arch = "wasm32")]
impl CancelHandle for web_sys::AbortController {
    fn cancel(&self) {
        self.abort();
    }
}

/// Bookkeeping only: handles are never inspected, just cancelled on mass-abort.
#[derive(Default)]
pub struct PendingRequestRegistry {
    requests: HashMap<String, Box<dyn CancelHandle>>,
}

impl PendingRequestRegistry {
    /// Returns the handle previously held under `name`, for the caller to cancel.
    pub fn register(&mut self, name: &str, handle: Box<dyn CancelHandle>) -> Option<Box<dyn CancelHandle>> {
        self.requests.insert(name.to_string(), handle)
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.requests.remove(name).is_some()
    }

    pub fn drain(&mut self) -> Vec<(String, Box<dyn CancelHandle>)> {
        self.requests.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{AbortHandle, Abortable, Aborted};

    #[test]
    fn abort_handle_cancels_future() {
        let (handle, registration) = AbortHandle::new_pair();
        let mut registry = PendingRequestRegistry::default();
        registry.register("load", Box::new(handle));

        for (_, handle) in registry.drain() {
            handle.cancel();
        }

        let result = futures::executor::block_on(Abortable::new(async { 1 }, registration));
        assert_eq!(result, Err(Aborted));
    }

    #[test]
    fn register_hands_back_replaced_handle() {
        let (first, first_registration) = AbortHandle::new_pair();
        let (second, _) = AbortHandle::new_pair();
        let mut registry = PendingRequestRegistry::default();

        assert!(registry.register("load", Box::new(first)).is_none());
        let replaced = registry.register("load", Box::new(second)).expect("first handle handed back");
        replaced.cancel();

        assert_eq!(registry.len(), 1);
        let result = futures::executor::block_on(Abortable::new(async { 1 }, first_registration));
        assert_eq!(result, Err(Aborted));
    }

    #[test]
    fn unregister_reports_presence() {
        let mut registry = PendingRequestRegistry::default();
        registry.register("load", Box::new(AbortHandle::new_pair().0));
        assert!(registry.unregister("load"));
        assert!(!registry.unregister("load"));
        assert!(registry.is_empty());
    }
}
