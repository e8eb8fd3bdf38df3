// ============================================================================
// TIMER REGISTRY - Named repeating timers (at most one per name)
// ============================================================================

use std::collections::HashMap;

/// A live repeating timer that can be stopped.
pub trait TimerHandle {
    fn cancel(self: Box<Self>);
}

#[cfg(target_arch = "wasm32")]
impl TimerHandle for gloo_timers::callback::Interval {
    fn cancel(self: Box<Self>) {
        // Dropping the returned closure releases the JS callback
        let _ = (*self).cancel();
    }
}

#[derive(Default)]
pub struct TimerRegistry {
    timers: HashMap<String, Box<dyn TimerHandle>>,
}

impl TimerRegistry {
    /// Store `handle` under `name`, handing back the timer it replaced.
    /// The caller cancels the replaced timer outside of any borrow.
    pub fn register(&mut self, name: &str, handle: Box<dyn TimerHandle>) -> Option<Box<dyn TimerHandle>> {
        self.timers.insert(name.to_string(), handle)
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn TimerHandle>> {
        self.timers.remove(name)
    }

    pub fn drain(&mut self) -> Vec<(String, Box<dyn TimerHandle>)> {
        self.timers.drain().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTimer;

    #[test]
    fn register_returns_replaced_timer() {
        let mut registry = TimerRegistry::default();
        let (first, first_flag) = FakeTimer::new();
        let (second, second_flag) = FakeTimer::new();

        assert!(registry.register("poll", first).is_none());
        let replaced = registry.register("poll", second).expect("first timer handed back");
        replaced.cancel();

        assert!(first_flag.get());
        assert!(!second_flag.get());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn drain_empties_registry() {
        let mut registry = TimerRegistry::default();
        registry.register("a", FakeTimer::new().0);
        registry.register("b", FakeTimer::new().0);
        assert_eq!(registry.drain().len(), 2);
        assert!(registry.is_empty());
        assert!(registry.drain().is_empty());
    }
}
