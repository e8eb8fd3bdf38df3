// ============================================================================
// STATE MODULE - Store with Rc<RefCell> bookkeeping + subscribers
// ============================================================================

pub mod auth_state;
pub mod navigation_state;
pub mod reactivity;
pub mod requests;
pub mod store;
pub mod timers;

pub use auth_state::{AuthSnapshot, AuthStatus};
pub use navigation_state::NavigationSnapshot;
pub use reactivity::{StoreEvent, Subscription};
pub use requests::CancelHandle;
pub use store::{DestroyCallback, Store};
pub use timers::TimerHandle;
