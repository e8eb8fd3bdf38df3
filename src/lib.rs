// ============================================================================
// ADMIN DASHBOARD - Browser admin console (Rust + WASM)
// ============================================================================
// Layers:
// - Views: maud markup, no logic
// - ViewModels: page controllers (fetch, render, bind actions)
// - Services: backend calls only
// - State: Rc<RefCell> store for auth/navigation/timers/requests
// - Router: hash routes -> page loaders
// - Platform: browser seams (view, toasts, timers), in-memory in tests
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use crate::app::App;
    use crate::config::CONFIG;

    // Keeps the mounted app alive between event callbacks
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.enable_logging {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 Admin dashboard ({})", CONFIG.environment);

        let app = App::mount().map_err(|e| JsValue::from_str(&e.to_string()))?;
        APP.with(|cell| *cell.borrow_mut() = Some(app));
        Ok(())
    }

    /// Re-run the active route (callable from JavaScript).
    #[wasm_bindgen]
    pub fn reload_route() {
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                let router = app.router.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    router.reload().await;
                });
            } else {
                log::warn!("⚠️ [MAIN] App not mounted");
            }
        });
    }
}
