// ============================================================================
// APP - Route table, palette commands and startup sequence
// ============================================================================
// Everything here is wired through the platform seams so the whole startup
// path runs in native tests; `App::mount` only swaps in the browser adapters.
// ============================================================================

use std::rc::Rc;
use chrono::Utc;
use futures::FutureExt;
use crate::config::AppConfig;
use crate::error::DashboardResult;
use crate::platform::Scheduler;
use crate::router::{Route, RouteOutcome, Router};
use crate::services::{auth_service, guest_service};
use crate::utils::DASHBOARD_REFRESH_TIMER;
use crate::viewmodels::{
    logout, CalendarViewModel, Command, DirectionsViewModel, FollowMeViewModel, GatewayViewModel,
    GuestViewModel, IntegrationsViewModel, KnowledgeViewModel, LoginViewModel, MissionControlViewModel,
    Navigate, PageContext, LOGIN_ROUTE, LOGOUT_ROUTE,
};

/// Old bookmarks and their current routes.
pub const LEGACY_ROUTES: [(&str, &str); 6] = [
    ("home", "dashboard"),
    ("mission-control", "dashboard"),
    ("calendar", "calendar-sources"),
    ("base-knowledge", "knowledge"),
    ("gateway-config", "gateway"),
    ("directions-settings", "directions"),
];

/// Navigation that also works when the target is already active: the hash
/// would not change, so the route is reloaded instead.
pub fn navigator(router: &Router, scheduler: Rc<dyn Scheduler>) -> Navigate {
    let router = router.clone();
    Rc::new(move |route: &str| {
        if router.active_route().as_deref() == Some(route) {
            let router = router.clone();
            scheduler.spawn(
                async move {
                    router.reload().await;
                }
                .boxed_local(),
            );
        } else {
            router.navigate(route);
        }
    })
}

pub fn register_routes(
    router: &Router,
    ctx: &PageContext,
    config: &AppConfig,
    navigate: &Navigate,
    user_agent: Option<String>,
) {
    let page = ctx.clone();
    let refresh_ms = config.dashboard_refresh_ms;
    let store = ctx.store.clone();
    router.register_route(
        "dashboard",
        Route::new("Mission control", move || MissionControlViewModel::new(page.clone(), refresh_ms).load())
            .with_cleanup(move || {
                store.clear_interval(DASHBOARD_REFRESH_TIMER);
                Ok(())
            }),
    );

    let page = ctx.clone();
    router.register_route(
        "knowledge",
        Route::new("Knowledge base", move || KnowledgeViewModel::new(page.clone()).load()),
    );

    let page = ctx.clone();
    router.register_route(
        "calendar-sources",
        Route::new("Calendar sources", move || CalendarViewModel::new(page.clone()).load()),
    );

    let page = ctx.clone();
    router.register_route(
        "follow-me",
        Route::new("Follow-me audio", move || FollowMeViewModel::new(page.clone()).load()),
    );

    let page = ctx.clone();
    router.register_route(
        "gateway",
        Route::new("Gateway configuration", move || GatewayViewModel::new(page.clone()).load()),
    );

    let page = ctx.clone();
    router.register_route(
        "directions",
        Route::new("Directions settings", move || DirectionsViewModel::new(page.clone()).load()),
    );

    let page = ctx.clone();
    let refresh_ms = config.integrations_refresh_ms;
    router.register_route(
        "integrations",
        Route::new("Integrations", move || IntegrationsViewModel::new(page.clone(), refresh_ms).load()),
    );

    let page = ctx.clone();
    router.register_route(
        "guest",
        Route::new("Guest context", move || GuestViewModel::new(page.clone(), user_agent.clone()).load()),
    );

    let page = ctx.clone();
    let to = navigate.clone();
    let home = config.home_route.clone();
    router.register_route(
        LOGIN_ROUTE,
        Route::new("Sign in", move || LoginViewModel::new(page.clone(), to.clone(), &home).load()),
    );

    let store = ctx.store.clone();
    let to = navigate.clone();
    router.register_route(
        LOGOUT_ROUTE,
        Route::new("Log out", move || {
            logout(&store, &to);
            async { DashboardResult::Ok(()) }
        }),
    );

    let to = navigate.clone();
    router.set_fallback(Rc::new(move |route: &str| {
        let (_, current) = LEGACY_ROUTES.iter().find(|(old, _)| *old == route)?;
        log::info!("🧭 [APP] Legacy route '{}' -> '{}'", route, current);
        to(*current);
        Some(async { DashboardResult::Ok(()) }.boxed_local())
    }));
}

/// Palette entries: every route except the login form itself.
pub fn palette_commands(router: &Router) -> Vec<Command> {
    router
        .routes()
        .into_iter()
        .filter(|(route, _)| route != LOGIN_ROUTE)
        .map(|(route, label)| Command::new(&route, &label))
        .collect()
}

pub fn nav_links(router: &Router) -> Vec<(String, String)> {
    router
        .routes()
        .into_iter()
        .filter(|(route, _)| route != LOGIN_ROUTE)
        .collect()
}

/// Guest bootstrap, session check, first route. Only the route outcome is
/// returned; bootstrap and verification failures are logged and skipped.
pub async fn start(ctx: &PageContext, router: &Router, user_agent: Option<String>) -> RouteOutcome {
    let storage = ctx.store.storage();
    if let Err(e) = guest_service::bootstrap(&ctx.api, storage.as_ref(), user_agent, Utc::now()).await {
        log::warn!("⚠️ [APP] Guest bootstrap failed: {}", e);
    }
    match auth_service::verify_session(&ctx.api, &ctx.store).await {
        Ok(status) => log::info!("🔐 [APP] Session {}", status),
        Err(e) => log::warn!("⚠️ [APP] Session check failed, keeping token: {}", e),
    }
    router.handle_route_change().await
}

#[cfg(target_arch = "wasm32")]
pub use browser_app::App;

#[cfg(target_arch = "wasm32")]
mod browser_app {
    use super::*;
    use crate::config::CONFIG;
    use crate::platform::browser::{
        listen_hashchange, listen_palette_keys, user_agent, BrowserScheduler, BrowserToaster, BrowserView,
    };
    use crate::platform::{Toaster, ViewTarget};
    use crate::router::location::BrowserLocation;
    use crate::services::api_client::GlooTransport;
    use crate::services::ApiClient;
    use crate::state::Store;
    use crate::utils::storage::BrowserStorage;
    use crate::utils::{NAV_ROOT_ID, PAGE_ROOT_ID, PALETTE_ROOT_ID, TOAST_ROOT_ID};
    use crate::viewmodels::CommandPalette;
    use crate::views::shell;

    /// The mounted dashboard. Kept alive for the lifetime of the page.
    pub struct App {
        pub store: Store,
        pub router: Router,
        pub palette: Rc<CommandPalette>,
    }

    impl App {
        pub fn mount() -> DashboardResult<Self> {
            let store = Store::restore(Rc::new(BrowserStorage));
            let api = ApiClient::new(&CONFIG.backend_url, store.clone(), Rc::new(GlooTransport));
            let view: Rc<dyn ViewTarget> = BrowserView::attach(PAGE_ROOT_ID, Some(NAV_ROOT_ID))?;
            let toaster: Rc<dyn Toaster> = Rc::new(BrowserToaster::new(TOAST_ROOT_ID, CONFIG.toast_duration_ms));
            let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
            let ctx = PageContext::new(store.clone(), api, view.clone(), toaster, scheduler.clone());

            let router = Router::new(store.clone(), Rc::new(BrowserLocation), view, &CONFIG.home_route);
            let navigate = navigator(&router, scheduler);
            register_routes(&router, &ctx, &CONFIG, &navigate, user_agent());

            crate::platform::browser::element_by_id(NAV_ROOT_ID)?
                .set_inner_html(&shell::navigation(&nav_links(&router)).into_string());

            let palette_view = BrowserView::attach(PALETTE_ROOT_ID, None)?;
            let palette = CommandPalette::new(palette_commands(&router), palette_view, navigate);
            palette.render();
            listen_palette_keys(palette.clone())?;
            listen_hashchange(router.clone())?;

            let startup_router = router.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = start(&ctx, &startup_router, user_agent()).await;
                log::info!("🚀 [APP] First route: {:?}", outcome);
            });

            Ok(Self { store, router, palette })
        }
    }
}
