// ============================================================================
// SHELL VIEWS - Route-level panels (loading, error, not found, login)
// ============================================================================

use maud::{html, Markup};

/// Bound by the router while an error panel is showing.
pub const RETRY_ROUTE_ACTION: &str = "route-retry";

pub fn loading(label: &str) -> Markup {
    html! {
        div.page-loading {
            div.spinner {}
            p { "Loading " (label) "…" }
        }
    }
}

/// Shown when a route loader fails. Non-fatal: the rest of the app keeps working.
pub fn route_error(route: &str, message: &str, home_route: &str) -> Markup {
    html! {
        div.route-error {
            h2 { "Something went wrong" }
            p.route-error-detail { "Could not load " strong { (route) } }
            (inline_error(message, RETRY_ROUTE_ACTION))
            a.btn href={ "#" (home_route) } { "Back to " (home_route) }
        }
    }
}

pub fn not_found(route: &str, home_route: &str) -> Markup {
    html! {
        div.route-not-found {
            h2 { "Page not found" }
            p { "No page is registered for " code { (route) } "." }
            a.btn href={ "#" (home_route) } { "Back to " (home_route) }
        }
    }
}

pub fn login_required() -> Markup {
    html! {
        div.login-required {
            h2 { "Sign in required" }
            p { "Your session has expired or you are not signed in." }
            a.btn.btn-primary href="#login" { "Sign in" }
        }
    }
}

/// Inline panel with a retry action for page-level failures.
pub fn inline_error(message: &str, retry_action: &str) -> Markup {
    html! {
        div.inline-error {
            p { (message) }
            button.btn type="button" data-action=(retry_action) { "Retry" }
        }
    }
}

/// Top navigation; the browser adapter marks the active `data-route` link.
pub fn navigation(links: &[(String, String)]) -> Markup {
    html! {
        ul.nav-links {
            @for (route, label) in links {
                li {
                    a.nav-link href={ "#" (route) } data-route=(route) { (label) }
                }
            }
        }
    }
}
