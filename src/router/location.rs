/// Read/write access to the URL fragment.
pub trait HashLocation {
    /// Raw fragment, with or without the leading `#`.
    fn fragment(&self) -> String;
    /// Set the fragment; the browser fires `hashchange` afterwards.
    fn set_fragment(&self, route: &str);
}

/// `#/knowledge` -> `knowledge`; empty -> `home`.
pub fn route_from_fragment(fragment: &str, home: &str) -> String {
    let route = fragment.trim();
    let route = route.strip_prefix('#').unwrap_or(route);
    let route = route.strip_prefix('/').unwrap_or(route);
    if route.is_empty() {
        home.to_string()
    } else {
        route.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserLocation;

#[cfg(target_arch = "wasm32")]
impl HashLocation for BrowserLocation {
    fn fragment(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn set_fragment(&self, route: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_hash(&format!("#{}", route)).is_err() {
                log::error!("❌ [ROUTER] Could not set location hash to '{}'", route);
            }
        }
    }
}
