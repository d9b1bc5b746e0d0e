// Small helpers shared across components.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Monotonic-ish clock in milliseconds. Falls back to `Date.now()` when the
/// high-resolution timer is unavailable.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Whether the current environment reports touch capability. Gates pinch
/// interception and enlarged building tap targets.
pub fn is_touch_device() -> bool {
    web_sys::window()
        .map(|w| w.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

/// Current `prefers-reduced-motion` state.
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}
