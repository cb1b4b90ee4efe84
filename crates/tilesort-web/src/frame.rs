//! One-shot `requestAnimationFrame` callbacks.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Run `callback` once, before the browser's next repaint.
///
/// Returns false if there is no window or the request was refused.
pub fn request_frame(callback: impl FnOnce() + 'static) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let closure = Closure::once_into_js(callback);
    match window.request_animation_frame(closure.unchecked_ref::<js_sys::Function>()) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            false
        }
    }
}
