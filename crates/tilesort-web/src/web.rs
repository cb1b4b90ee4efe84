//! WebAssembly entry points.

use crate::controller::GridController;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tilesort_core::ReorderConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

thread_local! {
    /// Mounted grids by selector. Holding them here keeps a grid from being wired twice.
    static MOUNTED: RefCell<HashMap<String, Rc<GridController>>> = RefCell::new(HashMap::new());
}

#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    log::info!("Starting tilesort (WASM)");
    mount_when_ready(ReorderConfig::default());
}

/// Mount a grid with settings from a JS object; missing fields take their defaults.
#[wasm_bindgen]
pub fn mount_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: ReorderConfig = if config.is_undefined() || config.is_null() {
        ReorderConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    mount_when_ready(config);
    Ok(())
}

/// Mount now, or on `DOMContentLoaded` if the document is still loading.
fn mount_when_ready(config: ReorderConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document, tile grid not mounted");
        return;
    };
    if document.ready_state() != "loading" {
        mount(config);
        return;
    }

    let closure = Closure::once(move || mount(config));
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
    {
        log::warn!("Could not wait for DOMContentLoaded: {:?}", e);
        return;
    }
    closure.forget();
}

fn mount(config: ReorderConfig) {
    let already = MOUNTED.with(|m| m.borrow().contains_key(&config.grid_selector));
    if already {
        log::debug!("Grid {} already mounted", config.grid_selector);
        return;
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    match GridController::mount(&document, &config) {
        Ok(Some(controller)) => {
            MOUNTED.with(|m| m.borrow_mut().insert(config.grid_selector.clone(), controller));
        }
        Ok(None) => {}
        Err(e) => log::warn!("Failed to mount tile grid: {:?}", e),
    }
}
