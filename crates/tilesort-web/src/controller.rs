//! Browser event wiring for one tile grid.

use crate::dom::DomTileView;
use crate::frame::request_frame;
use kurbo::Point;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tilesort_core::storage::LocalStorage;
use tilesort_core::{Modifiers, ReorderConfig, ReorderEngine, TileId, reorder_direction};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, DragEvent, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

type Engine = ReorderEngine<DomTileView, LocalStorage>;

/// A mounted grid: the engine plus the `requestAnimationFrame` pump feeding it.
pub struct GridController {
    engine: RefCell<Engine>,
    /// True while a frame callback is queued with the browser.
    frame_requested: Cell<bool>,
    tile_selector: String,
}

impl GridController {
    /// Find the grid, restore the saved order and attach all listeners.
    ///
    /// Returns `Ok(None)` when the page has no grid.
    pub fn mount(document: &Document, config: &ReorderConfig) -> Result<Option<Rc<Self>>, JsValue> {
        let Some(grid) = document.query_selector(&config.grid_selector)? else {
            log::info!("No grid matching {}, nothing to mount", config.grid_selector);
            return Ok(None);
        };
        let grid: HtmlElement = grid.dyn_into()?;

        let (view, container) = DomTileView::discover(document.clone(), grid, config)?;
        log::info!("Mounting grid with {} tiles", container.len());
        view.make_focusable();

        let mut engine = ReorderEngine::new(container, view, LocalStorage::new(), config);
        if engine.restore_saved_order() {
            log::info!("Restored saved tile order");
        }

        let controller = Rc::new(Self {
            engine: RefCell::new(engine),
            frame_requested: Cell::new(false),
            tile_selector: config.tile_selector.clone(),
        });
        controller.attach_listeners()?;
        Ok(Some(controller))
    }

    fn attach_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let engine = self.engine.borrow();
        let view = engine.view();

        for (id, tile) in view.tiles() {
            let this = Rc::clone(self);
            let tile_id = id.clone();
            listen(tile, "dragstart", false, move |event| this.on_drag_start(&tile_id, event))?;

            let this = Rc::clone(self);
            listen(tile, "dragend", false, move |_| this.on_drag_end())?;

            let this = Rc::clone(self);
            let tile_id = id.clone();
            listen(tile, "keydown", false, move |event| this.on_key_down(&tile_id, event))?;
        }

        let grid = view.grid();
        let this = Rc::clone(self);
        listen(grid, "dragover", false, move |event| this.on_drag_over(event))?;
        listen(grid, "drop", false, |event| event.prevent_default())?;

        let this = Rc::clone(self);
        listen(grid, "click", true, move |event| this.on_click(event))?;
        Ok(())
    }

    fn on_drag_start(self: &Rc<Self>, id: &TileId, event: Event) {
        if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
            transfer.set_effect_allowed("move");
            if let Err(e) = transfer.set_data("text/plain", id.as_str()) {
                log::debug!("Could not set drag data: {:?}", e);
            }
        }
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        engine.begin_drag(id);
        drop(engine);
        self.schedule_frame();
    }

    fn on_drag_over(self: &Rc<Self>, event: Event) {
        event.prevent_default();
        let Some(event) = event.dyn_ref::<DragEvent>() else {
            return;
        };
        if let Some(transfer) = event.data_transfer() {
            transfer.set_drop_effect("move");
        }
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        engine.drag_over(pointer);
        drop(engine);
        self.schedule_frame();
    }

    fn on_drag_end(self: &Rc<Self>) {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        engine.end_drag();
        drop(engine);
        self.schedule_frame();
    }

    fn on_key_down(self: &Rc<Self>, id: &TileId, event: Event) {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let modifiers = Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        };
        let Some(direction) = reorder_direction(&event.key(), modifiers) else {
            return;
        };
        event.prevent_default();
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        engine.move_by_keyboard(id, direction);
    }

    /// Swallow the click the browser fires on a tile right after it was dropped.
    fn on_click(&self, event: Event) {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        if !engine.take_click_suppression() {
            return;
        }
        let on_tile = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(&self.tile_selector).ok().flatten())
            .is_some();
        if on_tile {
            event.prevent_default();
            event.stop_propagation();
        }
    }

    /// Ask the browser for a frame if the engine has deferred work and none is queued.
    fn schedule_frame(self: &Rc<Self>) {
        if self.frame_requested.get() {
            return;
        }
        let pending = self
            .engine
            .try_borrow()
            .map(|engine| engine.has_pending_frame())
            .unwrap_or(false);
        if !pending {
            return;
        }

        let this = Rc::clone(self);
        self.frame_requested.set(true);
        let requested = request_frame(move || {
            this.frame_requested.set(false);
            if let Ok(mut engine) = this.engine.try_borrow_mut() {
                engine.run_frame();
            }
            this.schedule_frame();
        });
        if !requested {
            self.frame_requested.set(false);
        }
    }
}

/// Attach `handler` to `target` for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    capture: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback = closure.as_ref().unchecked_ref();
    target.add_event_listener_with_callback_and_bool(event, callback, capture)?;
    closure.forget();
    Ok(())
}
