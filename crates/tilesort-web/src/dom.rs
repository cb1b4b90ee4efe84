//! DOM-backed tile view.

use kurbo::{Rect, Vec2};
use std::collections::HashMap;
use tilesort_core::input::aria_key_shortcuts;
use tilesort_core::{
    Container, LayoutProvider, ReorderConfig, Slot, TileId, TileView, Transition, translate_css,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// The grid element and its tiles, addressed by tile id.
pub struct DomTileView {
    document: Document,
    grid: HtmlElement,
    tiles: HashMap<TileId, HtmlElement>,
    /// Created on drag start, removed on drag end.
    placeholder: Option<HtmlElement>,
    id_attribute: String,
    placeholder_class: String,
    dragging_class: String,
}

impl DomTileView {
    /// Collect the tiles under `grid` in markup order.
    ///
    /// Tiles without an id, or repeating an id already seen, are left alone and
    /// take no part in reordering.
    pub fn discover(
        document: Document,
        grid: HtmlElement,
        config: &ReorderConfig,
    ) -> Result<(Self, Container), JsValue> {
        let nodes = grid.query_selector_all(&config.tile_selector)?;
        let mut order = Vec::new();
        let mut tiles = HashMap::new();

        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            let raw = element.get_attribute(&config.id_attribute);
            let Some(raw) = raw.filter(|id| !id.is_empty()) else {
                log::warn!("Skipping tile without {} attribute", config.id_attribute);
                continue;
            };
            let id = TileId::new(raw);
            if tiles.contains_key(&id) {
                log::warn!("Skipping tile with duplicate id {}", id);
                continue;
            }
            order.push(id.clone());
            tiles.insert(id, element);
        }

        let container = Container::new(order).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let view = Self {
            document,
            grid,
            tiles,
            placeholder: None,
            id_attribute: config.id_attribute.clone(),
            placeholder_class: config.placeholder_class.clone(),
            dragging_class: config.dragging_class.clone(),
        };
        Ok((view, container))
    }

    pub fn grid(&self) -> &HtmlElement {
        &self.grid
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&TileId, &HtmlElement)> {
        self.tiles.iter()
    }

    /// Id of the tile `element` belongs to, if any.
    pub fn tile_id_of(&self, element: &Element) -> Option<TileId> {
        let id = TileId::new(element.get_attribute(&self.id_attribute)?);
        self.tiles.contains_key(&id).then_some(id)
    }

    /// Make every tile keyboard-focusable and advertise the reorder shortcuts.
    pub fn make_focusable(&self) {
        let shortcuts = aria_key_shortcuts();
        for element in self.tiles.values() {
            let _ = element.set_attribute("tabindex", "0");
            let _ = element.set_attribute("aria-keyshortcuts", &shortcuts);
        }
    }

    fn element_for(&self, slot: &Slot) -> Option<&HtmlElement> {
        match slot {
            Slot::Tile(id) => self.tiles.get(id),
            Slot::Placeholder => self.placeholder.as_ref(),
        }
    }

    fn is_managed(&self, element: &Element) -> bool {
        if self.placeholder.as_ref().is_some_and(|p| AsRef::<Element>::as_ref(p) == element) {
            return true;
        }
        self.tile_id_of(element).is_some()
    }

    /// First grid child that is a tile or the placeholder.
    fn first_managed_child(&self) -> Option<Element> {
        let mut child = self.grid.first_element_child();
        while let Some(element) = child {
            if self.is_managed(&element) {
                return Some(element);
            }
            child = element.next_element_sibling();
        }
        None
    }

    fn create_placeholder(&self) -> Option<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        element.set_class_name(&self.placeholder_class);
        let _ = element.set_attribute("aria-hidden", "true");
        Some(element)
    }
}

impl LayoutProvider for DomTileView {
    fn rect_of(&self, id: &TileId) -> Option<Rect> {
        let element = self.tiles.get(id)?;
        if !element.is_connected() {
            return None;
        }
        let rect = element.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()))
    }
}

impl TileView for DomTileView {
    fn sync_order(&mut self, slots: &[Slot]) {
        let wants_placeholder = slots.iter().any(Slot::is_placeholder);
        if wants_placeholder && self.placeholder.is_none() {
            self.placeholder = self.create_placeholder();
        }

        // Walk the slots, only moving elements that aren't already in place.
        let mut previous: Option<Element> = None;
        for slot in slots {
            let Some(element) = self.element_for(slot) else {
                continue;
            };
            let expected = match &previous {
                Some(prev) => prev.next_element_sibling(),
                None => self.first_managed_child(),
            };
            let element: &Element = element.as_ref();
            if expected.as_ref() != Some(element) {
                if let Err(e) = self.grid.insert_before(element, expected.as_deref()) {
                    log::warn!("Failed to move tile element: {:?}", e);
                }
            }
            previous = Some(element.clone());
        }

        if !wants_placeholder {
            if let Some(placeholder) = self.placeholder.take() {
                placeholder.remove();
            }
        }
    }

    fn set_dragging(&mut self, id: &TileId, dragging: bool) {
        let Some(element) = self.tiles.get(id) else {
            return;
        };
        let style = element.style();
        if dragging {
            let _ = element.class_list().add_1(&self.dragging_class);
            let _ = style.set_property("visibility", "hidden");
        } else {
            let _ = element.class_list().remove_1(&self.dragging_class);
            let _ = style.remove_property("visibility");
            let _ = style.remove_property("display");
        }
    }

    /// Called once the placeholder is in place, after dragstart has returned and
    /// the drag image was taken from the still laid-out element.
    fn detach(&mut self, id: &TileId) {
        if let Some(element) = self.tiles.get(id) {
            let _ = element.style().set_property("display", "none");
        }
    }

    fn set_offset(&mut self, id: &TileId, offset: Vec2, transition: &Transition) {
        let Some(element) = self.tiles.get(id) else {
            return;
        };
        let style = element.style();
        let _ = style.set_property("transition", &transition.css());
        let _ = style.set_property("transform", &translate_css(offset));
    }

    fn focus(&mut self, id: &TileId) {
        if let Some(element) = self.tiles.get(id) {
            let _ = element.focus();
        }
    }
}
