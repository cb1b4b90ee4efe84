//! Synthetic tile view for tests: slots laid out left to right in fixed cells.

use crate::flip::Transition;
use crate::geometry::{LayoutProvider, TileView};
use crate::tile::{Slot, TileId};
use kurbo::{Rect, Vec2};
use std::collections::{HashMap, HashSet};

/// Cell edge length in the synthetic grid.
pub const CELL: f64 = 100.0;

/// A grid of `columns` x N cells of `CELL` size, filled in slot order.
///
/// Tiles only have a rectangle while they sit in the synced slots, so a dragged
/// tile keeps its cell until the placeholder replaces it.
#[derive(Debug, Default)]
pub struct GridLayout {
    columns: usize,
    /// Cells taken by the placeholder.
    placeholder_span: usize,
    slots: Vec<Slot>,
    dragging: HashSet<TileId>,
    detached: HashSet<TileId>,
    offsets: HashMap<TileId, (Vec2, Transition)>,
    focused: Option<TileId>,
}

impl GridLayout {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            placeholder_span: 1,
            ..Default::default()
        }
    }

    /// A placeholder wider than a tile, so dropping shifts the tiles after it.
    pub fn with_placeholder_span(mut self, span: usize) -> Self {
        self.placeholder_span = span;
        self
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn order_ids(&self) -> Vec<TileId> {
        self.slots.iter().filter_map(Slot::tile).cloned().collect()
    }

    pub fn is_dragging(&self, id: &TileId) -> bool {
        self.dragging.contains(id)
    }

    pub fn is_detached(&self, id: &TileId) -> bool {
        self.detached.contains(id)
    }

    pub fn offset(&self, id: &TileId) -> Option<(Vec2, Transition)> {
        self.offsets.get(id).cloned()
    }

    pub fn focused(&self) -> Option<&TileId> {
        self.focused.as_ref()
    }

    fn cell_of(&self, id: &TileId) -> Option<usize> {
        let mut cell = 0;
        for slot in &self.slots {
            match slot {
                Slot::Tile(tile) if tile == id => return Some(cell),
                Slot::Tile(_) => cell += 1,
                Slot::Placeholder => cell += self.placeholder_span,
            }
        }
        None
    }
}

impl LayoutProvider for GridLayout {
    fn rect_of(&self, id: &TileId) -> Option<Rect> {
        if self.detached.contains(id) {
            return None;
        }
        let index = self.cell_of(id)?;
        let col = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        Some(Rect::new(col * CELL, row * CELL, (col + 1.0) * CELL, (row + 1.0) * CELL))
    }
}

impl TileView for GridLayout {
    fn sync_order(&mut self, slots: &[Slot]) {
        self.slots = slots.to_vec();
    }

    fn set_dragging(&mut self, id: &TileId, dragging: bool) {
        if dragging {
            self.dragging.insert(id.clone());
        } else {
            self.dragging.remove(id);
            self.detached.remove(id);
        }
    }

    fn detach(&mut self, id: &TileId) {
        self.detached.insert(id.clone());
    }

    fn set_offset(&mut self, id: &TileId, offset: Vec2, transition: &Transition) {
        self.offsets.insert(id.clone(), (offset, transition.clone()));
    }

    fn focus(&mut self, id: &TileId) {
        self.focused = Some(id.clone());
    }
}
