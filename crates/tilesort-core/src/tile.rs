//! Tile identifiers and the ordered container that holds them.

use crate::resolver::{Placement, Side};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Stable external identifier of a tile (the `data-id` of its element).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    /// Create a tile id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for TileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors raised while building a container.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileError {
    #[error("Duplicate tile id: {0}")]
    DuplicateId(String),
    #[error("Tile id must not be empty")]
    EmptyId,
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the start of the sequence.
    Earlier,
    /// Towards the end of the sequence.
    Later,
}

/// One entry of the container sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A real tile.
    Tile(TileId),
    /// The drag placeholder reserving the target position.
    Placeholder,
}

impl Slot {
    /// The tile id, if this slot holds a tile.
    pub fn tile(&self) -> Option<&TileId> {
        match self {
            Slot::Tile(id) => Some(id),
            Slot::Placeholder => None,
        }
    }

    /// Check if this slot is the placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

/// Ordered sequence of tiles, plus at most one placeholder while a drag is active.
///
/// The tile being dragged is lifted out of the sequence (its slot becomes the
/// placeholder) and put back when the drag ends, so `slots()` always mirrors the
/// tiles that take part in layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    slots: Vec<Slot>,
}

impl Container {
    /// Build a container from ids in markup order.
    pub fn new<I, T>(ids: I) -> Result<Self, TileError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TileId>,
    {
        let mut seen = HashSet::new();
        let mut slots = Vec::new();
        for id in ids {
            let id = id.into();
            if id.as_str().is_empty() {
                return Err(TileError::EmptyId);
            }
            if !seen.insert(id.clone()) {
                return Err(TileError::DuplicateId(id.0));
            }
            slots.push(Slot::Tile(id));
        }
        Ok(Self { slots })
    }

    /// All slots in order, placeholder included.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Tile ids in order, skipping the placeholder.
    pub fn tile_ids(&self) -> impl Iterator<Item = &TileId> + '_ {
        self.slots.iter().filter_map(Slot::tile)
    }

    /// Owned copy of the current tile order.
    pub fn ids(&self) -> Vec<TileId> {
        self.tile_ids().cloned().collect()
    }

    /// Number of tiles in the sequence.
    pub fn len(&self) -> usize {
        self.tile_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a tile is currently in the sequence.
    pub fn contains(&self, id: &TileId) -> bool {
        self.position(id).is_some()
    }

    /// Slot index of a tile.
    pub fn position(&self, id: &TileId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tile() == Some(id))
    }

    /// Slot index of the placeholder, if a drag is active.
    pub fn placeholder_position(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_placeholder)
    }

    /// The tile that directly follows `id`, `Some(None)` when `id` is last.
    pub fn next_sibling(&self, id: &TileId) -> Option<Option<TileId>> {
        let index = self.position(id)?;
        Some(self.slots.get(index + 1).and_then(Slot::tile).cloned())
    }

    /// Replace a tile's slot with the placeholder.
    ///
    /// Returns the slot index, or `None` if the tile is unknown or a placeholder
    /// already exists.
    pub fn lift(&mut self, id: &TileId) -> Option<usize> {
        if self.placeholder_position().is_some() {
            return None;
        }
        let index = self.position(id)?;
        self.slots[index] = Slot::Placeholder;
        Some(index)
    }

    /// Slot index the placeholder should be inserted before for a resolved target.
    ///
    /// `None` (no target) means the end of the sequence. Returns `None` if the
    /// target tile is no longer present.
    pub fn insertion_index(&self, placement: Option<&Placement>) -> Option<usize> {
        match placement {
            None => Some(self.slots.len()),
            Some(placement) => {
                let index = self.position(&placement.target)?;
                match placement.side {
                    Side::Before => Some(index),
                    Side::After => Some(index + 1),
                }
            }
        }
    }

    /// Move the placeholder so it sits before slot `before` (`len` = end).
    ///
    /// Returns true if its position actually changed.
    pub fn move_placeholder(&mut self, before: usize) -> bool {
        let Some(current) = self.placeholder_position() else {
            return false;
        };
        let before = before.min(self.slots.len());
        let target = if before > current { before - 1 } else { before };
        if target == current {
            return false;
        }
        let slot = self.slots.remove(current);
        self.slots.insert(target, slot);
        true
    }

    /// Replace the placeholder with `id`, returning the tile's new slot index.
    pub fn settle(&mut self, id: TileId) -> Option<usize> {
        if self.contains(&id) {
            return None;
        }
        let index = self.placeholder_position()?;
        self.slots[index] = Slot::Tile(id);
        Some(index)
    }

    /// Drop the placeholder and put `id` back before `next` (end if `None`).
    ///
    /// If `next` has vanished the tile takes the placeholder's slot instead.
    pub fn restore(&mut self, id: TileId, next: Option<&TileId>) -> usize {
        let fallback = self.discard_placeholder();
        if let Some(index) = self.position(&id) {
            return index;
        }
        let index = match next {
            None => self.slots.len(),
            Some(next) => match self.position(next) {
                Some(index) => index,
                None => fallback.unwrap_or(self.slots.len()).min(self.slots.len()),
            },
        };
        self.slots.insert(index, Slot::Tile(id));
        index
    }

    /// Remove the placeholder, returning where it was.
    pub fn discard_placeholder(&mut self) -> Option<usize> {
        let index = self.placeholder_position()?;
        self.slots.remove(index);
        Some(index)
    }

    /// Swap a tile with its neighbouring tile.
    ///
    /// Returns the tile's new slot index, or `None` at either boundary or for an
    /// unknown tile.
    pub fn swap_with_neighbor(&mut self, id: &TileId, direction: Direction) -> Option<usize> {
        let index = self.position(id)?;
        let neighbor = match direction {
            Direction::Earlier => (0..index).rev().find(|&i| !self.slots[i].is_placeholder())?,
            Direction::Later => {
                (index + 1..self.slots.len()).find(|&i| !self.slots[i].is_placeholder())?
            }
        };
        self.slots.swap(index, neighbor);
        Some(neighbor)
    }

    /// Apply a persisted order by moving each known id to the end, in turn.
    ///
    /// Unknown ids are skipped; tiles the order doesn't mention keep their
    /// relative order ahead of the moved ones. Returns the number of ids applied.
    pub fn apply_saved_order<'a>(&mut self, order: impl IntoIterator<Item = &'a TileId>) -> usize {
        let mut applied = 0;
        for id in order {
            if let Some(index) = self.position(id) {
                let slot = self.slots.remove(index);
                self.slots.push(slot);
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Placement, Side};

    fn ids(names: &[&str]) -> Vec<TileId> {
        names.iter().map(|n| TileId::from(*n)).collect()
    }

    fn container(names: &[&str]) -> Container {
        Container::new(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = Container::new(["A", "B", "A"]);
        assert_eq!(result, Err(TileError::DuplicateId("A".to_string())));
    }

    #[test]
    fn test_rejects_empty_id() {
        assert_eq!(Container::new(["A", ""]), Err(TileError::EmptyId));
    }

    #[test]
    fn test_lift_and_restore_in_place() {
        let mut c = container(&["A", "B", "C"]);
        let b = TileId::from("B");
        let next = c.next_sibling(&b).unwrap();
        assert_eq!(next, Some(TileId::from("C")));

        assert_eq!(c.lift(&b), Some(1));
        assert_eq!(c.ids(), ids(&["A", "C"]));
        assert_eq!(c.placeholder_position(), Some(1));

        c.restore(b, next.as_ref());
        assert_eq!(c.ids(), ids(&["A", "B", "C"]));
        assert_eq!(c.placeholder_position(), None);
    }

    #[test]
    fn test_only_one_placeholder() {
        let mut c = container(&["A", "B"]);
        assert!(c.lift(&TileId::from("A")).is_some());
        assert!(c.lift(&TileId::from("B")).is_none());
    }

    #[test]
    fn test_move_placeholder_reports_changes() {
        let mut c = container(&["A", "B", "C"]);
        c.lift(&TileId::from("A"));

        // Before slot 0 or 1 is where it already is.
        assert!(!c.move_placeholder(0));
        assert!(!c.move_placeholder(1));

        assert!(c.move_placeholder(3));
        assert_eq!(c.placeholder_position(), Some(2));
        assert!(!c.move_placeholder(99));
    }

    #[test]
    fn test_insertion_index() {
        let c = container(&["A", "B", "C"]);
        let after_b = Placement { target: TileId::from("B"), side: Side::After };
        let before_b = Placement { target: TileId::from("B"), side: Side::Before };
        let stale = Placement { target: TileId::from("Z"), side: Side::Before };

        assert_eq!(c.insertion_index(Some(&after_b)), Some(2));
        assert_eq!(c.insertion_index(Some(&before_b)), Some(1));
        assert_eq!(c.insertion_index(None), Some(3));
        assert_eq!(c.insertion_index(Some(&stale)), None);
    }

    #[test]
    fn test_settle_replaces_placeholder() {
        let mut c = container(&["A", "B", "C"]);
        let a = TileId::from("A");
        c.lift(&a);
        c.move_placeholder(3);
        assert_eq!(c.settle(a), Some(2));
        assert_eq!(c.ids(), ids(&["B", "C", "A"]));
        assert!(c.placeholder_position().is_none());
    }

    #[test]
    fn test_restore_with_vanished_sibling_uses_placeholder_slot() {
        let mut c = container(&["A", "B", "C"]);
        let a = TileId::from("A");
        c.lift(&a);
        c.restore(a, Some(&TileId::from("Z")));
        assert_eq!(c.ids(), ids(&["A", "B", "C"]));
    }

    #[test]
    fn test_swap_boundaries() {
        let mut c = container(&["A", "B", "C"]);
        assert_eq!(c.swap_with_neighbor(&TileId::from("A"), Direction::Earlier), None);
        assert_eq!(c.swap_with_neighbor(&TileId::from("C"), Direction::Later), None);
        assert_eq!(c.swap_with_neighbor(&TileId::from("Z"), Direction::Later), None);
        assert_eq!(c.ids(), ids(&["A", "B", "C"]));

        assert_eq!(c.swap_with_neighbor(&TileId::from("B"), Direction::Earlier), Some(0));
        assert_eq!(c.ids(), ids(&["B", "A", "C"]));
    }

    #[test]
    fn test_apply_saved_order() {
        let mut c = container(&["A", "B", "C"]);
        assert_eq!(c.apply_saved_order(&ids(&["C", "A", "B"])), 3);
        assert_eq!(c.ids(), ids(&["C", "A", "B"]));
    }

    #[test]
    fn test_apply_saved_order_skips_unknown() {
        let mut c = container(&["A", "B", "C"]);
        assert_eq!(c.apply_saved_order(&ids(&["Z", "B"])), 1);
        assert_eq!(c.ids(), ids(&["A", "C", "B"]));
    }
}
