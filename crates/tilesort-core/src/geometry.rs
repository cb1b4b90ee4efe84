//! Layout capability and geometry snapshots.

use crate::flip::Transition;
use crate::tile::{Slot, TileId};
use kurbo::{Rect, Vec2};
use std::collections::HashMap;

/// Source of live tile rectangles.
///
/// Rectangles must reflect the current layout (post-mutation). A tile that takes
/// no part in layout, e.g. the one being dragged, reports `None`.
pub trait LayoutProvider {
    /// Current on-screen rectangle of a tile.
    fn rect_of(&self, id: &TileId) -> Option<Rect>;
}

/// Rendering surface the engine drives.
///
/// Implementations own the actual elements: the DOM grid in the browser, a
/// synthetic grid in tests.
pub trait TileView: LayoutProvider {
    /// Make the rendered order match `slots`, creating or removing the
    /// placeholder element as needed.
    fn sync_order(&mut self, slots: &[Slot]);

    /// Hide a tile for dragging, keeping its space, or release it back into flow.
    fn set_dragging(&mut self, id: &TileId, dragging: bool);

    /// Take a dragging tile out of layout. Called right after the placeholder
    /// was put in its place.
    fn detach(&mut self, id: &TileId);

    /// Visually displace a tile without affecting layout.
    fn set_offset(&mut self, id: &TileId, offset: Vec2, transition: &Transition);

    /// Move keyboard focus to a tile.
    fn focus(&mut self, id: &TileId);
}

/// Rectangles of a set of tiles captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometrySnapshot {
    rects: HashMap<TileId, Rect>,
}

impl GeometrySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle recorded for a tile.
    pub fn get(&self, id: &TileId) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// Record a rectangle.
    pub fn insert(&mut self, id: TileId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn contains(&self, id: &TileId) -> bool {
        self.rects.contains_key(id)
    }
}

/// Sample the current rectangle of every item not in `exclude`.
///
/// Items without an available rectangle are left out of the snapshot.
pub fn sample<'a, L>(
    layout: &L,
    items: impl IntoIterator<Item = &'a TileId>,
    exclude: &[TileId],
) -> GeometrySnapshot
where
    L: LayoutProvider + ?Sized,
{
    let mut snapshot = GeometrySnapshot::new();
    for id in items {
        if exclude.contains(id) {
            continue;
        }
        if let Some(rect) = layout.rect_of(id) {
            snapshot.insert(id.clone(), rect);
        }
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLayout(HashMap<TileId, Rect>);

    impl LayoutProvider for FixedLayout {
        fn rect_of(&self, id: &TileId) -> Option<Rect> {
            self.0.get(id).copied()
        }
    }

    fn layout() -> FixedLayout {
        let mut rects = HashMap::new();
        rects.insert(TileId::from("A"), Rect::new(0.0, 0.0, 100.0, 50.0));
        rects.insert(TileId::from("B"), Rect::new(100.0, 0.0, 200.0, 50.0));
        FixedLayout(rects)
    }

    #[test]
    fn test_sample_all() {
        let ids = [TileId::from("A"), TileId::from("B")];
        let snapshot = sample(&layout(), &ids, &[]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&ids[1]), Some(Rect::new(100.0, 0.0, 200.0, 50.0)));
    }

    #[test]
    fn test_sample_excludes() {
        let ids = [TileId::from("A"), TileId::from("B")];
        let snapshot = sample(&layout(), &ids, &[TileId::from("A")]);
        assert!(!snapshot.contains(&ids[0]));
        assert!(snapshot.contains(&ids[1]));
    }

    #[test]
    fn test_sample_skips_missing_rects() {
        let ids = [TileId::from("A"), TileId::from("Z")];
        let snapshot = sample(&layout(), &ids, &[]);
        assert_eq!(snapshot.len(), 1);
    }
}
