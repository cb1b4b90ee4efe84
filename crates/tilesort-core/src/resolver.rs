//! Nearest-slot resolution: where should the placeholder go for a pointer position?

use crate::geometry::LayoutProvider;
use crate::tile::TileId;
use kurbo::{Point, Rect};

/// Which side of the target tile the placeholder belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Before,
    After,
}

/// A resolved insertion point relative to an existing tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    /// The tile nearest to the pointer.
    pub target: TileId,
    /// Whether to insert before or after it.
    pub side: Side,
}

/// Decide which side of `rect` a pointer belongs on.
///
/// Above the center means before. Roughly level with the tile (within half its
/// height) and left of center also means before. Everything else, including the
/// exact center, is after.
pub fn side_for(rect: Rect, pointer: Point) -> Side {
    let center = rect.center();
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    if dy < 0.0 || (dy.abs() < rect.height() / 2.0 && dx < 0.0) {
        Side::Before
    } else {
        Side::After
    }
}

/// Pick the candidate whose center is closest to `pointer`.
///
/// Candidates are visited in sequence order and only a strictly smaller distance
/// replaces the current best, so ties go to the earliest tile. `None` means there
/// is nothing to insert relative to (insert at end).
pub fn resolve_insertion_point<'a>(
    candidates: impl IntoIterator<Item = (&'a TileId, Rect)>,
    pointer: Point,
) -> Option<Placement> {
    let mut best: Option<(&TileId, Rect, f64)> = None;
    for (id, rect) in candidates {
        let d2 = (pointer - rect.center()).hypot2();
        if best.is_none_or(|(_, _, best_d2)| d2 < best_d2) {
            best = Some((id, rect, d2));
        }
    }
    let (id, rect, _) = best?;
    Some(Placement {
        target: id.clone(),
        side: side_for(rect, pointer),
    })
}

/// Resolve against live layout, skipping ignored tiles and tiles without a rect.
pub fn resolve_in_layout<'a, L>(
    layout: &L,
    items: impl IntoIterator<Item = &'a TileId>,
    pointer: Point,
    ignore: &[TileId],
) -> Option<Placement>
where
    L: LayoutProvider + ?Sized,
{
    let candidates = items
        .into_iter()
        .filter(|id| !ignore.contains(id))
        .filter_map(|id| layout.rect_of(id).map(|rect| (id, rect)));
    resolve_insertion_point(candidates, pointer)
}
