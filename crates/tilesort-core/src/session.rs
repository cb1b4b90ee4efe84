//! Drag session state.

use crate::tile::TileId;
use kurbo::Point;

/// The transient state of one in-progress drag.
///
/// The placeholder itself lives in the container sequence; the session only
/// remembers what is needed to finish the drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The tile being dragged.
    tile: TileId,
    /// Tile that followed the dragged one when the drag started (`None` = last).
    origin_next: Option<TileId>,
    /// Slot index the drag started from.
    origin_index: usize,
    /// Whether the placeholder has left its starting position.
    moved: bool,
    /// First pointer position seen during the drag.
    start_pointer: Option<Point>,
    /// Latest pointer position seen during the drag.
    last_pointer: Option<Point>,
}

impl DragSession {
    pub fn new(tile: TileId, origin_next: Option<TileId>, origin_index: usize) -> Self {
        Self {
            tile,
            origin_next,
            origin_index,
            moved: false,
            start_pointer: None,
            last_pointer: None,
        }
    }

    pub fn tile(&self) -> &TileId {
        &self.tile
    }

    pub fn origin_next(&self) -> Option<&TileId> {
        self.origin_next.as_ref()
    }

    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Record that the placeholder changed position. Sticky for the session.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Track the pointer position of a move event.
    pub fn record_pointer(&mut self, pointer: Point) {
        if self.start_pointer.is_none() {
            self.start_pointer = Some(pointer);
        }
        self.last_pointer = Some(pointer);
    }

    pub fn start_pointer(&self) -> Option<Point> {
        self.start_pointer
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }
}

/// Drag state machine phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

/// How a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tile took the placeholder's slot and the order was persisted.
    Committed { index: usize },
    /// Nothing moved; the tile went back where it came from.
    Reverted { index: usize },
    /// No drag was active.
    Ignored,
}
