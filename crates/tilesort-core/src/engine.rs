//! The reorder engine: drag state machine, keyboard reordering and persistence.
//!
//! ```text
//! Idle --begin_drag--> Dragging --end_drag (moved)-----> commit --> Idle
//!                         |  ^
//!                drag_over|  |      end_drag (not moved) --> revert --> Idle
//!                         +--+
//! ```
//!
//! Every operation is synchronous and infallible from the caller's point of view:
//! stale ids, spurious events and storage failures all degrade to "do nothing"
//! (logged), never to an error.

use crate::config::ReorderConfig;
use crate::flip::FlipAnimator;
use crate::geometry::{self, GeometrySnapshot, TileView};
use crate::resolver;
use crate::scheduler::FrameQueue;
use crate::session::{DragSession, DragState, DropOutcome};
use crate::storage::{KeyValueStore, OrderGateway};
use crate::tile::{Container, Direction, TileId};
use kurbo::Point;
use std::mem;

/// Owns the tile order and drives a [`TileView`] through drags and keyboard moves.
pub struct ReorderEngine<V, S> {
    container: Container,
    view: V,
    orders: OrderGateway<S>,
    animator: FlipAnimator,
    frames: FrameQueue<V>,
    state: DragState,
    /// Set when a drag starts, consumed by the next click.
    suppress_click: bool,
    /// Dragged tile still hidden in its own slot, waiting for the next frame to
    /// give its space to the placeholder.
    pending_detach: Option<TileId>,
}

impl<V, S> ReorderEngine<V, S>
where
    V: TileView + 'static,
    S: KeyValueStore,
{
    /// Create an engine for `container`, rendered by `view` and persisted to `store`.
    pub fn new(container: Container, mut view: V, store: S, config: &ReorderConfig) -> Self {
        view.sync_order(container.slots());
        Self {
            container,
            view,
            orders: OrderGateway::with_key(store, config.storage_key.clone()),
            animator: FlipAnimator::from_config(config),
            frames: FrameQueue::new(),
            state: DragState::Idle,
            suppress_click: false,
            pending_detach: None,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        self.orders.store()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Reorder the container to match the persisted order, if there is one.
    ///
    /// Returns true if any tile was moved. Read failures and malformed values are
    /// logged and leave the markup order untouched.
    pub fn restore_saved_order(&mut self) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        let order = match self.orders.load() {
            Ok(Some(order)) => order,
            Ok(None) => return false,
            Err(e) => {
                log::warn!("Ignoring saved tile order: {}", e);
                return false;
            }
        };

        let before = self.container.ids();
        let applied = self.container.apply_saved_order(&order);
        log::debug!("Applied {} of {} saved tile ids", applied, order.len());
        if self.container.ids() == before {
            return false;
        }
        self.view.sync_order(self.container.slots());
        true
    }

    /// Start dragging `id`: its slot becomes the placeholder.
    ///
    /// The tile is hidden right away but keeps its space until the next frame
    /// (or the first move event), when the placeholder takes over in a single
    /// step so no other tile shifts.
    ///
    /// Ignored (returns false) for unknown tiles or while another drag is active.
    pub fn begin_drag(&mut self, id: &TileId) -> bool {
        if let Some(active) = self.state.session() {
            log::debug!(
                "Ignoring drag start for {}: {} is already being dragged",
                id,
                active.tile()
            );
            return false;
        }
        let Some(origin_next) = self.container.next_sibling(id) else {
            log::debug!("Ignoring drag start for unknown tile {}", id);
            return false;
        };
        let Some(origin_index) = self.container.lift(id) else {
            return false;
        };

        self.state = DragState::Dragging(DragSession::new(id.clone(), origin_next, origin_index));
        self.suppress_click = true;
        self.view.set_dragging(id, true);
        self.pending_detach = Some(id.clone());
        log::debug!("Drag started for {} at {}", id, origin_index);
        true
    }

    /// Handle a pointer move during a drag.
    ///
    /// Returns true if the placeholder changed position.
    pub fn drag_over(&mut self, pointer: Point) -> bool {
        if !pointer.is_finite() {
            return false;
        }
        self.detach_dragged();
        let DragState::Dragging(session) = &mut self.state else {
            return false;
        };
        session.record_pointer(pointer);

        let exclude = [session.tile().clone()];
        let before = geometry::sample(&self.view, self.container.tile_ids(), &exclude);
        let placement =
            resolver::resolve_in_layout(&self.view, self.container.tile_ids(), pointer, &exclude);
        let Some(index) = self.container.insertion_index(placement.as_ref()) else {
            log::debug!("Drop target vanished during drag");
            return false;
        };

        let moved = self.container.move_placeholder(index);
        if moved {
            session.mark_moved();
            self.view.sync_order(self.container.slots());
        }
        self.animate_from(&before, &exclude);
        moved
    }

    /// Finish the active drag: commit if the placeholder moved, revert otherwise.
    pub fn end_drag(&mut self) -> DropOutcome {
        let DragState::Dragging(session) = mem::take(&mut self.state) else {
            log::debug!("Ignoring drag end without an active drag");
            return DropOutcome::Ignored;
        };
        let tile = session.tile().clone();
        // Never detached: the tile still sits in its own slot.
        self.pending_detach = None;
        let exclude = [tile.clone()];
        let before = geometry::sample(&self.view, self.container.tile_ids(), &exclude);

        let settled = if session.moved() {
            self.container.settle(tile.clone())
        } else {
            None
        };
        let outcome = match settled {
            Some(index) => DropOutcome::Committed { index },
            None => DropOutcome::Reverted {
                index: self.container.restore(tile.clone(), session.origin_next()),
            },
        };

        self.view.sync_order(self.container.slots());
        self.view.set_dragging(&tile, false);
        self.animate_from(&before, &exclude);

        if matches!(outcome, DropOutcome::Committed { .. }) {
            self.persist();
        }
        log::debug!(
            "Drag ended for {} (from {}, pointer {:?} -> {:?}): {:?}",
            tile,
            session.origin_index(),
            session.start_pointer(),
            session.last_pointer(),
            outcome
        );
        outcome
    }

    /// Swap `id` with its neighbour, persist, and keep focus on it.
    ///
    /// No-op at either end of the sequence, for unknown tiles and during a drag.
    pub fn move_by_keyboard(&mut self, id: &TileId, direction: Direction) -> bool {
        if self.state.is_dragging() {
            return false;
        }
        let Some(index) = self.container.swap_with_neighbor(id, direction) else {
            return false;
        };
        self.view.sync_order(self.container.slots());
        self.persist();
        self.view.focus(id);
        log::debug!("Moved {} {:?} to {}", id, direction, index);
        true
    }

    /// Whether the click that follows a drag should be swallowed. Resets the flag.
    pub fn take_click_suppression(&mut self) -> bool {
        mem::take(&mut self.suppress_click)
    }

    /// Check if a frame callback should be requested.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_detach.is_some() || self.frames.has_pending()
    }

    /// Run the work deferred to this frame. Returns the number of steps run.
    pub fn run_frame(&mut self) -> usize {
        let detached = usize::from(self.detach_dragged());
        detached + self.frames.run_frame(&mut self.view)
    }

    /// Swap the hidden dragged tile for the placeholder in the view.
    fn detach_dragged(&mut self) -> bool {
        let Some(id) = self.pending_detach.take() else {
            return false;
        };
        self.view.sync_order(self.container.slots());
        self.view.detach(&id);
        true
    }

    fn animate_from(&mut self, before: &GeometrySnapshot, exclude: &[TileId]) {
        let moves = self.animator.animate(
            before,
            &mut self.view,
            self.container.tile_ids(),
            exclude,
            &mut self.frames,
        );
        if !moves.is_empty() {
            log::trace!("Animating {} tiles", moves.len());
        }
    }

    fn persist(&self) {
        if let Err(e) = self.orders.save(&self.container.ids()) {
            log::warn!("Tile order not persisted: {}", e);
        }
    }
}
