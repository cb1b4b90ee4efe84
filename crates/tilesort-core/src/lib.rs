//! Tilesort Core Library
//!
//! Platform-agnostic reorder engine for a grid of tiles: drag state machine,
//! nearest-slot resolution, FLIP animation planning and order persistence.
//! Rendering and geometry come in through the [`TileView`] and
//! [`LayoutProvider`] traits so the engine runs the same in a browser and in tests.

pub mod config;
pub mod engine;
pub mod flip;
pub mod geometry;
pub mod input;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod tile;

#[cfg(test)]
mod testing;

pub use config::ReorderConfig;
pub use engine::ReorderEngine;
pub use flip::{FlipAnimator, FlipMove, Transition, translate_css};
pub use geometry::{GeometrySnapshot, LayoutProvider, TileView, sample};
pub use input::{Modifiers, reorder_direction};
pub use resolver::{Placement, Side, resolve_insertion_point};
pub use scheduler::FrameQueue;
pub use session::{DragSession, DragState, DropOutcome};
pub use storage::{
    KeyValueStore, MemoryStorage, ORDER_KEY, OrderGateway, StorageError, StorageResult,
};
pub use tile::{Container, Direction, Slot, TileError, TileId};
