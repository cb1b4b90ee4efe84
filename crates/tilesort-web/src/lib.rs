//! Tilesort Web
//!
//! Browser shell for the reorder engine: a DOM-backed tile view, drag and
//! keyboard event wiring, and the wasm entry points.

#[cfg(target_arch = "wasm32")]
mod controller;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use controller::GridController;
#[cfg(target_arch = "wasm32")]
pub use dom::DomTileView;
#[cfg(target_arch = "wasm32")]
pub use web::{mount_with_config, run_wasm};

pub use tilesort_core::ReorderConfig;
