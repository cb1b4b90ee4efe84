//! Keyboard input mapping for accessible reordering.

use crate::tile::Direction;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Map a `KeyboardEvent.key` value plus modifiers to a reorder step.
pub fn reorder_direction(key: &str, modifiers: Modifiers) -> Option<Direction> {
    if !modifiers.command() {
        return None;
    }
    match key {
        "ArrowLeft" | "ArrowUp" => Some(Direction::Earlier),
        "ArrowRight" | "ArrowDown" => Some(Direction::Later),
        _ => None,
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: bool,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool) -> Self {
        Self { key, command }
    }

    /// Format the shortcut for display (e.g., "Ctrl/Cmd+ArrowLeft").
    pub fn format(&self) -> String {
        if self.command {
            format!("Ctrl/Cmd+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Reordering shortcuts, for help text and `aria-keyshortcuts`.
pub fn shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("ArrowLeft", true),
        Shortcut::new("ArrowUp", true),
        Shortcut::new("ArrowRight", true),
        Shortcut::new("ArrowDown", true),
    ]
}

/// Value for a tile's `aria-keyshortcuts` attribute.
pub fn aria_key_shortcuts() -> String {
    shortcuts()
        .iter()
        .flat_map(|s| [format!("Control+{}", s.key), format!("Meta+{}", s.key)])
        .collect::<Vec<_>>()
        .join(" ")
}
