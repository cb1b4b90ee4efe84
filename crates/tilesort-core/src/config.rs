//! Reorder configuration.

use crate::flip::{DEFAULT_EASING, DEFAULT_FLIP_DURATION_MS};
use crate::storage::ORDER_KEY;
use serde::{Deserialize, Serialize};

/// Settings for the reorder engine and its browser shell.
///
/// Every field has a default, so a partial object (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReorderConfig {
    /// Key the order is persisted under.
    pub storage_key: String,
    /// Duration of the FLIP play transition.
    pub flip_duration_ms: u32,
    /// CSS timing function for the play transition.
    pub easing: String,
    /// Selector of the grid container.
    pub grid_selector: String,
    /// Selector of tiles inside the grid.
    pub tile_selector: String,
    /// Attribute holding a tile's stable id.
    pub id_attribute: String,
    /// Class list given to the placeholder element.
    pub placeholder_class: String,
    /// Class added to the tile being dragged.
    pub dragging_class: String,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            storage_key: ORDER_KEY.to_string(),
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            easing: DEFAULT_EASING.to_string(),
            grid_selector: ".viewport-grid".to_string(),
            tile_selector: ".tile".to_string(),
            id_attribute: "data-id".to_string(),
            placeholder_class: "tile placeholder".to_string(),
            dragging_class: "dragging".to_string(),
        }
    }
}

impl ReorderConfig {
    /// Parse a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReorderConfig::default();
        assert_eq!(config.storage_key, "tileOrder:v1");
        assert_eq!(config.flip_duration_ms, 280);
    }

    #[test]
    fn test_partial_json() {
        let json = r##"{"flipDurationMs": 120, "gridSelector": "#tiles"}"##;
        let config = ReorderConfig::from_json(json).unwrap();
        assert_eq!(config.flip_duration_ms, 120);
        assert_eq!(config.grid_selector, "#tiles");
        assert_eq!(config.tile_selector, ".tile");
    }
}
