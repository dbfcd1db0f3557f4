//! Lasso configuration.
//!
//! Every field has a default matching the host's native conventions, so an
//! empty JSON object (or no options at all) yields a working setup.

use crate::model::Modifiers;
use serde::{Deserialize, Serialize};

/// Which modifier keys count as "multi-select".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSelectKeys {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Default for MultiSelectKeys {
    /// Shift, Ctrl, or ⌘: the keys the host itself uses for box selection.
    fn default() -> Self {
        Self {
            shift: true,
            ctrl: true,
            meta: true,
            alt: false,
        }
    }
}

impl MultiSelectKeys {
    pub fn matches(&self, mods: &Modifiers) -> bool {
        (self.shift && mods.shift)
            || (self.ctrl && mods.ctrl)
            || (self.meta && mods.meta)
            || (self.alt && mods.alt)
    }
}

/// Configuration for the lasso engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LassoConfig {
    pub multi_select_keys: MultiSelectKeys,

    /// Only activate while the primary button alone is held. Default: **true**.
    pub require_primary_button: bool,

    /// `data-id` given to the overlay surface.
    pub layer_id: String,

    /// `data-id` of the host surface the overlay is inserted in front of.
    pub anchor_layer_id: String,

    /// Element selector whose non-empty match means another exclusive
    /// interaction owns the pointer (edge-handles draws from `.eh-source`).
    pub competing_selector: String,
}

impl Default for LassoConfig {
    fn default() -> Self {
        Self {
            multi_select_keys: MultiSelectKeys::default(),
            require_primary_button: true,
            layer_id: "layer0-lasso".to_string(),
            anchor_layer_id: "layer0-selectbox".to_string(),
            competing_selector: ".eh-source".to_string(),
        }
    }
}

impl LassoConfig {
    /// Parse a (possibly partial) JSON options object.
    ///
    /// # Errors
    /// Returns the serde error message if the JSON is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(trimmed).map_err(|e| format!("Invalid lasso options: {e}"))?;
        log::debug!("lasso options loaded: {config:?}");
        Ok(config)
    }

    pub fn is_multi_select(&self, mods: &Modifiers) -> bool {
        self.multi_select_keys.matches(mods)
    }
}
