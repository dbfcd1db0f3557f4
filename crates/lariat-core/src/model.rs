//! Plain data exchanged between the lasso engine and its host.

use crate::id::NodeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Raw pointer sample in device space. Carried as the originating input of
/// `boxstart` / `boxend` notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub point: Point,
    /// Bitmask of held buttons, DOM convention (1 = primary).
    pub buttons: u16,
    pub modifiers: Modifiers,
}

/// How the host merges a new selection with the existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// New matches replace the existing selection.
    #[default]
    Single,
    /// New matches are only ever added.
    Additive,
}

/// The three host behavior flags the lasso suppresses while active.
/// Always read and written together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostFlags {
    pub auto_ungrabify: bool,
    pub user_panning_enabled: bool,
    pub box_selection_enabled: bool,
}

impl HostFlags {
    /// Values held while a lasso is active.
    pub const SUPPRESSED: HostFlags = HostFlags {
        auto_ungrabify: true,
        user_panning_enabled: false,
        box_selection_enabled: false,
    };
}

/// Host viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// 8-bit RGB triple as resolved by the host style system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.0,
            g: self.1,
            b: self.2,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

/// RGB plus a 0..1 alpha, formatted the way Canvas2D expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The host's `selection-box-*` style tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBoxStyle {
    pub color: Rgb,
    pub border_color: Rgb,
    pub border_width: f64,
    pub opacity: f64,
}

impl Default for SelectionBoxStyle {
    /// Cytoscape's stock selection box look.
    fn default() -> Self {
        Self {
            color: Rgb(221, 221, 221),
            border_color: Rgb(170, 170, 170),
            border_width: 1.0,
            opacity: 0.65,
        }
    }
}

/// Notifications emitted on the host. Names and payloads mirror the host's
/// native box-selection events so applications see no difference.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxEvent {
    /// Lasso activated. `position` is the model-space pointer position.
    Start {
        position: Point,
        origin: PointerSample,
    },
    /// Every node inside the finished lasso, possibly none.
    Matched { nodes: Vec<NodeId> },
    /// Matched nodes that were newly selected.
    Selected { nodes: Vec<NodeId> },
    /// Lasso finished. `position` is the model-space release position.
    End {
        position: Point,
        origin: PointerSample,
    },
}

impl BoxEvent {
    /// Host event name.
    pub fn name(&self) -> &'static str {
        match self {
            BoxEvent::Start { .. } => "boxstart",
            BoxEvent::Matched { .. } => "box",
            BoxEvent::Selected { .. } => "boxselect",
            BoxEvent::End { .. } => "boxend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_css_string() {
        let c = Rgb(10, 20, 30).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(10, 20, 30, 0.5)");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgb(0, 0, 0).with_alpha(3.0).a, 1.0);
        assert_eq!(Rgb(0, 0, 0).with_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn event_names_match_native_box_selection() {
        let origin = PointerSample {
            point: Point::ZERO,
            buttons: 1,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(
            BoxEvent::Start {
                position: Point::ZERO,
                origin
            }
            .name(),
            "boxstart"
        );
        assert_eq!(BoxEvent::Matched { nodes: vec![] }.name(), "box");
        assert_eq!(BoxEvent::Selected { nodes: vec![] }.name(), "boxselect");
        assert_eq!(
            BoxEvent::End {
                position: Point::ZERO,
                origin
            }
            .name(),
            "boxend"
        );
    }

    #[test]
    fn selection_mode_deserializes_lowercase() {
        let mode: SelectionMode = serde_json::from_str("\"additive\"").unwrap();
        assert_eq!(mode, SelectionMode::Additive);
    }
}
