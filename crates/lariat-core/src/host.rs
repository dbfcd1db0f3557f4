//! Capability interface of the host graph library.
//!
//! The lasso engine never draws nodes, stores selection state, or computes
//! the viewport transform itself. It asks the host through `GraphHost`.
//! Implemented differently by each environment:
//! - WASM: reflective calls into a Cytoscape.js core object
//! - tests / headless: `MemoryHost`

use crate::id::NodeId;
use crate::model::{BoxEvent, SelectionBoxStyle, SelectionMode, ViewportSize};
use kurbo::{Point, Vec2};

pub trait GraphHost {
    // ─── Viewport ────────────────────────────────────────────────────────

    /// Current viewport size in CSS pixels. `None` once the host has been
    /// torn down; callers treat that as "nothing to do".
    fn viewport_size(&self) -> Option<ViewportSize>;

    /// Device pixels per CSS pixel.
    fn pixel_ratio(&self) -> f64;

    /// Device-space position of the host container's top-left corner.
    fn container_offset(&self) -> Vec2;

    /// Device → model projection, honoring the current pan and zoom.
    fn project_into_viewport(&self, device: Point) -> Point;

    // ─── Nodes & selection ───────────────────────────────────────────────

    fn node_ids(&self) -> Vec<NodeId>;

    /// Model-space position of a node. `None` if the node no longer exists.
    fn node_position(&self, id: NodeId) -> Option<Point>;

    fn is_selectable(&self, id: NodeId) -> bool;

    fn is_selected(&self, id: NodeId) -> bool;

    /// Currently selected elements.
    fn selected_ids(&self) -> Vec<NodeId>;

    fn select(&mut self, ids: &[NodeId]);

    fn unselect(&mut self, ids: &[NodeId]);

    fn selection_mode(&self) -> SelectionMode;

    // ─── Behavior flags ──────────────────────────────────────────────────

    fn auto_ungrabify(&self) -> bool;
    fn set_auto_ungrabify(&mut self, value: bool);

    fn user_panning_enabled(&self) -> bool;
    fn set_user_panning_enabled(&mut self, value: bool);

    fn box_selection_enabled(&self) -> bool;
    fn set_box_selection_enabled(&mut self, value: bool);

    /// Programmatic panning switch. Read-only from the lasso's side.
    fn panning_enabled(&self) -> bool;

    /// Squared pixel distance separating a drag from a tap.
    fn tap_threshold_sq(&self) -> f64;

    // ─── Interaction state ───────────────────────────────────────────────

    /// True while another exclusive interaction (e.g. edge drawing) owns
    /// the pointer.
    fn competing_mode_engaged(&self) -> bool;

    /// True while the host is dragging grabbed elements.
    fn element_drag_in_progress(&self) -> bool;

    // ─── Renderer hints ──────────────────────────────────────────────────

    /// Drop the background "pointer is down here" hint the host draws on
    /// mousedown.
    fn suppress_mousedown_hint(&mut self);

    /// Request a full redraw of the host's layers.
    fn request_redraw(&mut self);

    /// Flag the current pointer gesture as a drag for the rest of this event
    /// tick, so the host's own mouseup does not treat it as a background
    /// click and clear the selection.
    fn mark_dragged(&mut self);

    // ─── Notifications & style ───────────────────────────────────────────

    fn emit(&mut self, event: BoxEvent);

    fn selection_box_style(&self) -> SelectionBoxStyle;
}
