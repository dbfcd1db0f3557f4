//! In-memory host graph.
//!
//! A complete `GraphHost` without a browser: nodes live in a petgraph
//! `StableGraph`, the viewport is a plain pan/zoom pair, and every emitted
//! notification is recorded. Used by headless embedders and by tests.

use crate::host::GraphHost;
use crate::id::NodeId;
use crate::model::{BoxEvent, SelectionBoxStyle, SelectionMode, ViewportSize};
use kurbo::{Point, Vec2};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Undirected;
use std::collections::HashMap;

/// Cytoscape's desktop tap threshold is 4px.
pub const DEFAULT_TAP_THRESHOLD_SQ: f64 = 16.0;

#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub id: NodeId,
    pub position: Point,
    pub selectable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryHost {
    graph: StableGraph<MemoryNode, (), Undirected>,
    index: HashMap<NodeId, NodeIndex>,

    viewport: ViewportSize,
    pixel_ratio: f64,
    container_offset: Vec2,
    pan: Vec2,
    zoom: f64,
    destroyed: bool,

    pub selection_mode: SelectionMode,
    pub auto_ungrabify: bool,
    pub user_panning_enabled: bool,
    pub box_selection_enabled: bool,
    pub panning_enabled: bool,
    pub tap_threshold_sq: f64,
    pub competing_mode: bool,
    pub element_dragging: bool,
    pub style: SelectionBoxStyle,

    /// Set by `mark_dragged`, cleared by `end_tick`.
    pub dragged: bool,
    pub mousedown_hint_suppressed: bool,
    pub redraws: usize,
    /// Number of flag writes, all three flags counted separately.
    pub flag_writes: usize,
    events: Vec<BoxEvent>,
}

impl MemoryHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            graph: StableGraph::default(),
            index: HashMap::new(),
            viewport: ViewportSize { width, height },
            pixel_ratio: 1.0,
            container_offset: Vec2::ZERO,
            pan: Vec2::ZERO,
            zoom: 1.0,
            destroyed: false,
            selection_mode: SelectionMode::Single,
            auto_ungrabify: false,
            user_panning_enabled: true,
            box_selection_enabled: true,
            panning_enabled: true,
            tap_threshold_sq: DEFAULT_TAP_THRESHOLD_SQ,
            competing_mode: false,
            element_dragging: false,
            style: SelectionBoxStyle::default(),
            dragged: false,
            mousedown_hint_suppressed: false,
            redraws: 0,
            flag_writes: 0,
            events: Vec::new(),
        }
    }

    // ─── Graph building ──────────────────────────────────────────────────

    /// Add (or move) a node at a model-space position.
    pub fn add_node(&mut self, id: &str, position: Point) -> NodeId {
        let id = NodeId::intern(id);
        if let Some(&idx) = self.index.get(&id) {
            self.graph[idx].position = position;
            return id;
        }
        let idx = self.graph.add_node(MemoryNode {
            id,
            position,
            selectable: true,
            selected: false,
        });
        self.index.insert(id, idx);
        id
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<MemoryNode> {
        let idx = self.index.remove(&id)?;
        self.graph.remove_node(idx)
    }

    /// Connect two nodes. Returns `false` if either endpoint is unknown.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&ia), Some(&ib)) => {
                self.graph.add_edge(ia, ib, ());
                true
            }
            _ => false,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn set_selectable(&mut self, id: NodeId, selectable: bool) {
        if let Some(node) = self.node_mut(id) {
            node.selectable = selectable;
        }
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = ViewportSize { width, height };
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    pub fn set_container_offset(&mut self, offset: Vec2) {
        self.container_offset = offset;
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Tear the host down; viewport queries return `None` afterwards.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    // ─── Inspection ──────────────────────────────────────────────────────

    pub fn events(&self) -> &[BoxEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<BoxEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(BoxEvent::name).collect()
    }

    /// End of the current event tick: the host's own mouseup has run and
    /// the dragged hint is released.
    pub fn end_tick(&mut self) {
        self.dragged = false;
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MemoryNode> {
        let idx = *self.index.get(&id)?;
        self.graph.node_weight_mut(idx)
    }
}

impl GraphHost for MemoryHost {
    fn viewport_size(&self) -> Option<ViewportSize> {
        (!self.destroyed).then_some(self.viewport)
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn container_offset(&self) -> Vec2 {
        self.container_offset
    }

    fn project_into_viewport(&self, device: Point) -> Point {
        let local = device - self.container_offset - self.pan;
        Point::new(local.x / self.zoom, local.y / self.zoom)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    fn node_position(&self, id: NodeId) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    fn is_selectable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.selectable)
    }

    fn is_selected(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.selected)
    }

    fn selected_ids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].selected)
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    fn select(&mut self, ids: &[NodeId]) {
        for &id in ids {
            if let Some(node) = self.node_mut(id) {
                node.selected = true;
            }
        }
    }

    fn unselect(&mut self, ids: &[NodeId]) {
        for &id in ids {
            if let Some(node) = self.node_mut(id) {
                node.selected = false;
            }
        }
    }

    fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    fn auto_ungrabify(&self) -> bool {
        self.auto_ungrabify
    }

    fn set_auto_ungrabify(&mut self, value: bool) {
        self.flag_writes += 1;
        self.auto_ungrabify = value;
    }

    fn user_panning_enabled(&self) -> bool {
        self.user_panning_enabled
    }

    fn set_user_panning_enabled(&mut self, value: bool) {
        self.flag_writes += 1;
        self.user_panning_enabled = value;
    }

    fn box_selection_enabled(&self) -> bool {
        self.box_selection_enabled
    }

    fn set_box_selection_enabled(&mut self, value: bool) {
        self.flag_writes += 1;
        self.box_selection_enabled = value;
    }

    fn panning_enabled(&self) -> bool {
        self.panning_enabled
    }

    fn tap_threshold_sq(&self) -> f64 {
        self.tap_threshold_sq
    }

    fn competing_mode_engaged(&self) -> bool {
        self.competing_mode
    }

    fn element_drag_in_progress(&self) -> bool {
        self.element_dragging
    }

    fn suppress_mousedown_hint(&mut self) {
        self.mousedown_hint_suppressed = true;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn mark_dragged(&mut self) {
        self.dragged = true;
    }

    fn emit(&mut self, event: BoxEvent) {
        self.events.push(event);
    }

    fn selection_box_style(&self) -> SelectionBoxStyle {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selection_roundtrip() {
        let mut host = MemoryHost::new(100.0, 100.0);
        let a = host.add_node("a", Point::new(1.0, 1.0));
        let b = host.add_node("b", Point::new(2.0, 2.0));
        assert!(host.add_edge(a, b));
        assert_eq!(host.edge_count(), 1);

        host.select(&[a, b]);
        assert_eq!(host.selected_ids(), vec![a, b]);
        host.unselect(&[a]);
        assert_eq!(host.selected_ids(), vec![b]);
    }

    #[test]
    fn re_adding_moves_existing_node() {
        let mut host = MemoryHost::new(100.0, 100.0);
        let a = host.add_node("a", Point::new(1.0, 1.0));
        host.add_node("a", Point::new(9.0, 9.0));
        assert_eq!(host.node_count(), 1);
        assert_eq!(host.node_position(a), Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn removed_nodes_vanish_from_queries() {
        let mut host = MemoryHost::new(100.0, 100.0);
        let a = host.add_node("a", Point::new(1.0, 1.0));
        host.select(&[a]);
        assert!(host.remove_node(a).is_some());
        assert!(host.node_ids().is_empty());
        assert!(!host.is_selected(a));
        assert!(host.node_position(a).is_none());
    }

    #[test]
    fn destroyed_host_has_no_viewport() {
        let mut host = MemoryHost::new(100.0, 50.0);
        assert!(host.viewport_size().is_some());
        host.destroy();
        assert!(host.viewport_size().is_none());
    }
}
