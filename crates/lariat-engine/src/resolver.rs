//! Selection resolution for a finished lasso.
//!
//! 1. Project the device-space polygon into graph space.
//! 2. Hit test every node position against it.
//! 3. Unless multi-selecting (modifier or additive mode), unselect
//!    everything selected outside the match.
//! 4. Emit `box` on the match.
//! 5. Select the selectable, not-yet-selected part of the match and emit
//!    `boxselect` on it.

use lariat_core::host::GraphHost;
use lariat_core::id::NodeId;
use lariat_core::model::{BoxEvent, SelectionMode};
use lariat_core::transform::to_graph_polygon;
use lariat_core::Point;
use lariat_render::hit::hit_test_polygon;
use std::collections::HashSet;

/// What a resolution did to the host selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Nodes inside the polygon.
    pub matched: Vec<NodeId>,
    /// Matched nodes that became selected.
    pub selected: Vec<NodeId>,
    /// Previously selected nodes dropped because they were outside.
    pub unselected: Vec<NodeId>,
}

/// Apply a finished lasso to the host selection.
///
/// `multi_select` is whether a multi-select modifier was held at release.
/// Polygons with fewer than 2 points are ignored entirely.
pub fn resolve_selection<H: GraphHost + ?Sized>(
    host: &mut H,
    device_polygon: &[Point],
    multi_select: bool,
) -> Resolution {
    if device_polygon.len() < 2 {
        return Resolution::default();
    }

    let graph_polygon = to_graph_polygon(host, device_polygon);
    let matched = hit_test_polygon(host, &graph_polygon);
    let matched_set: HashSet<NodeId> = matched.iter().copied().collect();

    let mut unselected = Vec::new();
    if !multi_select && host.selection_mode() != SelectionMode::Additive {
        unselected = host
            .selected_ids()
            .into_iter()
            .filter(|id| !matched_set.contains(id))
            .collect();
        if !unselected.is_empty() {
            host.unselect(&unselected);
        }
    }

    host.emit(BoxEvent::Matched {
        nodes: matched.clone(),
    });

    let selected: Vec<NodeId> = matched
        .iter()
        .copied()
        .filter(|&id| host.is_selectable(id) && !host.is_selected(id))
        .collect();
    host.select(&selected);
    host.emit(BoxEvent::Selected {
        nodes: selected.clone(),
    });

    log::debug!(
        "lasso resolved: {} matched, {} selected, {} unselected",
        matched.len(),
        selected.len(),
        unselected.len()
    );

    Resolution {
        matched,
        selected,
        unselected,
    }
}
