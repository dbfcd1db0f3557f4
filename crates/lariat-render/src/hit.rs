//! Hit testing: graph-space polygon → contained nodes.

use kurbo::Point;
use lariat_core::geometry::{bounds, point_in_polygon};
use lariat_core::host::GraphHost;
use lariat_core::id::NodeId;

/// Find all nodes whose model-space position lies inside `polygon`
/// (graph space). Order follows the host's node order.
pub fn hit_test_polygon<H: GraphHost + ?Sized>(host: &H, polygon: &[Point]) -> Vec<NodeId> {
    let Some((min, max)) = bounds(polygon) else {
        return Vec::new();
    };

    host.node_ids()
        .into_iter()
        .filter(|&id| {
            host.node_position(id).is_some_and(|p| {
                // Cheap reject before the crossing test.
                p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
                    && point_in_polygon(p, polygon)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lariat_core::memory::MemoryHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn hit_test_square() {
        let mut host = MemoryHost::new(100.0, 100.0);
        let inside = host.add_node("inside", Point::new(5.0, 5.0));
        host.add_node("outside", Point::new(20.0, 20.0));

        let square = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert_eq!(hit_test_polygon(&host, &square), vec![inside]);
    }

    #[test]
    fn hit_test_empty_polygon() {
        let mut host = MemoryHost::new(100.0, 100.0);
        host.add_node("a", Point::new(0.0, 0.0));
        assert!(hit_test_polygon(&host, &[]).is_empty());
    }

    #[test]
    fn hit_test_empty_graph() {
        let host = MemoryHost::new(100.0, 100.0);
        let tri = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        assert!(hit_test_polygon(&host, &tri).is_empty());
    }
}
