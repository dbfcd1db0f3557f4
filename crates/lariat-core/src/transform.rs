//! Coordinate transforms between device, overlay, and graph space.
//!
//! - **Device space**: raw pointer coordinates (`clientX`, `clientY`).
//! - **Overlay space**: device space relative to the host container, in CSS
//!   pixels. The overlay surface applies the pixel ratio when drawing.
//! - **Graph space**: model coordinates of node positions, independent of
//!   pan and zoom.
//!
//! Nothing is cached: every call reads the host's current viewport.

use crate::host::GraphHost;
use kurbo::Point;

/// Device → overlay: subtract the container offset.
pub fn to_overlay_coords<H: GraphHost + ?Sized>(host: &H, device: Point) -> Point {
    device - host.container_offset()
}

/// Device → graph: delegate to the host projection.
pub fn to_graph_coords<H: GraphHost + ?Sized>(host: &H, device: Point) -> Point {
    host.project_into_viewport(device)
}

pub fn to_overlay_polygon<H: GraphHost + ?Sized>(host: &H, polygon: &[Point]) -> Vec<Point> {
    polygon.iter().map(|&p| to_overlay_coords(host, p)).collect()
}

pub fn to_graph_polygon<H: GraphHost + ?Sized>(host: &H, polygon: &[Point]) -> Vec<Point> {
    polygon.iter().map(|&p| to_graph_coords(host, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use kurbo::Vec2;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new(800.0, 600.0);
        host.set_container_offset(Vec2::new(100.0, 50.0));
        host
    }

    #[test]
    fn overlay_subtracts_container_offset() {
        let host = host();
        assert_eq!(
            to_overlay_coords(&host, Point::new(150.0, 70.0)),
            Point::new(50.0, 20.0)
        );
    }

    #[test]
    fn graph_follows_pan_and_zoom() {
        let mut host = host();
        assert_eq!(
            to_graph_coords(&host, Point::new(150.0, 70.0)),
            Point::new(50.0, 20.0)
        );

        host.set_pan(Vec2::new(10.0, 10.0));
        host.set_zoom(2.0);
        assert_eq!(
            to_graph_coords(&host, Point::new(150.0, 70.0)),
            Point::new(20.0, 5.0)
        );
    }

    #[test]
    fn polygons_map_elementwise_in_order() {
        let host = host();
        let device = vec![Point::new(100.0, 50.0), Point::new(110.0, 60.0)];
        assert_eq!(
            to_overlay_polygon(&host, &device),
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]
        );
        assert_eq!(to_graph_polygon(&host, &[]), Vec::<Point>::new());
    }
}
