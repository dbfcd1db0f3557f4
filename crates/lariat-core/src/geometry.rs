//! Polygon geometry: point accumulation and containment.
//!
//! Points are `kurbo::Point` (f64) in whatever space the caller works in;
//! the functions here never convert between spaces.

use kurbo::Point;

/// An ordered, open polygon. Insertion order defines the edge order; the
/// closing edge from the last point back to the first is implicit.
pub type Polygon = Vec<Point>;

/// Squared Euclidean distance between two points.
pub fn distance_sq(a: Point, b: Point) -> f64 {
    (b - a).hypot2()
}

/// Crossing-number (ray casting) point-in-polygon test.
///
/// Casts a ray towards +x and counts edge crossings. Points exactly on an
/// edge may land on either side. Polygons with fewer than 3 points contain
/// nothing.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut prev = polygon[polygon.len() - 1];

    for &curr in polygon {
        // The first clause guarantees curr.y != prev.y, so the division is safe.
        let crosses = ((curr.y > point.y) != (prev.y > point.y))
            && (point.x < (prev.x - curr.x) * (point.y - curr.y) / (prev.y - curr.y) + curr.x);
        if crosses {
            inside = !inside;
        }
        prev = curr;
    }

    inside
}

/// Axis-aligned bounds of a polygon as `(min, max)`. `None` when empty.
pub fn bounds(polygon: &[Point]) -> Option<(Point, Point)> {
    let first = *polygon.first()?;
    let mut min = first;
    let mut max = first;
    for p in &polygon[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn square_contains_center() {
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square()));
    }

    #[test]
    fn square_excludes_far_point() {
        assert!(!point_in_polygon(Point::new(20.0, 20.0), &square()));
        assert!(!point_in_polygon(Point::new(-1.0, 5.0), &square()));
        assert!(!point_in_polygon(Point::new(5.0, 11.0), &square()));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening upwards: notch between x=3..7 above y=3.
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(7.0, 10.0),
            Point::new(7.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(1.5, 8.0), &u));
        assert!(point_in_polygon(Point::new(8.5, 8.0), &u));
        assert!(point_in_polygon(Point::new(5.0, 1.0), &u));
        assert!(!point_in_polygon(Point::new(5.0, 8.0), &u));
    }

    #[test]
    fn self_intersecting_uses_even_odd() {
        // Bow tie crossing at (5, 5).
        let bow = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 5.0), &bow));
        assert!(point_in_polygon(Point::new(8.0, 5.0), &bow));
        assert!(!point_in_polygon(Point::new(5.0, 1.0), &bow));
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
        assert!(!point_in_polygon(
            Point::new(0.5, 0.0),
            &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        ));
    }

    #[test]
    fn distance_is_squared() {
        assert_eq!(distance_sq(Point::new(1.0, 1.0), Point::new(4.0, 5.0)), 25.0);
    }

    #[test]
    fn bounds_of_square() {
        let (min, max) = bounds(&square()).unwrap();
        assert_eq!(min, Point::new(0.0, 0.0));
        assert_eq!(max, Point::new(10.0, 10.0));
        assert!(bounds(&[]).is_none());
    }
}
