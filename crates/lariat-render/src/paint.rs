//! Lasso polygon → kurbo paths and paints.

use kurbo::{Affine, BezPath, Point};
use lariat_core::model::{Rgba, SelectionBoxStyle};

/// Resolved paints for one lasso frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LassoPaint {
    pub fill: Rgba,
    /// Border color and width. `None` when the border width is not positive.
    pub stroke: Option<(Rgba, f64)>,
}

impl LassoPaint {
    /// Both colors share the style's opacity.
    pub fn from_style(style: &SelectionBoxStyle) -> Self {
        let stroke = (style.border_width > 0.0)
            .then(|| (style.border_color.with_alpha(style.opacity), style.border_width));
        Self {
            fill: style.color.with_alpha(style.opacity),
            stroke,
        }
    }
}

/// The lasso outline and its closed fill region, both scaled.
#[derive(Debug, Clone)]
pub struct LassoPaths {
    /// Open polyline through the points in order. Stroked.
    pub outline: BezPath,
    /// Same polyline closed back to the first point. Filled.
    pub region: BezPath,
}

/// Build the lasso paths in overlay space, scaled by `scale` (the device
/// pixel ratio). `None` for fewer than 2 points.
pub fn lasso_paths(polygon: &[Point], scale: f64) -> Option<LassoPaths> {
    let (first, rest) = polygon.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut outline = BezPath::new();
    outline.move_to(*first);
    for &p in rest {
        outline.line_to(p);
    }
    outline.apply_affine(Affine::scale(scale));

    let mut region = outline.clone();
    region.close_path();

    Some(LassoPaths { outline, region })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use lariat_core::model::Rgb;

    #[test]
    fn single_point_has_no_path() {
        assert!(lasso_paths(&[], 1.0).is_none());
        assert!(lasso_paths(&[Point::new(1.0, 1.0)], 1.0).is_none());
    }

    #[test]
    fn paths_are_scaled_and_region_is_closed() {
        let paths = lasso_paths(
            &[
                Point::new(1.0, 1.0),
                Point::new(5.0, 1.0),
                Point::new(5.0, 4.0),
            ],
            2.0,
        )
        .unwrap();

        let outline: Vec<PathEl> = paths.outline.elements().to_vec();
        assert_eq!(
            outline,
            vec![
                PathEl::MoveTo(Point::new(2.0, 2.0)),
                PathEl::LineTo(Point::new(10.0, 2.0)),
                PathEl::LineTo(Point::new(10.0, 8.0)),
            ]
        );
        assert_eq!(paths.region.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn zero_border_width_skips_stroke() {
        let style = SelectionBoxStyle {
            color: Rgb(1, 2, 3),
            border_color: Rgb(4, 5, 6),
            border_width: 0.0,
            opacity: 0.25,
        };
        let paint = LassoPaint::from_style(&style);
        assert!(paint.stroke.is_none());
        assert_eq!(paint.fill.to_css(), "rgba(1, 2, 3, 0.25)");
    }

    #[test]
    fn border_shares_opacity() {
        let paint = LassoPaint::from_style(&SelectionBoxStyle::default());
        let (color, width) = paint.stroke.unwrap();
        assert_eq!(color.to_css(), "rgba(170, 170, 170, 0.65)");
        assert_eq!(width, 1.0);
    }
}
