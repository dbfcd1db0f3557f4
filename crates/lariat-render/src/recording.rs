//! Recording surface backend for headless use and tests.
//!
//! Clones share one log, so a caller can keep a handle after the overlay
//! has consumed (and, on destroy, dropped) its backend.

use crate::overlay::{SurfaceBackend, SurfaceSize};
use kurbo::{BezPath, PathEl, Point};
use lariat_core::model::Rgba;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetSize(SurfaceSize),
    Clear,
    Stroke {
        color: Rgba,
        width: f64,
        points: usize,
        first: Option<Point>,
    },
    Fill {
        color: Rgba,
        points: usize,
        closed: bool,
    },
    Remove,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<Vec<SurfaceOp>>>,
}

impl RecordingBackend {
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    /// Number of fills since the last `Clear`, i.e. whether a lasso is
    /// currently visible.
    pub fn visible_fills(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .rev()
            .take_while(|op| !matches!(op, SurfaceOp::Clear))
            .filter(|op| matches!(op, SurfaceOp::Fill { .. }))
            .count()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.log.borrow().iter().filter(|op| pred(op)).count()
    }

    fn push(&self, op: SurfaceOp) {
        self.log.borrow_mut().push(op);
    }
}

fn vertex_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| !matches!(el, PathEl::ClosePath))
        .count()
}

fn first_point(path: &BezPath) -> Option<Point> {
    match path.elements().first() {
        Some(PathEl::MoveTo(p)) => Some(*p),
        _ => None,
    }
}

impl SurfaceBackend for RecordingBackend {
    fn set_size(&mut self, size: SurfaceSize) {
        self.push(SurfaceOp::SetSize(size));
    }

    fn clear(&mut self, _size: SurfaceSize) {
        self.push(SurfaceOp::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.push(SurfaceOp::Stroke {
            color,
            width,
            points: vertex_count(path),
            first: first_point(path),
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        self.push(SurfaceOp::Fill {
            color,
            points: vertex_count(path),
            closed: matches!(path.elements().last(), Some(PathEl::ClosePath)),
        });
    }

    fn remove(&mut self) {
        self.push(SurfaceOp::Remove);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlaySurface;
    use lariat_core::model::SelectionBoxStyle;

    #[test]
    fn log_survives_destroy() {
        let probe = RecordingBackend::default();
        let mut overlay = OverlaySurface::new(probe.clone());
        overlay.destroy();
        overlay.destroy();
        assert_eq!(probe.count(|op| matches!(op, SurfaceOp::Remove)), 1);
    }

    #[test]
    fn visible_fills_reset_on_clear() {
        let probe = RecordingBackend::default();
        let mut overlay = OverlaySurface::new(probe.clone());
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ];
        overlay.draw_polygon(&square, &SelectionBoxStyle::default());
        assert_eq!(probe.visible_fills(), 1);
        overlay.clear();
        assert_eq!(probe.visible_fills(), 0);
    }
}
