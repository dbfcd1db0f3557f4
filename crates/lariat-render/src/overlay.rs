//! Overlay surface: the transparent layer the lasso is drawn on.
//!
//! The surface logic (sizing, pixel-ratio scaling, destroy guard) lives here;
//! the actual drawing goes through a `SurfaceBackend` so the same code drives
//! an HTML canvas and the recording backend used in tests.

use crate::paint::{LassoPaint, lasso_paths};
use kurbo::{BezPath, Point};
use lariat_core::host::GraphHost;
use lariat_core::model::{Rgba, SelectionBoxStyle, ViewportSize};

/// Backing store size (device pixels) and displayed size (CSS pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub device_width: f64,
    pub device_height: f64,
    pub css_width: f64,
    pub css_height: f64,
}

impl SurfaceSize {
    pub fn for_viewport(viewport: ViewportSize, pixel_ratio: f64) -> Self {
        Self {
            device_width: viewport.width * pixel_ratio,
            device_height: viewport.height * pixel_ratio,
            css_width: viewport.width,
            css_height: viewport.height,
        }
    }

    /// Device pixels per CSS pixel. 1.0 while the surface has no width.
    pub fn pixel_ratio(&self) -> f64 {
        if self.css_width > 0.0 {
            self.device_width / self.css_width
        } else {
            1.0
        }
    }
}

/// Drawing operations a concrete surface must provide.
pub trait SurfaceBackend {
    /// Apply a new backing-store and display size.
    fn set_size(&mut self, size: SurfaceSize);

    /// Erase the whole backing store.
    fn clear(&mut self, size: SurfaceSize);

    /// Stroke a path given in device pixels.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64);

    /// Fill a path given in device pixels.
    fn fill_path(&mut self, path: &BezPath, color: Rgba);

    /// Detach the surface from the host's rendering stack.
    fn remove(&mut self);
}

/// One overlay per lasso engine. Dropped from the rendering stack exactly
/// once, by `destroy`.
pub struct OverlaySurface<B: SurfaceBackend> {
    backend: Option<B>,
    size: SurfaceSize,
}

impl<B: SurfaceBackend> OverlaySurface<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            size: SurfaceSize::default(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn is_destroyed(&self) -> bool {
        self.backend.is_none()
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Track the host viewport. No-op when the host is gone or the surface
    /// was destroyed. Returns whether a resize happened.
    pub fn resize<H: GraphHost + ?Sized>(&mut self, host: &H) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        let Some(viewport) = host.viewport_size() else {
            return false;
        };

        let size = SurfaceSize::for_viewport(viewport, host.pixel_ratio());
        log::debug!(
            "overlay resize {}x{} css, {}x{} device",
            size.css_width,
            size.css_height,
            size.device_width,
            size.device_height
        );
        backend.set_size(size);
        self.size = size;
        true
    }

    pub fn clear(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.clear(self.size);
        }
    }

    /// Stroke and fill the lasso through `polygon` (overlay space, CSS
    /// pixels). Fewer than 2 points draw nothing.
    pub fn draw_polygon(&mut self, polygon: &[Point], style: &SelectionBoxStyle) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let scale = self.size.pixel_ratio();
        let Some(paths) = lasso_paths(polygon, scale) else {
            return;
        };

        let paint = LassoPaint::from_style(style);
        log::trace!("overlay draw {} points @{scale}x", polygon.len());

        if let Some((color, width)) = paint.stroke {
            backend.stroke_path(&paths.outline, color, width * scale);
        }
        backend.fill_path(&paths.region, paint.fill);
    }

    /// Remove the surface. Returns `false` if it was already gone.
    pub fn destroy(&mut self) -> bool {
        match self.backend.take() {
            Some(mut backend) => {
                backend.remove();
                log::debug!("overlay destroyed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingBackend, SurfaceOp};
    use lariat_core::memory::MemoryHost;
    use pretty_assertions::assert_eq;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]
    }

    #[test]
    fn resize_tracks_viewport_and_pixel_ratio() {
        let mut host = MemoryHost::new(400.0, 300.0);
        host.set_pixel_ratio(2.0);
        let mut overlay = OverlaySurface::new(RecordingBackend::default());

        assert!(overlay.resize(&host));
        assert_eq!(
            overlay.size(),
            SurfaceSize {
                device_width: 800.0,
                device_height: 600.0,
                css_width: 400.0,
                css_height: 300.0,
            }
        );
        assert_eq!(overlay.size().pixel_ratio(), 2.0);
    }

    #[test]
    fn resize_is_noop_for_destroyed_host() {
        let mut host = MemoryHost::new(400.0, 300.0);
        host.destroy();
        let mut overlay = OverlaySurface::new(RecordingBackend::default());
        assert!(!overlay.resize(&host));
        assert!(overlay.backend().unwrap().ops().is_empty());
    }

    #[test]
    fn draw_scales_line_width() {
        let mut host = MemoryHost::new(100.0, 100.0);
        host.set_pixel_ratio(2.0);
        let mut overlay = OverlaySurface::new(RecordingBackend::default());
        overlay.resize(&host);
        overlay.draw_polygon(&triangle(), &SelectionBoxStyle::default());

        let ops = overlay.backend().unwrap().ops();
        assert!(matches!(ops[1], SurfaceOp::Stroke { width, points: 3, .. } if width == 2.0));
        assert!(matches!(ops[2], SurfaceOp::Fill { points: 3, closed: true, .. }));
    }

    #[test]
    fn short_polygons_draw_nothing() {
        let mut overlay = OverlaySurface::new(RecordingBackend::default());
        overlay.draw_polygon(&[Point::new(1.0, 1.0)], &SelectionBoxStyle::default());
        assert!(overlay.backend().unwrap().ops().is_empty());
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut overlay = OverlaySurface::new(RecordingBackend::default());
        assert!(overlay.destroy());
        assert!(!overlay.destroy());
        assert!(overlay.is_destroyed());

        // Everything after destroy is inert.
        overlay.clear();
        overlay.draw_polygon(&triangle(), &SelectionBoxStyle::default());
        assert!(!overlay.resize(&MemoryHost::new(10.0, 10.0)));
    }
}
