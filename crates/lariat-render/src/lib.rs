pub mod hit;
pub mod overlay;
pub mod paint;
pub mod recording;

pub use overlay::{OverlaySurface, SurfaceBackend, SurfaceSize};
