pub mod config;
pub mod geometry;
pub mod host;
pub mod id;
pub mod memory;
pub mod model;
pub mod transform;

pub use config::{LassoConfig, MultiSelectKeys};
pub use geometry::{Polygon, point_in_polygon};
pub use host::GraphHost;
pub use id::NodeId;
pub use memory::MemoryHost;
pub use model::*;

// Re-export kurbo point types so downstream crates share one geometry type.
pub use kurbo::{Point, Vec2};
