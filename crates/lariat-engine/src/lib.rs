//! Lasso interaction engine.
//!
//! Pointer events flow `InputEvent` → `LassoHandler` → (`LassoMachine`,
//! `guard`, `resolver`) → `GraphHost` notifications and overlay drawing.

pub mod extension;
pub mod guard;
pub mod handler;
pub mod input;
pub mod listeners;
pub mod machine;
pub mod resolver;

pub use extension::{Attachable, FeatureToggle};
pub use handler::LassoHandler;
pub use input::InputEvent;
pub use listeners::{EventBindings, ListenerHandle, ListenerTarget};
pub use machine::{InteractionState, Phase};
pub use resolver::Resolution;
