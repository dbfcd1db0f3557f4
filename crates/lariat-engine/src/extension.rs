//! Boolean feature toggle.
//!
//! Enabling builds a handler and attaches it to the host; disabling
//! destroys it. Repeating the current state is a no-op, so the toggle can be
//! driven straight from an application setting.

use crate::handler::LassoHandler;
use crate::listeners::EventBindings;
use lariat_core::host::GraphHost;
use lariat_render::overlay::SurfaceBackend;

/// Something that holds host resources until explicitly detached.
pub trait Attachable {
    fn detach(&mut self);
}

impl<H: GraphHost, B: SurfaceBackend, E: EventBindings> Attachable for LassoHandler<H, B, E> {
    fn detach(&mut self) {
        self.destroy();
    }
}

pub struct FeatureToggle<T: Attachable> {
    instance: Option<T>,
}

impl<T: Attachable> Default for FeatureToggle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Attachable> FeatureToggle<T> {
    pub fn new() -> Self {
        Self { instance: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.instance.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.instance.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.instance.as_mut()
    }

    /// Switch the feature on or off. `build` runs only when turning on from
    /// off. Returns whether the state changed.
    ///
    /// # Errors
    /// Propagates the `build` error; the toggle stays off.
    pub fn set_enabled<F>(&mut self, enabled: bool, build: F) -> Result<bool, String>
    where
        F: FnOnce() -> Result<T, String>,
    {
        match (enabled, self.instance.is_some()) {
            (true, false) => {
                self.instance = Some(build()?);
                log::debug!("lasso selection enabled");
                Ok(true)
            }
            (false, true) => {
                if let Some(mut instance) = self.instance.take() {
                    instance.detach();
                }
                log::debug!("lasso selection disabled");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl<T: Attachable> Drop for FeatureToggle<T> {
    fn drop(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Probe(Rc<Cell<usize>>);

    impl Attachable for Probe {
        fn detach(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn toggle_builds_once_and_detaches_once() {
        let detaches = Rc::new(Cell::new(0));
        let builds = Cell::new(0);
        let mut toggle = FeatureToggle::new();

        let build = || {
            builds.set(builds.get() + 1);
            Ok(Probe(detaches.clone()))
        };
        assert_eq!(toggle.set_enabled(true, build), Ok(true));
        assert_eq!(toggle.set_enabled(true, || unreachable!()), Ok(false));
        assert!(toggle.is_enabled());
        assert_eq!(builds.get(), 1);

        assert_eq!(toggle.set_enabled(false, || unreachable!()), Ok(true));
        assert_eq!(toggle.set_enabled(false, || unreachable!()), Ok(false));
        assert!(!toggle.is_enabled());
        assert_eq!(detaches.get(), 1);
    }

    #[test]
    fn failed_build_leaves_toggle_off() {
        let mut toggle: FeatureToggle<Probe> = FeatureToggle::new();
        let err = toggle
            .set_enabled(true, || Err("no container".to_string()))
            .unwrap_err();
        assert_eq!(err, "no container");
        assert!(!toggle.is_enabled());
    }

    #[test]
    fn drop_detaches() {
        let detaches = Rc::new(Cell::new(0));
        {
            let mut toggle = FeatureToggle::new();
            toggle
                .set_enabled(true, || Ok(Probe(detaches.clone())))
                .unwrap();
        }
        assert_eq!(detaches.get(), 1);
    }
}
