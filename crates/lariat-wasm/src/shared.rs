//! The browser-side handler and its shared ownership.
//!
//! DOM callbacks hold only a `Weak` to the handler. Dispatch is skipped if
//! the handler is gone or already borrowed (an application listener reacting
//! to a lasso notification re-entered us); a destroy requested during
//! dispatch runs once the current event is done.

use crate::bindings::DomBindings;
use crate::canvas::CanvasSurface;
use crate::cy_host::CyHost;
use lariat_core::config::LassoConfig;
use lariat_engine::{Attachable, LassoHandler, Phase};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;
use web_sys::MouseEvent;

pub(crate) type WebHandler = LassoHandler<CyHost, CanvasSurface, DomBindings>;

pub(crate) struct Shared {
    handler: RefCell<WebHandler>,
    destroy_pending: Cell<bool>,
}

/// Build a handler for `cy` and attach it.
pub(crate) fn attach(cy: &JsValue, config: &LassoConfig) -> Result<SharedHandler, String> {
    let host = CyHost::new(cy.clone(), config.competing_selector.clone())?;
    let container = host.container()?;
    let document = container
        .owner_document()
        .ok_or("graph container is not in a document")?;
    let surface = CanvasSurface::attach(&container, &config.layer_id, &config.anchor_layer_id)?;
    let config = config.clone();

    let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
        let bindings = DomBindings::new(host.core().clone(), container, document, weak.clone());
        Shared {
            handler: RefCell::new(LassoHandler::new(host, surface, bindings, config)),
            destroy_pending: Cell::new(false),
        }
    });
    Ok(SharedHandler(shared))
}

/// Run `f` against the handler behind `weak`, with `event` exposed to the
/// host as the originating DOM event.
pub(crate) fn dispatch<F>(weak: &Weak<Shared>, event: Option<&MouseEvent>, f: F)
where
    F: FnOnce(&mut WebHandler),
{
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut handler) = shared.handler.try_borrow_mut() else {
        log::warn!("re-entrant lasso event dropped");
        return;
    };

    if let Some(host) = handler.host_mut() {
        host.set_current_event(event.cloned());
    }
    f(&mut *handler);
    if let Some(host) = handler.host_mut() {
        host.set_current_event(None);
    }

    if shared.destroy_pending.replace(false) {
        handler.destroy();
    }
}

pub(crate) struct SharedHandler(Rc<Shared>);

impl SharedHandler {
    pub(crate) fn phase(&self) -> Option<Phase> {
        self.0.handler.try_borrow().ok().map(|h| h.phase())
    }
}

impl Attachable for SharedHandler {
    fn detach(&mut self) {
        match self.0.handler.try_borrow_mut() {
            Ok(mut handler) => {
                handler.destroy();
            }
            Err(_) => {
                log::debug!("lasso handler busy; destroying after the current event");
                self.0.destroy_pending.set(true);
            }
        }
    }
}
