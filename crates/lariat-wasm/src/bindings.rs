//! DOM listener registrations.
//!
//! One `Closure` per target is created up front and lives as long as the
//! handler; attach/detach only add or remove it from the event target, so
//! removal always finds the exact function that was added.

use crate::js;
use crate::shared::{Shared, WebHandler, dispatch};
use lariat_core::model::{Modifiers, PointerSample};
use lariat_core::Point;
use lariat_engine::listeners::{EventBindings, ListenerHandle, ListenerTarget};
use js_sys::Function;
use std::rc::Weak;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, MouseEvent};

type MouseCallback = Closure<dyn FnMut(MouseEvent)>;

pub struct DomBindings {
    cy: JsValue,
    container: HtmlElement,
    document: Document,
    on_resize: Closure<dyn FnMut()>,
    on_mouse_down: MouseCallback,
    on_mouse_move: MouseCallback,
    on_mouse_up: MouseCallback,
    live: Vec<ListenerHandle>,
    next_id: u32,
}

impl DomBindings {
    pub(crate) fn new(
        cy: JsValue,
        container: HtmlElement,
        document: Document,
        shared: Weak<Shared>,
    ) -> Self {
        let on_resize = {
            let shared = shared.clone();
            Closure::<dyn FnMut()>::new(move || {
                dispatch(&shared, None, |handler| handler.on_resize());
            })
        };
        let on_mouse_down = mouse_callback(shared.clone(), |handler, sample| {
            handler.pointer_down(sample);
        });
        let on_mouse_move = mouse_callback(shared.clone(), |handler, sample| {
            handler.pointer_move(sample);
        });
        let on_mouse_up = mouse_callback(shared, |handler, sample| {
            handler.pointer_up(sample);
        });

        Self {
            cy,
            container,
            document,
            on_resize,
            on_mouse_down,
            on_mouse_move,
            on_mouse_up,
            live: Vec::new(),
            next_id: 0,
        }
    }

    fn register(&self, target: ListenerTarget, add: bool) -> Result<(), String> {
        match target {
            ListenerTarget::HostResize => {
                let method = if add { "on" } else { "off" };
                let callback: &JsValue = self.on_resize.as_ref();
                js::call(&self.cy, method, &["resize".into(), callback.clone()]).map(|_| ())
            }
            ListenerTarget::ContainerPointerDown => listen(
                &self.container,
                "mousedown",
                self.on_mouse_down.as_ref().unchecked_ref(),
                add,
            ),
            ListenerTarget::DocumentPointerMove => listen(
                &self.document,
                "mousemove",
                self.on_mouse_move.as_ref().unchecked_ref(),
                add,
            ),
            ListenerTarget::DocumentPointerUp => listen(
                &self.document,
                "mouseup",
                self.on_mouse_up.as_ref().unchecked_ref(),
                add,
            ),
        }
    }
}

fn listen(target: &EventTarget, event: &str, callback: &Function, add: bool) -> Result<(), String> {
    let result = if add {
        target.add_event_listener_with_callback(event, callback)
    } else {
        target.remove_event_listener_with_callback(event, callback)
    };
    result.map_err(|e| js::describe(event, &e))
}

impl EventBindings for DomBindings {
    fn attach(&mut self, target: ListenerTarget) -> ListenerHandle {
        if let Err(err) = self.register(target, true) {
            log::warn!("attach {target:?} failed: {err}");
        }
        let handle = ListenerHandle {
            target,
            id: self.next_id,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.live.push(handle);
        handle
    }

    fn detach(&mut self, handle: ListenerHandle) {
        let before = self.live.len();
        self.live.retain(|h| *h != handle);
        if self.live.len() == before {
            return;
        }
        if let Err(err) = self.register(handle.target, false) {
            log::warn!("detach {:?} failed: {err}", handle.target);
        }
    }
}

fn mouse_callback<F>(shared: Weak<Shared>, mut on_event: F) -> MouseCallback
where
    F: FnMut(&mut WebHandler, PointerSample) + 'static,
{
    Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let sample = pointer_sample(&event);
        dispatch(&shared, Some(&event), |handler| on_event(handler, sample));
    })
}

fn pointer_sample(event: &MouseEvent) -> PointerSample {
    PointerSample {
        point: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        buttons: event.buttons(),
        modifiers: Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
    }
}
