//! Lasso handler: binds the state machine to a host, an overlay, and
//! listener registrations.
//!
//! All methods run synchronously on the host's input event sequence. Once
//! `destroy` has run, every method is inert.

use crate::guard;
use crate::input::{InputEvent, PRIMARY_BUTTON};
use crate::listeners::{EventBindings, ListenerScope, ListenerTarget};
use crate::machine::{Finish, InteractionState, LassoMachine, Phase};
use crate::resolver::{Resolution, resolve_selection};
use lariat_core::config::LassoConfig;
use lariat_core::host::GraphHost;
use lariat_core::model::{BoxEvent, Modifiers, PointerSample};
use lariat_core::transform::{to_graph_coords, to_overlay_polygon};
use lariat_core::Point;
use lariat_render::overlay::{OverlaySurface, SurfaceBackend};

pub struct LassoHandler<H: GraphHost, B: SurfaceBackend, E: EventBindings> {
    host: Option<H>,
    overlay: OverlaySurface<B>,
    bindings: E,
    config: LassoConfig,
    machine: LassoMachine,
    /// Host resize + container pointer-down, for the handler's lifetime.
    standing: ListenerScope,
    /// Document move/up, for the current interaction only.
    interaction: ListenerScope,
}

impl<H: GraphHost, B: SurfaceBackend, E: EventBindings> LassoHandler<H, B, E> {
    /// Attach a lasso to `host`: size the overlay and start listening for
    /// resizes and container pointer-downs.
    pub fn new(host: H, backend: B, bindings: E, config: LassoConfig) -> Self {
        let mut handler = Self {
            host: Some(host),
            overlay: OverlaySurface::new(backend),
            bindings,
            config,
            machine: LassoMachine::new(),
            standing: ListenerScope::new(),
            interaction: ListenerScope::new(),
        };
        if let Some(host) = handler.host.as_ref() {
            handler.overlay.resize(host);
        }
        handler
            .standing
            .acquire(&mut handler.bindings, &ListenerTarget::STANDING);
        log::debug!("lasso handler attached");
        handler
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn overlay(&self) -> &OverlaySurface<B> {
        &self.overlay
    }

    pub fn bindings(&self) -> &E {
        &self.bindings
    }

    pub fn config(&self) -> &LassoConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn state(&self) -> &InteractionState {
        self.machine.state()
    }

    /// The polygon in device space, if an interaction is in progress.
    pub fn polygon(&self) -> Option<&[Point]> {
        self.machine.polygon()
    }

    pub fn is_destroyed(&self) -> bool {
        self.host.is_none()
    }

    // ─── Event entry points ──────────────────────────────────────────────

    /// Dispatch a normalized input event. Returns whether it changed the
    /// interaction state.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown(sample) => self.pointer_down(sample),
            InputEvent::PointerMove(sample) => self.pointer_move(sample),
            InputEvent::PointerUp(sample) => {
                let before = self.phase();
                self.pointer_up(sample);
                before != Phase::Idle
            }
        }
    }

    /// Host resized: keep the overlay in step.
    pub fn on_resize(&mut self) {
        if let Some(host) = self.host.as_ref() {
            self.overlay.resize(host);
        }
    }

    /// Pointer pressed on the container. Arms the machine if the lasso
    /// gesture is available; returns whether it did.
    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        let Some(host) = self.host.as_ref() else {
            return false;
        };
        if !self.machine.is_idle() {
            log::trace!("pointer-down ignored: interaction already in progress");
            return false;
        }
        if !arming_allowed(&self.config, host, &sample.modifiers) {
            return false;
        }

        self.machine.arm(sample.point);
        self.interaction
            .acquire(&mut self.bindings, &ListenerTarget::INTERACTION);
        log::debug!(
            "lasso armed at ({}, {})",
            sample.point.x,
            sample.point.y
        );
        true
    }

    /// Pointer moved while armed. Extends the polygon, activates once past
    /// the drag threshold, and redraws the overlay. Returns whether the
    /// sample was consumed.
    pub fn pointer_move(&mut self, sample: PointerSample) -> bool {
        let Some(host) = self.host.as_mut() else {
            return false;
        };
        if !self.machine.push(sample.point) {
            return false;
        }
        log::trace!("lasso point ({}, {})", sample.point.x, sample.point.y);

        if self.machine.phase() == Phase::Tracking
            && self.machine.exceeds_threshold(host.tap_threshold_sq())
            && activation_allowed(&self.config, &*host, &sample)
        {
            let saved = guard::suppress(host);
            self.machine.activate(saved);

            host.suppress_mousedown_hint();
            host.request_redraw();

            let position = to_graph_coords(&*host, sample.point);
            host.emit(BoxEvent::Start {
                position,
                origin: sample,
            });
            log::debug!("lasso activated at graph ({}, {})", position.x, position.y);
        }

        redraw_overlay(&*host, &self.machine, &mut self.overlay);
        true
    }

    /// Pointer released. Always detaches the document listeners and leaves
    /// the handler Idle. Returns the selection outcome if the lasso was
    /// active.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Option<Resolution> {
        self.interaction.release(&mut self.bindings);
        let finish = self.machine.finish();
        let host = self.host.as_mut()?;

        match finish {
            Finish::Idle => None,
            Finish::Dismissed => {
                log::debug!("lasso dismissed below drag threshold");
                None
            }
            Finish::Completed { polygon, saved } => {
                let multi_select = self.config.is_multi_select(&sample.modifiers);
                let resolution = resolve_selection(host, &polygon, multi_select);

                redraw_overlay(&*host, &self.machine, &mut self.overlay);
                guard::restore(host, saved);
                host.mark_dragged();

                let position = to_graph_coords(&*host, sample.point);
                host.emit(BoxEvent::End {
                    position,
                    origin: sample,
                });
                Some(resolution)
            }
        }
    }

    /// Detach from the host: drop all listeners and the overlay. An
    /// interaction still in progress is abandoned with the host flags
    /// restored. Idempotent; returns the host on the first call.
    pub fn destroy(&mut self) -> Option<H> {
        if let Finish::Completed { saved, .. } = self.machine.finish()
            && let Some(host) = self.host.as_mut()
        {
            log::debug!("lasso destroyed mid-interaction");
            guard::restore(host, saved);
        }

        self.interaction.release(&mut self.bindings);
        self.standing.release(&mut self.bindings);
        self.overlay.destroy();

        let host = self.host.take();
        if host.is_some() {
            log::debug!("lasso handler detached");
        }
        host
    }
}

/// Pointer-down may start a lasso: a multi-select modifier is held, or the
/// host would not pan on a background drag anyway, and no other exclusive
/// mode owns the pointer.
fn arming_allowed<H: GraphHost + ?Sized>(
    config: &LassoConfig,
    host: &H,
    modifiers: &Modifiers,
) -> bool {
    let wants_lasso = config.is_multi_select(modifiers)
        || !host.panning_enabled()
        || !host.user_panning_enabled();
    wants_lasso && !host.competing_mode_engaged()
}

/// Extra conditions checked on the activating move: the primary button is
/// the one held, and the host is not already dragging grabbed elements
/// unless the user asked for multi-select.
fn activation_allowed<H: GraphHost + ?Sized>(
    config: &LassoConfig,
    host: &H,
    sample: &PointerSample,
) -> bool {
    if config.require_primary_button && sample.buttons != PRIMARY_BUTTON {
        return false;
    }
    if host.element_drag_in_progress() && !config.is_multi_select(&sample.modifiers) {
        return false;
    }
    !host.competing_mode_engaged()
}

/// Clear the overlay and, while Active, draw the lasso path.
fn redraw_overlay<H: GraphHost + ?Sized, B: SurfaceBackend>(
    host: &H,
    machine: &LassoMachine,
    overlay: &mut OverlaySurface<B>,
) {
    overlay.clear();
    if let InteractionState::Active { polygon, .. } = machine.state() {
        let points = to_overlay_polygon(host, polygon);
        overlay.draw_polygon(&points, &host.selection_box_style());
    }
}
