//! Listener registration.
//!
//! The handler never holds callbacks itself. It asks an `EventBindings`
//! implementation to attach a listener for a target and keeps the returned
//! `ListenerHandle` so removal finds the exact registration again.
//!
//! Two scopes exist per handler:
//! - **standing**: host resize + container pointer-down, for the handler's
//!   whole lifetime
//! - **interaction**: document pointer-move + pointer-up, from pointer-down
//!   until pointer-up, so a drag keeps tracking past the canvas edge

use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Host `resize` notification.
    HostResize,
    /// `mousedown` on the host container.
    ContainerPointerDown,
    /// `mousemove` on the document.
    DocumentPointerMove,
    /// `mouseup` on the document.
    DocumentPointerUp,
}

impl ListenerTarget {
    pub const STANDING: [ListenerTarget; 2] =
        [ListenerTarget::HostResize, ListenerTarget::ContainerPointerDown];

    pub const INTERACTION: [ListenerTarget; 2] = [
        ListenerTarget::DocumentPointerMove,
        ListenerTarget::DocumentPointerUp,
    ];

    pub fn is_document(&self) -> bool {
        matches!(
            self,
            ListenerTarget::DocumentPointerMove | ListenerTarget::DocumentPointerUp
        )
    }
}

/// Stable identity of one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    pub target: ListenerTarget,
    pub id: u32,
}

pub trait EventBindings {
    fn attach(&mut self, target: ListenerTarget) -> ListenerHandle;

    /// Remove a registration. Unknown handles are ignored.
    fn detach(&mut self, handle: ListenerHandle);
}

/// A set of registrations acquired together and released together.
#[derive(Debug, Default)]
pub struct ListenerScope {
    handles: SmallVec<[ListenerHandle; 2]>,
}

impl ListenerScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn acquire<E: EventBindings + ?Sized>(
        &mut self,
        bindings: &mut E,
        targets: &[ListenerTarget],
    ) {
        for &target in targets {
            self.handles.push(bindings.attach(target));
        }
    }

    /// Detach everything held. Returns the number of registrations removed;
    /// releasing an empty scope is a no-op.
    pub fn release<E: EventBindings + ?Sized>(&mut self, bindings: &mut E) -> usize {
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            bindings.detach(handle);
        }
        count
    }
}

// ─── Recording bindings ──────────────────────────────────────────────────

#[derive(Debug, Default)]
struct BindingLog {
    next_id: u32,
    live: Vec<ListenerHandle>,
    attached: HashMap<ListenerTarget, usize>,
    detached: HashMap<ListenerTarget, usize>,
}

/// `EventBindings` that only counts. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBindings {
    log: Rc<RefCell<BindingLog>>,
}

impl RecordingBindings {
    pub fn live(&self) -> Vec<ListenerHandle> {
        self.log.borrow().live.clone()
    }

    pub fn is_live(&self, target: ListenerTarget) -> bool {
        self.log.borrow().live.iter().any(|h| h.target == target)
    }

    pub fn attached(&self, target: ListenerTarget) -> usize {
        self.log.borrow().attached.get(&target).copied().unwrap_or(0)
    }

    pub fn detached(&self, target: ListenerTarget) -> usize {
        self.log.borrow().detached.get(&target).copied().unwrap_or(0)
    }
}

impl EventBindings for RecordingBindings {
    fn attach(&mut self, target: ListenerTarget) -> ListenerHandle {
        let mut log = self.log.borrow_mut();
        let handle = ListenerHandle {
            target,
            id: log.next_id,
        };
        log.next_id += 1;
        log.live.push(handle);
        *log.attached.entry(target).or_default() += 1;
        handle
    }

    fn detach(&mut self, handle: ListenerHandle) {
        let mut log = self.log.borrow_mut();
        let before = log.live.len();
        log.live.retain(|h| *h != handle);
        if log.live.len() < before {
            *log.detached.entry(handle.target).or_default() += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_release_is_symmetric() {
        let mut bindings = RecordingBindings::default();
        let mut scope = ListenerScope::new();
        scope.acquire(&mut bindings, &ListenerTarget::INTERACTION);
        assert_eq!(scope.len(), 2);
        assert!(bindings.is_live(ListenerTarget::DocumentPointerMove));

        assert_eq!(scope.release(&mut bindings), 2);
        assert!(scope.is_empty());
        assert!(bindings.live().is_empty());
        assert_eq!(bindings.attached(ListenerTarget::DocumentPointerUp), 1);
        assert_eq!(bindings.detached(ListenerTarget::DocumentPointerUp), 1);
    }

    #[test]
    fn double_release_is_noop() {
        let mut bindings = RecordingBindings::default();
        let mut scope = ListenerScope::new();
        scope.acquire(&mut bindings, &ListenerTarget::STANDING);
        scope.release(&mut bindings);
        assert_eq!(scope.release(&mut bindings), 0);
        assert_eq!(bindings.detached(ListenerTarget::HostResize), 1);
    }

    #[test]
    fn handles_are_distinct() {
        let mut bindings = RecordingBindings::default();
        let a = bindings.attach(ListenerTarget::DocumentPointerMove);
        let b = bindings.attach(ListenerTarget::DocumentPointerMove);
        assert_ne!(a, b);
        bindings.detach(a);
        bindings.detach(a);
        assert_eq!(bindings.detached(ListenerTarget::DocumentPointerMove), 1);
        assert_eq!(bindings.live(), vec![b]);
    }

    #[test]
    fn document_targets() {
        assert!(ListenerTarget::DocumentPointerUp.is_document());
        assert!(!ListenerTarget::ContainerPointerDown.is_document());
    }
}
