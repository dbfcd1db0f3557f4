//! Input abstraction layer.
//!
//! Normalizes DOM mouse events into the `InputEvent` enum consumed by the
//! lasso handler. Coordinates are device space (`clientX`, `clientY`).

use lariat_core::model::{Modifiers, PointerSample};
use lariat_core::Point;

/// Primary (usually left) button in the DOM `buttons` bitmask.
pub const PRIMARY_BUTTON: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the host container.
    PointerDown(PointerSample),
    /// Pointer moved anywhere in the document.
    PointerMove(PointerSample),
    /// Pointer released anywhere in the document.
    PointerUp(PointerSample),
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, buttons: u16, modifiers: Modifiers) -> Self {
        Self::PointerDown(sample(x, y, buttons, modifiers))
    }

    pub fn from_pointer_move(x: f64, y: f64, buttons: u16, modifiers: Modifiers) -> Self {
        Self::PointerMove(sample(x, y, buttons, modifiers))
    }

    /// `buttons` is whatever is still held after the release, usually 0.
    pub fn from_pointer_up(x: f64, y: f64, buttons: u16, modifiers: Modifiers) -> Self {
        Self::PointerUp(sample(x, y, buttons, modifiers))
    }

    pub fn sample(&self) -> &PointerSample {
        match self {
            Self::PointerDown(s) | Self::PointerMove(s) | Self::PointerUp(s) => s,
        }
    }

    pub fn position(&self) -> Point {
        self.sample().point
    }

    pub fn modifiers(&self) -> Modifiers {
        self.sample().modifiers
    }
}

fn sample(x: f64, y: f64, buttons: u16, modifiers: Modifiers) -> PointerSample {
    PointerSample {
        point: Point::new(x, y),
        buttons,
        modifiers,
    }
}
