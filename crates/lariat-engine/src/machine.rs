//! Lasso interaction state machine.
//!
//! ```text
//! Idle --arm--> Tracking --activate--> Active --finish--> Idle
//!                  └--------------finish--------------------┘
//! ```
//!
//! The machine only owns the polygon and the saved host flags. Deciding
//! *whether* to arm or activate (modifiers, host state, thresholds) is the
//! handler's job; the machine enforces the ordering and the invariants:
//! Idle holds nothing, Active holds ≥ 2 points plus a flag snapshot, and
//! activation happens at most once per interaction.

use lariat_core::geometry::{Polygon, distance_sq};
use lariat_core::model::HostFlags;
use lariat_core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Tracking,
    Active,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Accumulating points, not yet past the drag threshold.
    Tracking { polygon: Polygon },
    /// Past the threshold; host behavior is suppressed.
    Active { polygon: Polygon, saved: HostFlags },
}

/// Outcome of ending an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Finish {
    /// Nothing was in progress.
    Idle,
    /// Ended while Tracking: a click or a sub-threshold drag.
    Dismissed,
    /// Ended while Active: the polygon to resolve and the flags to restore.
    Completed { polygon: Polygon, saved: HostFlags },
}

#[derive(Debug, Default)]
pub struct LassoMachine {
    state: InteractionState,
}

impl LassoMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            InteractionState::Idle => Phase::Idle,
            InteractionState::Tracking { .. } => Phase::Tracking,
            InteractionState::Active { .. } => Phase::Active,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == Phase::Idle
    }

    pub fn polygon(&self) -> Option<&[Point]> {
        match &self.state {
            InteractionState::Idle => None,
            InteractionState::Tracking { polygon } | InteractionState::Active { polygon, .. } => {
                Some(polygon)
            }
        }
    }

    /// Start a polygon at `point`. Refused unless Idle.
    pub fn arm(&mut self, point: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = InteractionState::Tracking {
            polygon: vec![point],
        };
        true
    }

    /// Append a point. Refused while Idle.
    pub fn push(&mut self, point: Point) -> bool {
        match &mut self.state {
            InteractionState::Idle => false,
            InteractionState::Tracking { polygon } | InteractionState::Active { polygon, .. } => {
                polygon.push(point);
                true
            }
        }
    }

    /// Whether the drag from the first to the latest point reaches
    /// `threshold_sq`. Only meaningful while Tracking.
    pub fn exceeds_threshold(&self, threshold_sq: f64) -> bool {
        let InteractionState::Tracking { polygon } = &self.state else {
            return false;
        };
        match (polygon.first(), polygon.last()) {
            (Some(&first), Some(&last)) if polygon.len() >= 2 => {
                distance_sq(first, last) >= threshold_sq
            }
            _ => false,
        }
    }

    /// Tracking → Active, storing the host flags captured by the caller.
    /// Refused unless Tracking with at least 2 points.
    pub fn activate(&mut self, saved: HostFlags) -> bool {
        let state = std::mem::take(&mut self.state);
        match state {
            InteractionState::Tracking { polygon } if polygon.len() >= 2 => {
                self.state = InteractionState::Active { polygon, saved };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// End the interaction, whatever its phase. Always leaves the machine
    /// Idle.
    pub fn finish(&mut self) -> Finish {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Finish::Idle,
            InteractionState::Tracking { .. } => Finish::Dismissed,
            InteractionState::Active { polygon, saved } => Finish::Completed { polygon, saved },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAVED: HostFlags = HostFlags {
        auto_ungrabify: false,
        user_panning_enabled: true,
        box_selection_enabled: true,
    };

    #[test]
    fn full_lifecycle() {
        let mut m = LassoMachine::new();
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.polygon().is_none());

        assert!(m.arm(Point::new(0.0, 0.0)));
        assert_eq!(m.phase(), Phase::Tracking);
        assert!(m.push(Point::new(3.0, 4.0)));
        assert!(m.exceeds_threshold(25.0));
        assert!(!m.exceeds_threshold(25.1));

        assert!(m.activate(SAVED));
        assert_eq!(m.phase(), Phase::Active);
        assert!(m.push(Point::new(0.0, 4.0)));

        assert_eq!(
            m.finish(),
            Finish::Completed {
                polygon: vec![
                    Point::new(0.0, 0.0),
                    Point::new(3.0, 4.0),
                    Point::new(0.0, 4.0)
                ],
                saved: SAVED,
            }
        );
        assert!(m.is_idle());
        assert!(m.polygon().is_none());
    }

    #[test]
    fn arm_refused_while_in_progress() {
        let mut m = LassoMachine::new();
        m.arm(Point::new(1.0, 1.0));
        assert!(!m.arm(Point::new(9.0, 9.0)));
        assert_eq!(m.polygon(), Some(&[Point::new(1.0, 1.0)][..]));

        m.push(Point::new(20.0, 20.0));
        m.activate(SAVED);
        assert!(!m.arm(Point::new(9.0, 9.0)));
        assert_eq!(m.polygon().map(<[Point]>::len), Some(2));
    }

    #[test]
    fn activation_needs_two_points() {
        let mut m = LassoMachine::new();
        m.arm(Point::new(0.0, 0.0));
        assert!(!m.exceeds_threshold(0.0));
        assert!(!m.activate(SAVED));
        assert_eq!(m.phase(), Phase::Tracking);
    }

    #[test]
    fn activation_happens_once() {
        let mut m = LassoMachine::new();
        m.arm(Point::new(0.0, 0.0));
        m.push(Point::new(10.0, 0.0));
        assert!(m.activate(SAVED));
        assert!(!m.activate(HostFlags::SUPPRESSED));
        assert!(!m.exceeds_threshold(0.0));
        match m.state() {
            InteractionState::Active { saved, .. } => assert_eq!(*saved, SAVED),
            other => panic!("expected Active, got {other:?}"),
        }
    }

    #[test]
    fn threshold_measures_from_first_point() {
        let mut m = LassoMachine::new();
        m.arm(Point::new(0.0, 0.0));
        m.push(Point::new(10.0, 0.0));
        m.push(Point::new(1.0, 0.0));
        // Far excursion came back: only first→last counts.
        assert!(!m.exceeds_threshold(4.0));
    }

    #[test]
    fn finish_from_each_phase() {
        let mut m = LassoMachine::new();
        assert_eq!(m.finish(), Finish::Idle);

        m.arm(Point::new(0.0, 0.0));
        m.push(Point::new(1.0, 0.0));
        assert_eq!(m.finish(), Finish::Dismissed);
        assert!(m.is_idle());
    }

    #[test]
    fn stray_move_while_idle_is_ignored() {
        let mut m = LassoMachine::new();
        assert!(!m.push(Point::new(1.0, 1.0)));
        assert!(m.is_idle());
    }
}
