//! Hover evaluation: deciding, tick by tick, whether a reorder fires.
//!
//! Each hover tick is evaluated from three things: where the pointer sits
//! inside the hovered entry's bounding box, which way the pointer moved since
//! the previous tick, and what the session already did. A reorder fires only
//! when all of the following hold:
//!
//! 1. no reorder is currently being committed,
//! 2. the element under the pointer is not the element the drag started on,
//! 3. the hovered entry shares the dragged item's scope,
//! 4. the hovered item is not the item the last reorder fired against,
//! 5. the pointer is below the leading third of the entry ([`DEAD_ZONE`]) and
//!    moved up or down since the previous tick.
//!
//! The threshold and the strict comparisons are tuned UI behavior and are kept
//! exactly as they are.

use crate::geometry::{Point, Rect};
use crate::model::ListEntry;

use super::session::{DragSession, PointerEvent};

/// Fraction of an entry's height, measured from its top, in which hovering
/// never triggers a reorder.
pub const DEAD_ZONE: f32 = 0.33;

/// Pointer position relative to an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePosition {
    /// Horizontal offset from the left edge, in pixels.
    pub x: f32,
    /// Vertical offset from the top edge, in pixels.
    pub y: f32,
    /// Horizontal offset as a fraction of the width.
    pub px: f32,
    /// Vertical offset as a fraction of the height.
    pub py: f32,
}

impl RelativePosition {
    /// Locates `point` inside `bounds`.
    ///
    /// Fractions outside `[0, 1]` are kept as they are; they show up when the
    /// element moved since its bounds were measured.
    pub fn new(point: Point, bounds: Rect) -> Self {
        let x = point.x - bounds.left();
        let y = point.y - bounds.top();
        Self {
            x,
            y,
            px: x / bounds.width(),
            py: y / bounds.height(),
        }
    }

    /// Returns true if the pointer is past the dead zone.
    pub fn past_dead_zone(&self) -> bool {
        self.py > DEAD_ZONE
    }
}

/// Vertical pointer movement between two consecutive hover ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// The pointer moved towards the top of the viewport.
    Up,
    /// The pointer moved towards the bottom of the viewport.
    Down,
    /// The pointer's vertical position did not change.
    Still,
}

impl MoveDirection {
    /// Direction of travel from `previous_y` to `current_y`.
    pub fn between(previous_y: f32, current_y: f32) -> Self {
        if current_y < previous_y {
            Self::Up
        } else if current_y > previous_y {
            Self::Down
        } else {
            Self::Still
        }
    }

    /// Returns true for `Up` and `Down`.
    pub fn is_moving(self) -> bool {
        !matches!(self, Self::Still)
    }
}

/// Why a hover tick held still instead of reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverSkip {
    /// The pointer is over the element the drag started on.
    SelfHover,
    /// The hovered entry belongs to another scope.
    ForeignScope,
    /// The hovered item is the one the last reorder fired against.
    AlreadyDisplaced,
    /// The pointer is inside the hovered entry's dead zone.
    DeadZone,
    /// The pointer did not move vertically since the previous tick.
    NoMovement,
}

/// Outcome of evaluating one hover tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverDecision {
    /// Reorder the dragged item against the hovered item.
    Trigger,
    /// Do nothing this tick.
    Hold(HoverSkip),
    /// A reorder is being committed; the tick is dropped.
    Suppressed,
}

/// Full evaluation of a hover tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEvaluation {
    /// Pointer position inside the hovered entry.
    pub position: RelativePosition,
    /// Movement since the previous tick.
    pub direction: MoveDirection,
    /// What to do.
    pub decision: HoverDecision,
}

/// Decides whether a hover tick triggers a reorder.
pub struct HoverEvaluator;

impl HoverEvaluator {
    /// Evaluates one tick against `session`.
    ///
    /// The session's last event is replaced by `event` in every case, so the
    /// next tick measures movement from this one. When the pointer is over the
    /// drag source itself or over a foreign scope, the displaced item is
    /// cleared, since the element under the pointer has moved with the last
    /// reorder. `Trigger` leaves the displaced item alone: the caller records
    /// it once the reorder has been committed.
    pub fn evaluate<T>(
        session: &mut DragSession<T>,
        event: PointerEvent,
        target: &ListEntry<T>,
        moving: bool,
    ) -> HoverEvaluation {
        let position = RelativePosition::new(event.position, target.bounds);
        let previous = session.record_event(event);
        let direction = MoveDirection::between(previous.y(), event.y());

        let decision = if moving {
            HoverDecision::Suppressed
        } else if event.target == session.source_event().target {
            session.set_displaced(None);
            HoverDecision::Hold(HoverSkip::SelfHover)
        } else if target.scope != *session.scope() {
            session.set_displaced(None);
            HoverDecision::Hold(HoverSkip::ForeignScope)
        } else if session.is_displaced(&target.item) {
            HoverDecision::Hold(HoverSkip::AlreadyDisplaced)
        } else if !position.past_dead_zone() {
            HoverDecision::Hold(HoverSkip::DeadZone)
        } else if !direction.is_moving() {
            HoverDecision::Hold(HoverSkip::NoMovement)
        } else {
            HoverDecision::Trigger
        };

        HoverEvaluation {
            position,
            direction,
            decision,
        }
    }
}
