//! Drag sorting: sessions, hover evaluation, repositioning and the coordinator.
//!
//! Most applications only need [`DragCoordinator`]. The lower-level pieces are
//! public so that custom coordinators and tests can drive them directly.

mod coordinator;
pub mod hover;
pub mod reposition;
mod session;

pub use coordinator::{DragCoordinator, HoverOutcome, SortEnded};
pub use hover::{
    HoverDecision, HoverEvaluation, HoverEvaluator, HoverSkip, MoveDirection, RelativePosition,
    DEAD_ZONE,
};
pub use reposition::{Reposition, RepositionMode, Repositioner};
pub use session::{DragSession, DropAction, PointerEvent, SessionId};
