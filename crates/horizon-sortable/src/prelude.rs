//! Convenient re-exports for wiring lists to a coordinator.
//!
//! ```
//! use horizon_sortable::prelude::*;
//! ```

pub use crate::config::{SortConfig, SortSettings};
pub use crate::drag::{DragCoordinator, DropAction, HoverOutcome, PointerEvent, SortEnded};
pub use crate::geometry::{Point, Rect};
pub use crate::model::{ElementId, Item, ListEntry, OrderedList, Scope, SortableList};
pub use crate::registry::{ListId, ListRef};
