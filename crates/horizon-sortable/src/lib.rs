//! Horizon Sortable: live drag-and-drop reordering across scoped lists.
//!
//! Lists that should exchange items during a drag join the same [`Scope`]. As
//! the pointer passes over entries, the [`DragCoordinator`] decides, tick by
//! tick, whether the dragged item should trade places with the hovered one,
//! slide into its position, or move over into the hovered entry's list. The
//! new order is written back to the lists immediately, before the drag ends.
//!
//! - **Model** ([`model`]): identity-compared [`Item`]s, [`ListEntry`]
//!   snapshots, and the [`OrderedList`] trait with its [`SortableList`]
//!   implementation
//! - **Registry** ([`registry`]): which lists belong to which scope
//! - **Drag** ([`drag`]): session state, hover evaluation, repositioning
//! - **Configuration** ([`config`]): live `enable_sort` / `use_swap` flags
//!
//! Rendering and pointer input stay outside: the coordinator consumes pointer
//! positions, element ids and bounding boxes, and asks lists to render through
//! [`OrderedList::render`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_sortable::prelude::*;
//!
//! let config = Arc::new(SortConfig::new().with_swap(false));
//! let coordinator = DragCoordinator::<String>::new(config);
//!
//! let todo = Arc::new(SortableList::from_values("board", ["plan".to_string()]));
//! let done = Arc::new(SortableList::from_values("board", ["ship".to_string()]));
//! coordinator.join(todo.clone());
//! coordinator.join(done.clone());
//!
//! let (plan_el, ship_el) = (ElementId::new(), ElementId::new());
//! let plan = ListEntry::new(todo.items()[0].clone(), "board", plan_el)
//!     .with_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));
//! let ship = ListEntry::new(done.items()[0].clone(), "board", ship_el)
//!     .with_bounds(Rect::new(220.0, 0.0, 200.0, 40.0));
//!
//! coordinator.start_drag(plan, PointerEvent::new(100.0, 10.0, plan_el));
//! let outcome = coordinator.hover(PointerEvent::new(300.0, 30.0, ship_el), &ship);
//! coordinator.end_drag();
//!
//! assert!(outcome.is_repositioned());
//! assert!(todo.is_empty());
//! assert_eq!(done.len(), 2);
//! ```

pub mod config;
pub mod drag;
mod error;
pub mod geometry;
pub mod model;
pub mod prelude;
pub mod registry;

pub use config::{SortConfig, SortSetting, SortSettings};
pub use drag::{DragCoordinator, DropAction, HoverOutcome, PointerEvent, SortEnded};
pub use error::{Result, SortError};
pub use model::{ElementId, Item, ListEntry, OrderedList, Scope, SortableList};
pub use registry::{ListId, ListRef, ScopeRegistry};

pub use horizon_sortable_core::{ConnectionId, Property, Signal};
