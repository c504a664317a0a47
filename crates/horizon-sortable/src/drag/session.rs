//! Drag session state.
//!
//! A [`DragSession`] exists from drag start to drag end. It remembers what is
//! being dragged, where the drag started, the last pointer event seen, and the
//! last item a reorder fired against.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Point;
use crate::model::{ElementId, Item, ListEntry, Scope};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one drag session, so state changes can be applied only to the
/// session they were computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A snapshot of a pointer event: client position plus the element under the
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client coordinates.
    pub position: Point,
    /// The element directly under the pointer.
    pub target: ElementId,
}

impl PointerEvent {
    /// Creates a pointer event at `(x, y)` over `target`.
    pub fn new(x: f32, y: f32, target: ElementId) -> Self {
        Self {
            position: Point::new(x, y),
            target,
        }
    }

    /// Horizontal client coordinate.
    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Vertical client coordinate.
    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }
}

/// Actions a drag source advertises to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DropAction(u8);

impl DropAction {
    /// No action (drop not allowed).
    pub const NONE: Self = Self(0);
    /// Move the data; sortable drags always advertise this.
    pub const MOVE: Self = Self(1 << 1);

    /// Returns true if this action set contains another action.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// State of one in-progress drag.
pub struct DragSession<T> {
    id: SessionId,
    source: ListEntry<T>,
    source_event: PointerEvent,
    last_event: PointerEvent,
    displaced: Option<Item<T>>,
}

impl<T> DragSession<T> {
    /// Starts a session for `source`, picked up with `event`.
    pub fn new(source: ListEntry<T>, event: PointerEvent) -> Self {
        Self {
            id: SessionId::next(),
            source,
            source_event: event,
            last_event: event,
            displaced: None,
        }
    }

    /// Identity of this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The entry being dragged.
    pub fn source(&self) -> &ListEntry<T> {
        &self.source
    }

    /// The item being dragged.
    pub fn source_item(&self) -> &Item<T> {
        &self.source.item
    }

    /// Scope of the dragged item.
    pub fn scope(&self) -> &Scope {
        &self.source.scope
    }

    /// The pointer event that started the drag.
    pub fn source_event(&self) -> &PointerEvent {
        &self.source_event
    }

    /// The most recent pointer event.
    pub fn last_event(&self) -> &PointerEvent {
        &self.last_event
    }

    /// The last item a reorder fired against.
    pub fn displaced(&self) -> Option<&Item<T>> {
        self.displaced.as_ref()
    }

    /// Returns true if `item` is the displaced item.
    pub fn is_displaced(&self, item: &Item<T>) -> bool {
        self.displaced
            .as_ref()
            .is_some_and(|displaced| displaced.ptr_eq(item))
    }

    /// Records `event` as the latest one, returning the one it replaces.
    pub(crate) fn record_event(&mut self, event: PointerEvent) -> PointerEvent {
        std::mem::replace(&mut self.last_event, event)
    }

    pub(crate) fn set_displaced(&mut self, item: Option<Item<T>>) {
        self.displaced = item;
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DragSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSession")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("source_event", &self.source_event)
            .field("last_event", &self.last_event)
            .field("displaced", &self.displaced)
            .finish()
    }
}
