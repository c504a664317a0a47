//! Items, scopes and list entries.
//!
//! An [`Item<T>`] is a shared handle to a payload. Items are compared by
//! identity: two handles are equal only when they point at the same
//! allocation, regardless of whether the payloads compare equal. This lets two
//! lists hold payloads with the same value without the coordinator confusing
//! them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::geometry::Rect;

/// A shared handle to a sortable payload, compared by identity.
pub struct Item<T> {
    inner: Arc<T>,
}

impl<T> Item<T> {
    /// Wraps a payload in a new item with a fresh identity.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Returns true if both handles refer to the same item.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the payload.
    #[inline]
    pub fn get(&self) -> &T {
        &self.inner
    }
}

impl<T> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Item<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> PartialEq for Item<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Item<T> {}

impl<T> Hash for Item<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl<T> From<Arc<T>> for Item<T> {
    fn from(inner: Arc<T>) -> Self {
        Self { inner }
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&*self.inner).finish()
    }
}

/// A named partition of lists that may exchange items during a drag.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Scope(Arc<str>);

impl Scope {
    /// Name of the scope lists join when none is given.
    pub const DEFAULT_NAME: &'static str = "drag-objects";

    /// Creates a scope with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the scope name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({:?})", &*self.0)
    }
}

/// Identity of a rendered element.
///
/// Pointer events carry the id of the element directly under the pointer; list
/// entries carry the id of the element that renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocates a new, process-unique element id.
    pub fn new() -> Self {
        next_element_id()
    }

    /// Get the raw u64 value of this element ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_element_id() -> ElementId {
    ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// A rendered list entry: an item, the scope its list belongs to, and a
/// snapshot of the element rendering it.
pub struct ListEntry<T> {
    /// The item being rendered.
    pub item: Item<T>,
    /// Scope of the owning list.
    pub scope: Scope,
    /// The element rendering the item.
    pub element: ElementId,
    /// Bounding box of the element, in client coordinates.
    pub bounds: Rect,
}

impl<T> ListEntry<T> {
    /// Creates an entry with empty bounds.
    pub fn new(item: Item<T>, scope: impl Into<Scope>, element: ElementId) -> Self {
        Self {
            item,
            scope: scope.into(),
            element,
            bounds: Rect::ZERO,
        }
    }

    /// Returns the entry with the given bounding box.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }
}

impl<T> Clone for ListEntry<T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            scope: self.scope.clone(),
            element: self.element,
            bounds: self.bounds,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ListEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEntry")
            .field("item", &self.item)
            .field("scope", &self.scope)
            .field("element", &self.element)
            .field("bounds", &self.bounds)
            .finish()
    }
}
