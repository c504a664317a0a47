//! Ordered lists that take part in drag sorting.
//!
//! The coordinator never mutates a list in place. It reads a snapshot with
//! [`OrderedList::items`], computes the new arrangement, and hands the whole
//! sequence back through [`OrderedList::set_items`]. [`OrderedList::render`]
//! is then called on every list of the scope.

use parking_lot::RwLock;

use horizon_sortable_core::Signal;

use super::item::{Item, Scope};

/// A list whose item order the drag coordinator may rewrite.
///
/// Implementations must keep item identities unique within the list.
pub trait OrderedList<T>: Send + Sync {
    /// The scope this list sorts within. Must not change while registered.
    fn scope(&self) -> Scope;

    /// Returns a snapshot of the current item order.
    fn items(&self) -> Vec<Item<T>>;

    /// Replaces the whole item sequence.
    fn set_items(&self, items: Vec<Item<T>>);

    /// Asks the list to refresh its visual representation.
    fn render(&self);

    /// Returns the index of `item`, compared by identity.
    fn position_of(&self, item: &Item<T>) -> Option<usize> {
        self.items().iter().position(|candidate| candidate.ptr_eq(item))
    }

    /// Returns true if `item` is in this list.
    fn contains(&self, item: &Item<T>) -> bool {
        self.position_of(item).is_some()
    }
}

/// An in-memory [`OrderedList`] with change and render signals.
///
/// # Example
///
/// ```
/// use horizon_sortable::model::{OrderedList, SortableList};
///
/// let list = SortableList::from_values("todo", ["write", "review", "ship"]);
/// list.render_requested().connect(|_| println!("repaint"));
///
/// let mut items = list.items();
/// items.swap(0, 2);
/// list.set_items(items);
/// assert_eq!(*list.items()[0], "ship");
/// ```
pub struct SortableList<T> {
    scope: Scope,
    items: RwLock<Vec<Item<T>>>,
    items_changed: Signal<()>,
    render_requested: Signal<()>,
}

impl<T: Send + Sync + 'static> SortableList<T> {
    /// Creates a list in `scope` holding the given items.
    pub fn new(scope: impl Into<Scope>, items: impl IntoIterator<Item = Item<T>>) -> Self {
        Self {
            scope: scope.into(),
            items: RwLock::new(items.into_iter().collect()),
            items_changed: Signal::new(),
            render_requested: Signal::new(),
        }
    }

    /// Creates a list in `scope`, wrapping each value in a new item.
    pub fn from_values(scope: impl Into<Scope>, values: impl IntoIterator<Item = T>) -> Self {
        Self::new(scope, values.into_iter().map(Item::new))
    }

    /// Returns the number of items in the list.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<Item<T>> {
        self.items.read().get(index).cloned()
    }

    /// Emitted after [`OrderedList::set_items`] replaced the sequence.
    pub fn items_changed(&self) -> &Signal<()> {
        &self.items_changed
    }

    /// Emitted by [`OrderedList::render`].
    pub fn render_requested(&self) -> &Signal<()> {
        &self.render_requested
    }
}

impl<T: Send + Sync + 'static> OrderedList<T> for SortableList<T> {
    fn scope(&self) -> Scope {
        self.scope.clone()
    }

    fn items(&self) -> Vec<Item<T>> {
        self.items.read().clone()
    }

    fn set_items(&self, items: Vec<Item<T>>) {
        *self.items.write() = items;
        self.items_changed.emit(());
    }

    fn render(&self) {
        self.render_requested.emit(());
    }

    fn position_of(&self, item: &Item<T>) -> Option<usize> {
        self.items
            .read()
            .iter()
            .position(|candidate| candidate.ptr_eq(item))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SortableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableList")
            .field("scope", &self.scope)
            .field("items", &*self.items.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(SortableList<String>: Send, Sync);
