//! Data model for drag sorting: items, scopes, list entries and ordered lists.

mod item;
mod list;

pub use item::{ElementId, Item, ListEntry, Scope};
pub use list::{OrderedList, SortableList};
