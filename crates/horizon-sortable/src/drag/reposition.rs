//! Repositioning: computing and committing a new arrangement.
//!
//! Given the dragged item and the item it was dragged against, the
//! [`Repositioner`] finds the lists holding each of them (by identity, among
//! the lists of one scope) and rewrites the order:
//!
//! - same list, [`RepositionMode::Swap`]: the two items trade places;
//! - same list, [`RepositionMode::Shift`]: the dragged item is taken out and
//!   put back at the target's index, sliding the items in between by one;
//! - different lists: the dragged item leaves its list and is inserted into
//!   the target's list just before the target.
//!
//! Affected lists receive their new sequence through `set_items`, then every
//! list of the scope is asked to render.

use horizon_sortable_core::logging::{span_names, targets};
use horizon_sortable_core::PerfSpan;

use crate::error::{Result, SortError};
use crate::model::{Item, Scope};
use crate::registry::{ListId, ListRef};

/// How to reorder two items that share a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositionMode {
    /// Exchange the two positions.
    #[default]
    Swap,
    /// Remove the dragged item and reinsert it at the target's index.
    Shift,
}

impl RepositionMode {
    /// Maps the `use_swap` flag to a mode.
    pub fn from_use_swap(use_swap: bool) -> Self {
        if use_swap { Self::Swap } else { Self::Shift }
    }
}

/// A committed reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reposition {
    /// Two items of one list traded places.
    Swapped {
        list: ListId,
        source_index: usize,
        target_index: usize,
    },
    /// The dragged item moved from `from` to `to` within one list.
    Shifted { list: ListId, from: usize, to: usize },
    /// The dragged item moved to another list of the scope.
    Moved {
        from_list: ListId,
        from: usize,
        to_list: ListId,
        to: usize,
    },
}

/// Exchanges the items at `a` and `b`.
pub fn swap_items<T>(items: &mut [Item<T>], a: usize, b: usize) {
    items.swap(a, b);
}

/// Moves the item at `from` so that it ends up at index `to`.
///
/// `to` is an index into the original sequence; the item is removed first and
/// reinserted at `to` in the shortened sequence.
pub fn shift_item<T>(items: &mut Vec<Item<T>>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Moves the item at `from` in `source` to index `to` in `target`.
pub fn move_item<T>(source: &mut Vec<Item<T>>, from: usize, target: &mut Vec<Item<T>>, to: usize) {
    let item = source.remove(from);
    target.insert(to, item);
}

/// Where an item was found: index into the scope's lists, and the snapshot
/// and position inside that list.
struct Located<T> {
    slot: usize,
    items: Vec<Item<T>>,
    index: usize,
}

/// Reorders items among the lists of one scope.
pub struct Repositioner<'a, T> {
    scope: &'a Scope,
    lists: &'a [(ListId, ListRef<T>)],
    mode: RepositionMode,
}

impl<'a, T: 'static> Repositioner<'a, T> {
    /// Creates a repositioner over `lists`, the registered lists of `scope`.
    pub fn new(scope: &'a Scope, lists: &'a [(ListId, ListRef<T>)], mode: RepositionMode) -> Self {
        Self { scope, lists, mode }
    }

    /// Reorders `source` against `target` and commits the result.
    ///
    /// Does nothing when the scope has no lists or either item cannot be found
    /// in them.
    #[tracing::instrument(skip_all, target = "horizon_sortable::reposition", level = "trace", fields(scope = %self.scope, mode = ?self.mode))]
    pub fn reposition(&self, source: &Item<T>, target: &Item<T>) -> Result<Reposition> {
        if self.lists.is_empty() {
            tracing::trace!(target: targets::REPOSITION, "scope has no lists");
            return Err(SortError::no_lists_registered(self.scope));
        }

        let _perf = PerfSpan::new(span_names::REPOSITION);
        let (Some(mut from), Some(mut to)) = (self.locate(source), self.locate(target)) else {
            tracing::trace!(target: targets::REPOSITION, "stale item reference, skipping");
            return Err(SortError::stale_reference(self.scope));
        };

        let outcome = if from.slot == to.slot {
            let (list_id, list) = &self.lists[from.slot];
            let mut items = from.items;
            let outcome = match self.mode {
                RepositionMode::Swap => {
                    swap_items(&mut items, from.index, to.index);
                    Reposition::Swapped {
                        list: *list_id,
                        source_index: from.index,
                        target_index: to.index,
                    }
                }
                RepositionMode::Shift => {
                    shift_item(&mut items, from.index, to.index);
                    Reposition::Shifted {
                        list: *list_id,
                        from: from.index,
                        to: to.index,
                    }
                }
            };
            list.set_items(items);
            outcome
        } else {
            move_item(&mut from.items, from.index, &mut to.items, to.index);
            let (from_id, from_list) = &self.lists[from.slot];
            let (to_id, to_list) = &self.lists[to.slot];
            from_list.set_items(from.items);
            to_list.set_items(to.items);
            Reposition::Moved {
                from_list: *from_id,
                from: from.index,
                to_list: *to_id,
                to: to.index,
            }
        };

        tracing::debug!(target: targets::REPOSITION, ?outcome, "reorder committed");
        self.render_all();
        Ok(outcome)
    }

    fn locate(&self, item: &Item<T>) -> Option<Located<T>> {
        self.lists.iter().enumerate().find_map(|(slot, (_, list))| {
            let items = list.items();
            items
                .iter()
                .position(|candidate| candidate.ptr_eq(item))
                .map(|index| Located { slot, items, index })
        })
    }

    fn render_all(&self) {
        for (_, list) in self.lists {
            list.render();
        }
    }
}
