//! Scope registry: which lists sort together.
//!
//! Lists join the registry under the scope they report, and leave it again by
//! identity. Within a scope, lists keep their join order; that order is the
//! order in which items are searched for and in which lists are re-rendered.

use std::collections::HashMap;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use horizon_sortable_core::logging::targets;

use crate::model::{OrderedList, Scope};

new_key_type! {
    /// Handle for a list registered with a [`ScopeRegistry`].
    pub struct ListId;
}

/// Shared handle to a registered list.
pub type ListRef<T> = Arc<dyn OrderedList<T>>;

/// Mapping from scope to the ordered set of lists registered under it.
pub struct ScopeRegistry<T> {
    lists: SlotMap<ListId, ListRef<T>>,
    scopes: HashMap<Scope, Vec<ListId>>,
}

impl<T: 'static> Default for ScopeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ScopeRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            lists: SlotMap::with_key(),
            scopes: HashMap::new(),
        }
    }

    /// Registers `list` under its scope.
    ///
    /// Joining an instance that is already registered returns its existing id.
    pub fn join(&mut self, list: ListRef<T>) -> ListId {
        if let Some(id) = self.id_of(&list) {
            return id;
        }

        let scope = list.scope();
        let id = self.lists.insert(list);
        let members = self.scopes.entry(scope.clone()).or_default();
        members.push(id);
        tracing::debug!(target: targets::REGISTRY, %scope, lists = members.len(), "list joined scope");
        id
    }

    /// Removes exactly this list instance, wherever it is registered.
    ///
    /// Returns `false` if the instance was not registered.
    pub fn leave(&mut self, list: &ListRef<T>) -> bool {
        match self.id_of(list) {
            Some(id) => self.leave_id(id).is_some(),
            None => false,
        }
    }

    /// Removes the list registered under `id`, returning it.
    pub fn leave_id(&mut self, id: ListId) -> Option<ListRef<T>> {
        let list = self.lists.remove(id)?;
        let mut emptied = None;
        for (scope, members) in &mut self.scopes {
            if let Some(index) = members.iter().position(|member| *member == id) {
                members.remove(index);
                tracing::debug!(target: targets::REGISTRY, %scope, lists = members.len(), "list left scope");
                if members.is_empty() {
                    emptied = Some(scope.clone());
                }
                break;
            }
        }
        if let Some(scope) = emptied {
            self.scopes.remove(&scope);
        }
        Some(list)
    }

    /// Returns the id of a registered list instance.
    pub fn id_of(&self, list: &ListRef<T>) -> Option<ListId> {
        self.lists
            .iter()
            .find(|(_, registered)| Arc::ptr_eq(registered, list))
            .map(|(id, _)| id)
    }

    /// Returns the list registered under `id`.
    pub fn get(&self, id: ListId) -> Option<&ListRef<T>> {
        self.lists.get(id)
    }

    /// Returns the lists of `scope`, in join order, with their ids.
    pub fn entries_in(&self, scope: &Scope) -> Vec<(ListId, ListRef<T>)> {
        self.scopes
            .get(scope)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.lists.get(*id).map(|list| (*id, Arc::clone(list))))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the lists of `scope`, in join order.
    pub fn lists_in(&self, scope: &Scope) -> Vec<ListRef<T>> {
        self.entries_in(scope)
            .into_iter()
            .map(|(_, list)| list)
            .collect()
    }

    /// Number of lists registered under `scope`.
    pub fn scope_len(&self, scope: &Scope) -> usize {
        self.scopes.get(scope).map_or(0, Vec::len)
    }

    /// Scopes that currently have at least one list.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.keys()
    }

    /// Total number of registered lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if no list is registered.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<T> std::fmt::Debug for ScopeRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("lists", &self.lists.len())
            .field("scopes", &self.scopes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortableList;

    fn list(scope: &str, values: &[u32]) -> ListRef<u32> {
        Arc::new(SortableList::from_values(scope, values.iter().copied()))
    }

    #[test]
    fn test_join_groups_by_scope() {
        let mut registry = ScopeRegistry::new();
        let a = list("S", &[1]);
        let b = list("S", &[2]);
        let c = list("T", &[3]);

        let a_id = registry.join(a.clone());
        let b_id = registry.join(b.clone());
        registry.join(c);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.scope_len(&Scope::new("S")), 2);
        assert_eq!(registry.scope_len(&Scope::new("T")), 1);
        assert_eq!(registry.scope_len(&Scope::new("U")), 0);

        let ids: Vec<_> = registry
            .entries_in(&Scope::new("S"))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a_id, b_id]);
        assert!(Arc::ptr_eq(&registry.lists_in(&Scope::new("S"))[1], &b));
    }

    #[test]
    fn test_join_is_idempotent_per_instance() {
        let mut registry = ScopeRegistry::new();
        let a = list("S", &[1]);

        let first = registry.join(a.clone());
        let second = registry.join(a.clone());

        assert_eq!(first, second);
        assert_eq!(registry.scope_len(&Scope::new("S")), 1);
    }

    #[test]
    fn test_leave_removes_exact_instance() {
        let mut registry = ScopeRegistry::new();
        let a = list("S", &[1]);
        let twin = list("S", &[1]);
        registry.join(a.clone());
        registry.join(twin.clone());

        assert!(registry.leave(&a));
        assert!(!registry.leave(&a));

        let remaining = registry.lists_in(&Scope::new("S"));
        assert_eq!(remaining.len(), 1);
        assert!(Arc::ptr_eq(&remaining[0], &twin));
    }

    #[test]
    fn test_unregistered_leave_is_noop() {
        let mut registry = ScopeRegistry::new();
        registry.join(list("S", &[1]));

        assert!(!registry.leave(&list("S", &[1])));
        assert!(!registry.leave(&list("never-joined", &[])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_emptied_scope_disappears() {
        let mut registry = ScopeRegistry::new();
        let id = registry.join(list("S", &[1]));
        assert_eq!(registry.scopes().count(), 1);

        assert!(registry.leave_id(id).is_some());
        assert!(registry.leave_id(id).is_none());
        assert!(registry.is_empty());
        assert_eq!(registry.scopes().count(), 0);
        assert!(registry.entries_in(&Scope::new("S")).is_empty());
        assert!(registry.get(id).is_none());
    }
}
