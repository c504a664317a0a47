//! The drag coordinator: public entry point for drag sorting.
//!
//! A [`DragCoordinator`] owns the scope registry and the (at most one) active
//! drag session. UI code feeds it three kinds of events:
//!
//! - [`start_drag`](DragCoordinator::start_drag) when an entry is picked up,
//! - [`hover`](DragCoordinator::hover) every time the pointer is over an entry,
//! - [`end_drag`](DragCoordinator::end_drag) when the pointer is released.
//!
//! Lists enter and leave the registry with [`join`](DragCoordinator::join) and
//! [`leave`](DragCoordinator::leave).
//!
//! # Re-entrancy
//!
//! All calls are synchronous. No lock is held while lists are written or
//! rendered, so a list's render hook may call back into the coordinator. While
//! a reorder is being committed, further hover ticks are dropped
//! ([`SortError::ReentrantHover`]); they still update the session's last
//! pointer event. The same holds for ticks arriving from other threads: only
//! one commit runs at a time. The hovered item is marked displaced only after
//! its reorder has been committed, and only if the drag is still the one it
//! was computed for. Calling `end_drag` from inside a render hook discards the
//! session at once.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_sortable::prelude::*;
//!
//! let coordinator = DragCoordinator::<&str>::new(Arc::new(SortConfig::new()));
//! let list = Arc::new(SortableList::from_values("tasks", ["a", "b", "c"]));
//! coordinator.join(list.clone());
//!
//! let items = list.items();
//! let entry = |index: usize, element: ElementId| {
//!     ListEntry::new(items[index].clone(), "tasks", element)
//!         .with_bounds(Rect::new(0.0, index as f32 * 20.0, 100.0, 20.0))
//! };
//! let (a_el, c_el) = (ElementId::new(), ElementId::new());
//!
//! coordinator.start_drag(entry(0, a_el), PointerEvent::new(10.0, 5.0, a_el));
//! coordinator.hover(PointerEvent::new(10.0, 50.0, c_el), &entry(2, c_el));
//! coordinator.end_drag();
//!
//! assert_eq!(*list.items()[0], "c");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use horizon_sortable_core::logging::{span_names, targets};
use horizon_sortable_core::Signal;

use crate::config::{SortConfig, SortSettings};
use crate::error::SortError;
use crate::model::{Item, ListEntry, Scope};
use crate::registry::{ListId, ListRef, ScopeRegistry};

use super::hover::{HoverDecision, HoverEvaluator, HoverSkip};
use super::reposition::{Reposition, RepositionMode, Repositioner};
use super::session::{DragSession, DropAction, PointerEvent, SessionId};

/// Payload of [`DragCoordinator::sort_ended`].
pub struct SortEnded<T> {
    /// The entry that was being dragged, if a drag was active.
    pub source: Option<ListEntry<T>>,
}

impl<T> Clone for SortEnded<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SortEnded<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortEnded")
            .field("source", &self.source)
            .finish()
    }
}

/// What a hover tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverOutcome {
    /// A reorder was committed.
    Repositioned(Reposition),
    /// The tick was evaluated and held still.
    Held(HoverSkip),
    /// The tick was ignored by a guard.
    Ignored(SortError),
}

impl HoverOutcome {
    /// Returns true if the tick reordered items.
    pub fn is_repositioned(&self) -> bool {
        matches!(self, Self::Repositioned(_))
    }
}

/// Holds the moving flag for one commit and clears it on drop, even by
/// unwinding.
struct MoveGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> MoveGuard<'a> {
    /// Claims the flag, or returns `None` if another commit holds it.
    fn try_engage(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Coordinates drag sorting across the lists of each scope.
pub struct DragCoordinator<T> {
    registry: RwLock<ScopeRegistry<T>>,
    session: Mutex<Option<DragSession<T>>>,
    moving: AtomicBool,
    settings: Arc<dyn SortSettings>,
    sort_ended: Signal<SortEnded<T>>,
}

impl<T: Send + Sync + 'static> Default for DragCoordinator<T> {
    fn default() -> Self {
        Self::new(Arc::new(SortConfig::default()))
    }
}

impl<T: Send + Sync + 'static> DragCoordinator<T> {
    /// Creates a coordinator reading its flags from `settings`.
    pub fn new(settings: Arc<dyn SortSettings>) -> Self {
        Self {
            registry: RwLock::new(ScopeRegistry::new()),
            session: Mutex::new(None),
            moving: AtomicBool::new(false),
            settings,
            sort_ended: Signal::new(),
        }
    }

    /// The settings this coordinator reads.
    pub fn settings(&self) -> &Arc<dyn SortSettings> {
        &self.settings
    }

    /// Emitted by [`end_drag`](Self::end_drag), before the session is discarded.
    pub fn sort_ended(&self) -> &Signal<SortEnded<T>> {
        &self.sort_ended
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers `list` under its scope.
    pub fn join(&self, list: ListRef<T>) -> ListId {
        self.registry.write().join(list)
    }

    /// Removes exactly this list instance. Returns `false` if it was not registered.
    pub fn leave(&self, list: &ListRef<T>) -> bool {
        self.registry.write().leave(list)
    }

    /// Removes the list registered under `id`.
    pub fn leave_id(&self, id: ListId) -> Option<ListRef<T>> {
        self.registry.write().leave_id(id)
    }

    /// The lists registered under `scope`, in join order.
    pub fn lists_in(&self, scope: &Scope) -> Vec<ListRef<T>> {
        self.registry.read().lists_in(scope)
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    /// Starts dragging `entry`.
    ///
    /// Replaces any session still active; callers serialize drag starts.
    /// Returns the action the platform should advertise for the drag.
    pub fn start_drag(&self, entry: ListEntry<T>, event: PointerEvent) -> DropAction {
        tracing::debug!(
            target: targets::SESSION,
            scope = %entry.scope,
            element = entry.element.as_u64(),
            "drag started"
        );
        let previous = self.session.lock().replace(DragSession::new(entry, event));
        if previous.is_some() {
            tracing::trace!(target: targets::SESSION, "replaced an unfinished drag session");
        }
        DropAction::MOVE
    }

    /// Ends the current drag.
    ///
    /// Emits [`sort_ended`](Self::sort_ended), then discards the session that
    /// was active when the call began. A session started from a `sort_ended`
    /// slot survives. Safe to call when no drag is active.
    pub fn end_drag(&self) {
        let ending = self
            .session
            .lock()
            .as_ref()
            .map(|session| (session.id(), session.source().clone()));
        tracing::debug!(target: targets::SESSION, active = ending.is_some(), "drag ended");

        let (id, source) = ending.unzip();
        self.sort_ended.emit(SortEnded { source });

        if let Some(id) = id {
            let mut guard = self.session.lock();
            if guard.as_ref().is_some_and(|session| session.id() == id) {
                guard.take();
            }
        }
    }

    /// Returns true while a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Returns true while a reorder is being committed.
    pub fn is_moving(&self) -> bool {
        self.moving.load(Ordering::SeqCst)
    }

    /// The entry being dragged.
    pub fn source(&self) -> Option<ListEntry<T>> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.source().clone())
    }

    /// The last item a reorder fired against in the current drag.
    pub fn displaced(&self) -> Option<Item<T>> {
        self.session
            .lock()
            .as_ref()
            .and_then(|session| session.displaced().cloned())
    }

    // -------------------------------------------------------------------------
    // Hover
    // -------------------------------------------------------------------------

    /// Handles the pointer being over `target` during a drag.
    #[tracing::instrument(skip_all, target = "horizon_sortable::hover", level = "trace", fields(y = event.y()))]
    pub fn hover(&self, event: PointerEvent, target: &ListEntry<T>) -> HoverOutcome {
        if !self.settings.enable_sort() {
            tracing::trace!(target: targets::HOVER, "sorting disabled, hover ignored");
            return HoverOutcome::Ignored(SortError::SortDisabled);
        }

        let (session_id, source, scope, _moving) = {
            let mut guard = self.session.lock();
            let Some(session) = guard.as_mut() else {
                tracing::trace!(target: targets::HOVER, "no active drag, hover ignored");
                return HoverOutcome::Ignored(SortError::NoActiveSession);
            };

            let evaluation = HoverEvaluator::evaluate(session, event, target, self.is_moving());
            tracing::trace!(
                target: targets::HOVER,
                py = evaluation.position.py,
                direction = ?evaluation.direction,
                decision = ?evaluation.decision,
                "hover evaluated"
            );
            match evaluation.decision {
                HoverDecision::Suppressed => {
                    return HoverOutcome::Ignored(SortError::ReentrantHover);
                }
                HoverDecision::Hold(skip) => return HoverOutcome::Held(skip),
                HoverDecision::Trigger => {}
            }

            // Claimed before the lock is released, so only one commit runs
            let Some(moving) = MoveGuard::try_engage(&self.moving) else {
                tracing::trace!(target: targets::HOVER, "commit already running, hover dropped");
                return HoverOutcome::Ignored(SortError::ReentrantHover);
            };
            (
                session.id(),
                session.source_item().clone(),
                session.scope().clone(),
                moving,
            )
        };

        let _span = tracing::trace_span!(target: "horizon_sortable::hover", "commit", operation = span_names::HOVER).entered();
        let lists = self.registry.read().entries_in(&scope);
        let mode = RepositionMode::from_use_swap(self.settings.use_swap());

        match Repositioner::new(&scope, &lists, mode).reposition(&source, &target.item) {
            Ok(reposition) => {
                self.record_displaced(session_id, &target.item);
                HoverOutcome::Repositioned(reposition)
            }
            Err(err) => HoverOutcome::Ignored(err),
        }
    }

    /// Marks `item` displaced, if the session the reorder was computed for is
    /// still the active one.
    fn record_displaced(&self, id: SessionId, item: &Item<T>) {
        let mut guard = self.session.lock();
        match guard.as_mut() {
            Some(session) if session.id() == id => session.set_displaced(Some(item.clone())),
            _ => tracing::trace!(target: targets::SESSION, "session ended during commit"),
        }
    }
}

impl<T> std::fmt::Debug for DragCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("registry", &*self.registry.read())
            .field("dragging", &self.session.lock().is_some())
            .field("moving", &self.moving.load(Ordering::SeqCst))
            .finish()
    }
}

static_assertions::assert_impl_all!(DragCoordinator<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::{ElementId, OrderedList, SortableList};
    use std::sync::atomic::AtomicUsize;

    /// One rendered list: its model plus an element per row, rows 100px tall.
    struct Column {
        list: Arc<SortableList<char>>,
        elements: Vec<ElementId>,
        x: f32,
    }

    impl Column {
        fn new(scope: &str, values: &str, x: f32) -> Self {
            let list = Arc::new(SortableList::from_values(scope, values.chars()));
            let elements = values.chars().map(|_| ElementId::new()).collect();
            Self { list, elements, x }
        }

        fn entry(&self, row: usize) -> ListEntry<char> {
            let item = self.list.items()[row].clone();
            ListEntry::new(item, self.list.scope(), self.elements[row])
                .with_bounds(Rect::new(self.x, row as f32 * 100.0, 100.0, 100.0))
        }

        /// Pointer over `row`, at fraction `py` of its height.
        fn pointer(&self, row: usize, py: f32) -> PointerEvent {
            PointerEvent::new(self.x + 50.0, (row as f32 + py) * 100.0, self.elements[row])
        }

        fn values(&self) -> String {
            self.list.items().iter().map(|item| **item).collect()
        }
    }

    fn coordinator(config: SortConfig) -> (DragCoordinator<char>, Arc<SortConfig>) {
        let config = Arc::new(config);
        (DragCoordinator::new(config.clone()), config)
    }

    #[test]
    fn test_start_drag_advertises_move() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let column = Column::new("S", "abc", 0.0);

        let action = coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));

        assert_eq!(action, DropAction::MOVE);
        assert!(coordinator.is_dragging());
        assert!(coordinator.source().is_some_and(|entry| *entry.item == 'a'));
        assert!(coordinator.displaced().is_none());
    }

    #[test]
    fn test_hover_swaps_within_list() {
        let (coordinator, _) = coordinator(SortConfig::new().with_swap(true));
        let column = Column::new("S", "abc", 0.0);
        coordinator.join(column.list.clone());

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        let outcome = coordinator.hover(column.pointer(2, 0.5), &column.entry(2));

        assert!(outcome.is_repositioned());
        assert_eq!(column.values(), "cba");
        assert!(coordinator.displaced().is_some_and(|item| *item == 'c'));
        assert!(!coordinator.is_moving());
    }

    #[test]
    fn test_hover_shifts_within_list() {
        let (coordinator, _) = coordinator(SortConfig::new().with_swap(false));
        let column = Column::new("S", "abcd", 0.0);
        coordinator.join(column.list.clone());

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        coordinator.hover(column.pointer(2, 0.5), &column.entry(2));

        assert_eq!(column.values(), "bcad");
    }

    #[test]
    fn test_config_is_read_live() {
        let (coordinator, config) = coordinator(SortConfig::new().with_swap(true));
        let column = Column::new("S", "abcd", 0.0);
        coordinator.join(column.list.clone());

        config.set_use_swap(false);
        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        coordinator.hover(column.pointer(3, 0.5), &column.entry(3));
        assert_eq!(column.values(), "bcda");

        config.set_enable_sort(false);
        let outcome = coordinator.hover(column.pointer(1, 0.9), &column.entry(1));
        assert_eq!(outcome, HoverOutcome::Ignored(SortError::SortDisabled));
        assert_eq!(column.values(), "bcda");
    }

    #[test]
    fn test_hover_without_session_is_ignored() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let column = Column::new("S", "ab", 0.0);
        coordinator.join(column.list.clone());

        let outcome = coordinator.hover(column.pointer(1, 0.9), &column.entry(1));
        assert_eq!(outcome, HoverOutcome::Ignored(SortError::NoActiveSession));
        assert_eq!(column.values(), "ab");
    }

    #[test]
    fn test_hover_with_no_lists_registered() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let column = Column::new("S", "ab", 0.0);

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        let outcome = coordinator.hover(column.pointer(1, 0.9), &column.entry(1));

        assert_eq!(
            outcome,
            HoverOutcome::Ignored(SortError::no_lists_registered(&Scope::new("S")))
        );
        assert_eq!(column.values(), "ab");
    }

    #[test]
    fn test_end_drag_notifies_then_clears() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let column = Column::new("S", "ab", 0.0);
        coordinator.join(column.list.clone());

        let ended = Arc::new(Mutex::new(Vec::new()));
        let ended_clone = ended.clone();
        coordinator.sort_ended().connect(move |event| {
            ended_clone
                .lock()
                .push(event.source.as_ref().map(|entry| *entry.item));
        });

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        coordinator.end_drag();
        coordinator.end_drag();

        assert_eq!(*ended.lock(), vec![Some('a'), None]);
        assert!(!coordinator.is_dragging());
        assert!(coordinator.source().is_none());
    }

    #[test]
    fn test_reentrant_hover_is_dropped() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let coordinator = Arc::new(coordinator);
        let column = Arc::new(Column::new("S", "abcd", 0.0));
        coordinator.join(column.list.clone());

        let nested = Arc::new(Mutex::new(Vec::new()));
        {
            let coordinator = Arc::downgrade(&coordinator);
            let column_ref = Arc::downgrade(&column);
            let nested = nested.clone();
            column.list.render_requested().connect(move |_| {
                let (Some(coordinator), Some(column)) = (coordinator.upgrade(), column_ref.upgrade())
                else {
                    return;
                };
                let outcome = coordinator.hover(column.pointer(3, 0.9), &column.entry(3));
                nested.lock().push((outcome, coordinator.is_moving()));
            });
        }

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        let outcome = coordinator.hover(column.pointer(1, 0.5), &column.entry(1));

        assert!(outcome.is_repositioned());
        assert_eq!(column.values(), "bacd");
        assert_eq!(
            *nested.lock(),
            vec![(HoverOutcome::Ignored(SortError::ReentrantHover), true)]
        );
        assert!(!coordinator.is_moving());
    }

    #[test]
    fn test_end_drag_inside_render_discards_session() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let coordinator = Arc::new(coordinator);
        let column = Column::new("S", "abc", 0.0);
        coordinator.join(column.list.clone());

        let weak = Arc::downgrade(&coordinator);
        column.list.render_requested().connect(move |_| {
            if let Some(coordinator) = weak.upgrade() {
                coordinator.end_drag();
            }
        });

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        assert!(coordinator.hover(column.pointer(2, 0.5), &column.entry(2)).is_repositioned());

        assert!(!coordinator.is_dragging());
        let outcome = coordinator.hover(column.pointer(1, 0.9), &column.entry(1));
        assert_eq!(outcome, HoverOutcome::Ignored(SortError::NoActiveSession));
        assert_eq!(column.values(), "cba");
    }

    #[test]
    fn test_leave_stops_participation() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let first = Column::new("S", "ab", 0.0);
        let second = Column::new("S", "cd", 200.0);
        coordinator.join(first.list.clone());
        let second_ref: ListRef<char> = second.list.clone();
        coordinator.join(second_ref.clone());

        let renders = Arc::new(AtomicUsize::new(0));
        let renders_clone = renders.clone();
        second.list.render_requested().connect(move |_| {
            renders_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(coordinator.leave(&second_ref));
        assert_eq!(coordinator.lists_in(&Scope::new("S")).len(), 1);

        coordinator.start_drag(first.entry(0), first.pointer(0, 0.5));
        let outcome = coordinator.hover(second.pointer(0, 0.9), &second.entry(0));

        assert_eq!(
            outcome,
            HoverOutcome::Ignored(SortError::stale_reference(&Scope::new("S")))
        );
        assert_eq!(first.values(), "ab");
        assert_eq!(second.values(), "cd");
        assert_eq!(renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_move_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        {
            let held = MoveGuard::try_engage(&flag);
            assert!(held.is_some());
            assert!(MoveGuard::try_engage(&flag).is_none());
            assert!(flag.load(Ordering::SeqCst));
        }
        assert!(!flag.load(Ordering::SeqCst));
        assert!(MoveGuard::try_engage(&flag).is_some());
    }

    #[test]
    fn test_failed_reposition_does_not_mark_displaced() {
        let (coordinator, _) = coordinator(SortConfig::new().with_swap(false));
        let first = Column::new("S", "abc", 0.0);
        let late = Column::new("S", "de", 200.0);
        coordinator.join(first.list.clone());

        coordinator.start_drag(first.entry(0), first.pointer(0, 0.5));
        let outcome = coordinator.hover(late.pointer(1, 0.875), &late.entry(1));
        assert_eq!(
            outcome,
            HoverOutcome::Ignored(SortError::stale_reference(&Scope::new("S")))
        );
        assert!(coordinator.displaced().is_none());

        coordinator.join(late.list.clone());
        let outcome = coordinator.hover(late.pointer(1, 0.9), &late.entry(1));

        assert!(outcome.is_repositioned());
        assert_eq!(first.values(), "bc");
        assert_eq!(late.values(), "dae");
        assert!(coordinator.displaced().is_some_and(|item| *item == 'e'));
    }

    #[test]
    fn test_session_started_from_sort_ended_survives() {
        let (coordinator, _) = coordinator(SortConfig::new());
        let coordinator = Arc::new(coordinator);
        let column = Column::new("S", "abc", 0.0);
        coordinator.join(column.list.clone());

        let (next_entry, next_event) = (column.entry(1), column.pointer(1, 0.5));
        let weak = Arc::downgrade(&coordinator);
        coordinator.sort_ended().connect(move |event| {
            if event.source.is_none() {
                return;
            }
            if let Some(coordinator) = weak.upgrade() {
                coordinator.start_drag(next_entry.clone(), next_event);
            }
        });

        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));
        coordinator.end_drag();

        assert!(coordinator.is_dragging());
        assert!(coordinator.source().is_some_and(|entry| *entry.item == 'b'));
    }

    #[test]
    fn test_concurrent_hovers_commit_one_at_a_time() {
        let (coordinator, _) = coordinator(SortConfig::new().with_swap(false));
        let column = Column::new("S", "abcdefgh", 0.0);
        coordinator.join(column.list.clone());
        coordinator.start_drag(column.entry(0), column.pointer(0, 0.5));

        std::thread::scope(|scope| {
            for thread in 0..4 {
                let (coordinator, column) = (&coordinator, &column);
                scope.spawn(move || {
                    for tick in 0..200 {
                        let row = 1 + (tick + thread) % 7;
                        let py = if tick % 2 == 0 { 0.9 } else { 0.5 };
                        coordinator.hover(column.pointer(row, py), &column.entry(row));
                    }
                });
            }
        });

        let mut values: Vec<char> = column.values().chars().collect();
        values.sort_unstable();
        assert_eq!(values.into_iter().collect::<String>(), "abcdefgh");
        assert!(!coordinator.is_moving());
    }
}
