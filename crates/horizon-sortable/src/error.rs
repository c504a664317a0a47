//! Guard conditions for drag sorting.
//!
//! None of these are failures of the caller: each one describes a benign race
//! between user input and list state, and the coordinator answers it by doing
//! nothing. They are reported as values so callers and tests can see why a
//! reorder did not happen.

use crate::model::Scope;

/// Result type alias for sorting operations.
pub type Result<T> = std::result::Result<T, SortError>;

/// Reasons a reorder was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// The dragged or hovered item is not in any list of the scope.
    #[error("item is not in any list registered under scope '{scope}'")]
    StaleReference { scope: Scope },

    /// The scope has no registered lists.
    #[error("no lists are registered under scope '{scope}'")]
    NoListsRegistered { scope: Scope },

    /// Sorting is switched off.
    #[error("sorting is disabled")]
    SortDisabled,

    /// A reorder is still being committed.
    #[error("a reorder is already being committed")]
    ReentrantHover,

    /// No drag is in progress.
    #[error("no drag is in progress")]
    NoActiveSession,
}

impl SortError {
    /// Create a stale reference error.
    pub fn stale_reference(scope: &Scope) -> Self {
        Self::StaleReference {
            scope: scope.clone(),
        }
    }

    /// Create a no-lists error.
    pub fn no_lists_registered(scope: &Scope) -> Self {
        Self::NoListsRegistered {
            scope: scope.clone(),
        }
    }
}
