//! Sorting configuration.
//!
//! The coordinator asks its [`SortSettings`] for every flag on every
//! operation, so flipping a flag on a shared [`SortConfig`] takes effect on the
//! next hover tick without rebuilding anything.

use horizon_sortable_core::logging::targets;
use horizon_sortable_core::{Property, Signal};

/// Live source of the sorting flags.
pub trait SortSettings: Send + Sync {
    /// Whether hover ticks may reorder items at all.
    fn enable_sort(&self) -> bool;

    /// Whether same-list reorders swap (`true`) or shift (`false`).
    fn use_swap(&self) -> bool;
}

/// Identifies a flag in [`SortConfig::changed`] notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortSetting {
    /// The `enable_sort` flag.
    EnableSort,
    /// The `use_swap` flag.
    UseSwap,
}

/// Default [`SortSettings`] backed by properties.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_sortable::{DragCoordinator, SortConfig};
///
/// let config = Arc::new(SortConfig::new().with_swap(false));
/// let coordinator = DragCoordinator::<String>::new(config.clone());
///
/// // Later, from a toolbar toggle:
/// config.set_use_swap(true);
/// ```
#[derive(Debug)]
pub struct SortConfig {
    enable_sort: Property<bool>,
    use_swap: Property<bool>,
    changed: Signal<(SortSetting, bool)>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SortConfig {
    /// Creates a configuration with sorting enabled in swap mode.
    pub fn new() -> Self {
        Self {
            enable_sort: Property::new(true),
            use_swap: Property::new(true),
            changed: Signal::new(),
        }
    }

    /// Sets whether sorting is enabled.
    pub fn with_sort_enabled(self, enabled: bool) -> Self {
        self.enable_sort.set_silent(enabled);
        self
    }

    /// Sets whether same-list reorders swap instead of shift.
    pub fn with_swap(self, use_swap: bool) -> Self {
        self.use_swap.set_silent(use_swap);
        self
    }

    /// Enables or disables sorting. Returns `true` if the value changed.
    pub fn set_enable_sort(&self, enabled: bool) -> bool {
        self.update(&self.enable_sort, SortSetting::EnableSort, enabled)
    }

    /// Switches between swap and shift mode. Returns `true` if the value changed.
    pub fn set_use_swap(&self, use_swap: bool) -> bool {
        self.update(&self.use_swap, SortSetting::UseSwap, use_swap)
    }

    /// Emitted with the flag and its new value whenever a setter changes it.
    pub fn changed(&self) -> &Signal<(SortSetting, bool)> {
        &self.changed
    }

    fn update(&self, property: &Property<bool>, setting: SortSetting, value: bool) -> bool {
        let changed = property.set(value);
        if changed {
            tracing::debug!(target: targets::CONFIG, ?setting, value, "sort setting changed");
            self.changed.emit((setting, value));
        }
        changed
    }
}

impl SortSettings for SortConfig {
    fn enable_sort(&self) -> bool {
        self.enable_sort.get()
    }

    fn use_swap(&self) -> bool {
        self.use_swap.get()
    }
}

static_assertions::assert_impl_all!(SortConfig: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let config = SortConfig::default();
        assert!(config.enable_sort());
        assert!(config.use_swap());
    }

    #[test]
    fn test_builders_do_not_notify() {
        let config = SortConfig::new().with_sort_enabled(false).with_swap(false);
        assert!(!config.enable_sort());
        assert!(!config.use_swap());
        assert_eq!(config.changed().connection_count(), 0);
    }

    #[test]
    fn test_setters_report_changes() {
        let config = SortConfig::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        config.changed().connect(move |change| {
            seen_clone.lock().push(*change);
        });

        assert!(!config.set_enable_sort(true));
        assert!(config.set_use_swap(false));
        assert!(config.set_enable_sort(false));

        assert_eq!(
            *seen.lock(),
            vec![(SortSetting::UseSwap, false), (SortSetting::EnableSort, false)]
        );
        assert!(!config.use_swap());
        assert!(!config.enable_sort());
    }
}
