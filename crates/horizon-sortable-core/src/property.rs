//! Live properties for Horizon Sortable.
//!
//! A [`Property<T>`] is a value that may be changed from outside the component
//! reading it. Readers call [`Property::get`] every time they need the value
//! instead of caching it, so an external toggle takes effect on the very next
//! operation.
//!
//! ```
//! use horizon_sortable_core::Property;
//!
//! let use_swap = Property::new(true);
//! assert!(use_swap.get());
//!
//! // Setting the same value reports no change
//! assert!(!use_swap.set(true));
//! assert!(use_swap.set(false));
//! assert!(!use_swap.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `set()` compares the new value with the current one and returns whether the
/// value actually changed, so the owner knows when to emit its notification.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<bool>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_property_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(false);
        assert!(!prop.set(false));
        assert!(prop.set(true));
        assert!(prop.get());
    }

    #[test]
    fn test_property_set_silent() {
        let prop = Property::new(1);
        prop.set_silent(1);
        prop.set_silent(2);
        assert_eq!(prop.get(), 2);
    }

    #[test]
    fn test_property_set_compares_by_value() {
        let prop = Property::new("a".to_string());
        assert!(!prop.set("a".to_string()));
        assert!(prop.set("b".to_string()));
        assert_eq!(prop.get(), "b");
    }

    #[test]
    fn test_property_visible_across_threads() {
        let prop = Arc::new(Property::new(false));
        let writer = prop.clone();
        std::thread::spawn(move || {
            writer.set(true);
        })
        .join()
        .unwrap();
        assert!(prop.get());
    }
}
