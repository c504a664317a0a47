//! Core systems for Horizon Sortable.
//!
//! This crate provides the small reactive building blocks the sortable
//! coordinator is assembled from:
//!
//! - **Signal/Slot System**: observer hooks for render requests and drag-end
//!   notifications
//! - **Property System**: live values that are re-read on every use
//! - **Logging**: `tracing` targets and span names for every subsystem
//!
//! # Example
//!
//! ```
//! use horizon_sortable_core::{Property, Signal};
//!
//! struct Toggle {
//!     enabled: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_enabled(&self, enabled: bool) {
//!         if self.enabled.set(enabled) {
//!             self.toggled.emit(enabled);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { enabled: Property::new(false), toggled: Signal::new() };
//! toggle.toggled.connect(|on| println!("enabled: {on}"));
//! toggle.set_enabled(true);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
