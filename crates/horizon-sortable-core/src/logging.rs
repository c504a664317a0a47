//! Logging facilities for Horizon Sortable.
//!
//! Horizon Sortable uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_sortable=debug")
//!     .init();
//! ```
//!
//! Reorders are logged at `debug`; every hover tick and every guard that
//! suppresses a reorder is logged at `trace`.

/// Span names used throughout Horizon Sortable for tracing.
pub mod span_names {
    /// One hover tick.
    pub const HOVER: &str = "horizon_sortable::hover";
    /// One reposition commit, including the render fan-out.
    pub const REPOSITION: &str = "horizon_sortable::reposition";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_sortable_core";
    /// Signal system target.
    pub const SIGNAL: &str = "horizon_sortable_core::signal";
    /// Drag session lifecycle target.
    pub const SESSION: &str = "horizon_sortable::session";
    /// Hover evaluation target.
    pub const HOVER: &str = "horizon_sortable::hover";
    /// Reposition target.
    pub const REPOSITION: &str = "horizon_sortable::reposition";
    /// Scope registry target.
    pub const REGISTRY: &str = "horizon_sortable::registry";
    /// Configuration target.
    pub const CONFIG: &str = "horizon_sortable::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a reposition commit together with the renders it triggers.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_sortable::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
