//! Logging facilities for rowbind.
//!
//! rowbind uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("rowbind=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Mutations are logged at `debug`, cache traffic and signal emission at
//! `trace`.

/// Operation names recorded on [`PerfSpan`]s.
pub mod span_names {
    /// Installing a whole new collection.
    pub const REPLACE_ITEMS: &str = "replace_items";
    /// Inserting a batch of items.
    pub const BULK_INSERT: &str = "bulk_insert";
    /// Writing a batch of items over existing ones.
    pub const BULK_REPLACE: &str = "bulk_replace";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "rowbind_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "rowbind_core::signal";
    /// Adapter orchestration target.
    pub const ADAPTER: &str = "rowbind::adapter";
    /// Item store target.
    pub const STORE: &str = "rowbind::store";
    /// Replace policy target.
    pub const POLICY: &str = "rowbind::policy";
    /// Sub-view cache target.
    pub const VIEW_CACHE: &str = "rowbind::view_cache";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for tracking the duration of a batch of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "rowbind::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
