//! Core plumbing for rowbind.
//!
//! This crate provides the pieces of rowbind that do not depend on items or
//! views:
//!
//! - **Signal/Slot System**: Type-safe change notification delivery
//! - **Logging**: `tracing` targets and span names
//!
//! # Signal/Slot Example
//!
//! ```
//! use rowbind_core::Signal;
//!
//! let rows_removed = Signal::<(usize, usize)>::new();
//!
//! let conn_id = rows_removed.connect(|(start, count)| {
//!     println!("{} rows removed at {}", count, start);
//! });
//!
//! rows_removed.emit((2, 3));
//! rows_removed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
