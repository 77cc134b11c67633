//! Structural change notifications sent to the host list widget.

use std::fmt;
use std::sync::Arc;

use rowbind_core::{ConnectionId, Signal};

/// Describes what a single mutation did to the collection.
///
/// The host re-queries the count and re-renders the affected rows when it
/// receives one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeNotification {
    /// One item was inserted at the position.
    ItemInserted(usize),
    /// `count` items were inserted starting at `start`.
    ItemsInserted { start: usize, count: usize },
    /// The item at the position changed in place.
    ItemChanged(usize),
    /// `count` items starting at `start` changed in place.
    ItemsRangeChanged { start: usize, count: usize },
    /// `count` items starting at `start` were removed.
    ItemsRemoved { start: usize, count: usize },
    /// Anything may have changed; re-render everything.
    Invalidated,
}

impl ChangeNotification {
    /// Returns `true` if the notification changes the item count.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ItemInserted(_) | Self::ItemsInserted { .. } | Self::ItemsRemoved { .. }
        )
    }
}

impl fmt::Display for ChangeNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemInserted(pos) => write!(f, "item inserted at {pos}"),
            Self::ItemsInserted { start, count } => {
                write!(f, "{count} items inserted at {start}")
            }
            Self::ItemChanged(pos) => write!(f, "item changed at {pos}"),
            Self::ItemsRangeChanged { start, count } => {
                write!(f, "{count} items changed at {start}")
            }
            Self::ItemsRemoved { start, count } => write!(f, "{count} items removed at {start}"),
            Self::Invalidated => write!(f, "collection invalidated"),
        }
    }
}

/// Receiver of change notifications, implemented by the host list widget.
pub trait NotificationSink: Send + Sync {
    /// Called once per change, after the collection has been updated.
    fn notify(&self, change: &ChangeNotification);
}

/// Signals emitted by an [`Adapter`](crate::Adapter).
pub struct AdapterSignals {
    /// Emitted after every change to the collection.
    pub changed: Signal<ChangeNotification>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
        }
    }

    /// Routes every change to `sink`.
    pub fn connect_sink(&self, sink: Arc<dyn NotificationSink>) -> ConnectionId {
        self.changed.connect(move |change| sink.notify(change))
    }

    pub(crate) fn emit_all(&self, changes: impl IntoIterator<Item = ChangeNotification>) {
        for change in changes {
            self.changed.emit(change);
        }
    }
}
