//! Notification delivery from an adapter to whoever listens to it.
//!
//! A [`Signal<Args>`] is a list of subscriber closures. [`emit`](Signal::emit)
//! hands the same value to each of them, synchronously, on the calling thread,
//! in the order they subscribed. An adapter owns one signal per kind of event
//! and the host list widget subscribes to it.
//!
//! ```
//! use rowbind_core::Signal;
//!
//! // (start, count) of a removed range
//! let rows_removed = Signal::<(usize, usize)>::new();
//!
//! let id = rows_removed.connect(|&(start, count)| {
//!     println!("drop {count} rows from {start}");
//! });
//!
//! rows_removed.emit((2, 3));
//! assert!(rows_removed.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle for one subscription, returned by [`Signal::connect`].
    ///
    /// A handle goes stale once its subscription is disconnected; stale
    /// handles never match a later subscription.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Subscription<Args> {
    /// Monotonic subscription number, used to order delivery.
    seq: u64,
    slot: Slot<Args>,
}

struct Subscribers<Args> {
    slots: SlotMap<ConnectionId, Subscription<Args>>,
    next_seq: u64,
}

/// A list of subscribers that all receive every emitted value.
///
/// Delivery order is subscription order, even after earlier subscribers have
/// been disconnected and their storage reused.
///
/// Subscribers are snapshotted before any of them runs. A subscriber may
/// therefore connect or disconnect (itself included) from inside its own
/// call; the change applies from the next [`emit`](Self::emit).
pub struct Signal<Args> {
    subscribers: Mutex<Subscribers<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Subscribers {
                slots: SlotMap::with_key(),
                next_seq: 0,
            }),
        }
    }

    /// Subscribes `slot`, which is called once per [`emit`](Self::emit).
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut subs = self.subscribers.lock();
        let seq = subs.next_seq;
        subs.next_seq += 1;
        let id = subs.slots.insert(Subscription {
            seq,
            slot: Arc::new(slot),
        });
        tracing::trace!(target: targets::SIGNAL, ?id, "connected");
        id
    }

    /// Removes a subscription. Returns `false` if `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.subscribers.lock().slots.remove(id).is_some();
        tracing::trace!(target: targets::SIGNAL, ?id, removed, "disconnect");
        removed
    }

    /// Number of live subscriptions.
    pub fn connection_count(&self) -> usize {
        self.subscribers.lock().slots.len()
    }

    /// Delivers `args` to every subscriber.
    #[tracing::instrument(skip_all, target = "rowbind_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let mut snapshot: Vec<(u64, Slot<Args>)> = self
            .subscribers
            .lock()
            .slots
            .values()
            .map(|sub| (sub.seq, sub.slot.clone()))
            .collect();
        snapshot.sort_unstable_by_key(|&(seq, _)| seq);
        tracing::trace!(target: targets::SIGNAL, receivers = snapshot.len(), "emit");

        for (_, slot) in snapshot {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
