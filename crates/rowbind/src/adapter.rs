//! The adapter: binds an item collection to recyclable row views.
//!
//! [`Adapter<T, V>`] owns the items (through an [`ItemStore`]), the current
//! [`ReplacePolicy`] and the optional click listeners. Every mutation goes
//! through it and is followed by the [`ChangeNotification`]s describing it,
//! delivered through [`AdapterSignals::changed`] once the collection has been
//! updated.
//!
//! # Example
//!
//! ```ignore
//! use rowbind::{Adapter, AdapterConfig, LayoutId, ViewId};
//!
//! const TITLE: ViewId = ViewId(1);
//!
//! let adapter = Adapter::new(
//!     AdapterConfig::new(LayoutId(7)).with_sub_view_ids([TITLE]),
//!     |holder: &mut ViewHolder<MyRow>, _pos, item: &String| {
//!         if let Ok(label) = holder.find_child(TITLE) {
//!             label.set_text(item);
//!         }
//!     },
//! );
//!
//! adapter.connect_sink(host.clone());
//! adapter.add_item("Hello".to_string())?;
//!
//! // Later, from the host's layout pass:
//! let mut holder = adapter.create_holder(&factory)?;
//! adapter.bind_row(0, &mut holder)?;
//! ```
//!
//! # Threading
//!
//! The adapter is meant to be driven from one thread (the host's UI thread).
//! It is `Send + Sync` and the collection sits behind a lock, so installing
//! a whole new collection from another thread with
//! [`replace_items`](Adapter::replace_items) is a single atomic swap. The
//! render callback runs while the collection is read-locked and must not call
//! the adapter's mutation methods.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rowbind_core::logging::{span_names, targets};
use rowbind_core::{ConnectionId, PerfSpan};

use crate::config::{AdapterConfig, InsertNotification};
use crate::error::Result;
use crate::holder::{ClickDispatch, ItemView, LongClickDispatch, ViewFactory, ViewHolder};
use crate::notification::{AdapterSignals, ChangeNotification, NotificationSink};
use crate::policy::ReplacePolicy;
use crate::store::ItemStore;

/// Fills a row view with the data of one item.
pub type RenderCallback<T, V> = Arc<dyn Fn(&mut ViewHolder<V>, usize, &T) + Send + Sync>;

/// Called with the clicked row view and its position.
pub type ItemClickListener<V> = Arc<dyn Fn(&V, usize) + Send + Sync>;

/// Called with the long-clicked row view and its position. Returns `true` if
/// the long click was consumed.
pub type ItemLongClickListener<V> = Arc<dyn Fn(&V, usize) -> bool + Send + Sync>;

/// Binds an ordered collection of `T` to row views of type `V`.
pub struct Adapter<T, V: ItemView> {
    store: RwLock<ItemStore<T>>,
    policy: RwLock<Arc<dyn ReplacePolicy<T>>>,
    render: RenderCallback<T, V>,
    on_item_click: RwLock<Option<ItemClickListener<V>>>,
    on_item_long_click: RwLock<Option<ItemLongClickListener<V>>>,
    config: AdapterConfig,
    signals: AdapterSignals,
}

impl<T, V> Adapter<T, V>
where
    T: Send + Sync + 'static,
    V: ItemView,
{
    /// Creates an adapter over an empty collection.
    pub fn new<F>(config: AdapterConfig, render: F) -> Self
    where
        F: Fn(&mut ViewHolder<V>, usize, &T) + Send + Sync + 'static,
    {
        Self::with_store(config, ItemStore::new(), Arc::new(render))
    }

    /// Creates an adapter seeded with `items`.
    pub fn with_items<F>(config: AdapterConfig, items: Vec<T>, render: F) -> Self
    where
        F: Fn(&mut ViewHolder<V>, usize, &T) + Send + Sync + 'static,
    {
        Self::with_store(config, ItemStore::with_items(items), Arc::new(render))
    }

    /// Creates an adapter with no collection.
    ///
    /// [`item_count`](Self::item_count) reports `None` and every other
    /// operation fails with
    /// [`UninitializedCollection`](crate::AdapterError::UninitializedCollection)
    /// until [`replace_items`](Self::replace_items) installs one.
    pub fn uninitialized<F>(config: AdapterConfig, render: F) -> Self
    where
        F: Fn(&mut ViewHolder<V>, usize, &T) + Send + Sync + 'static,
    {
        Self::with_store(config, ItemStore::uninitialized(), Arc::new(render))
    }

    fn with_store(config: AdapterConfig, store: ItemStore<T>, render: RenderCallback<T, V>) -> Self {
        let policy = config.replace_mode.policy();
        Self {
            store: RwLock::new(store),
            policy: RwLock::new(policy),
            render,
            on_item_click: RwLock::new(None),
            on_item_long_click: RwLock::new(None),
            config,
            signals: AdapterSignals::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of items, or `None` if no collection has been installed.
    pub fn item_count(&self) -> Option<usize> {
        self.store.read().count()
    }

    /// Number of items; an uninitialized adapter counts as empty.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns `true` if there are no items to show.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Returns `true` once a collection has been installed.
    pub fn is_initialized(&self) -> bool {
        self.store.read().is_initialized()
    }

    /// Runs `f` on the item at `pos`.
    pub fn with_item<R>(&self, pos: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        let store = self.store.read();
        Ok(f(store.get(pos)?))
    }

    /// The configuration the adapter was created with.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The adapter's change signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// Routes every change notification to `sink`.
    pub fn connect_sink(&self, sink: Arc<dyn NotificationSink>) -> ConnectionId {
        self.signals.connect_sink(sink)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends `item`. Emits `ItemInserted(last)` and returns the position.
    pub fn add_item(&self, item: T) -> Result<usize> {
        self.mutate("add_item", |store| {
            let pos = store.append(item)?;
            Ok((pos, vec![ChangeNotification::ItemInserted(pos)]))
        })
    }

    /// Inserts `item` at `pos` (`0 <= pos <= len`).
    ///
    /// Emits `ItemChanged(pos)` or `ItemInserted(pos)` depending on
    /// [`AdapterConfig::insert_notification`].
    pub fn insert_item(&self, item: T, pos: usize) -> Result<()> {
        let kind = self.config.insert_notification;
        self.mutate("insert_item", |store| {
            store.insert(pos, item)?;
            let change = match kind {
                InsertNotification::Changed => ChangeNotification::ItemChanged(pos),
                InsertNotification::Inserted => ChangeNotification::ItemInserted(pos),
            };
            Ok(((), vec![change]))
        })
    }

    /// Appends all of `items`. Emits `ItemsInserted(old_len, items.len())`.
    pub fn add_items(&self, items: Vec<T>) -> Result<()> {
        let _span = PerfSpan::new(span_names::BULK_INSERT);
        let count = items.len();
        self.mutate("add_items", |store| {
            let start = store.extend(items)?;
            Ok(((), vec![ChangeNotification::ItemsInserted { start, count }]))
        })
    }

    /// Inserts all of `items` at `start`, keeping their order. Emits
    /// `ItemsInserted(start, items.len())`.
    pub fn insert_items(&self, start: usize, items: Vec<T>) -> Result<()> {
        let _span = PerfSpan::new(span_names::BULK_INSERT);
        let count = items.len();
        self.mutate("insert_items", |store| {
            store.insert_all(start, items)?;
            Ok(((), vec![ChangeNotification::ItemsInserted { start, count }]))
        })
    }

    /// Replaces the item at `pos`, returning the old one. Emits
    /// `ItemChanged(pos)`.
    pub fn set_item(&self, pos: usize, item: T) -> Result<T> {
        self.mutate("set_item", |store| {
            let old = store.set(pos, item)?;
            Ok((old, vec![ChangeNotification::ItemChanged(pos)]))
        })
    }

    /// Writes `items` over the collection from the start. Same as
    /// `set_items_at(0, items)`.
    pub fn set_items(&self, items: Vec<T>) -> Result<()> {
        self.set_items_at(0, items)
    }

    /// Writes `items` over the collection starting at `start`, resolving a
    /// misaligned end with the installed replace policy.
    pub fn set_items_at(&self, start: usize, items: Vec<T>) -> Result<()> {
        let policy = self.replace_policy();
        self.set_items_with(start, items, policy.as_ref())
    }

    /// Like [`set_items_at`](Self::set_items_at) with an explicit policy.
    pub fn set_items_with(
        &self,
        start: usize,
        items: Vec<T>,
        policy: &dyn ReplacePolicy<T>,
    ) -> Result<()> {
        let _span = PerfSpan::new(span_names::BULK_REPLACE);
        self.mutate("set_items", |store| {
            let changes = store.replace_range(start, items, policy)?;
            Ok(((), changes))
        })
    }

    /// Removes the item at `pos`. Emits `ItemsRemoved(pos, 1)`.
    pub fn remove_item(&self, pos: usize) -> Result<T> {
        self.mutate("remove_item", |store| {
            let item = store.remove_at(pos)?;
            Ok((item, vec![ChangeNotification::ItemsRemoved { start: pos, count: 1 }]))
        })
    }

    /// Removes `count` consecutive items starting at `start`. Emits
    /// `ItemsRemoved(start, count)`.
    ///
    /// The whole range is checked before anything is removed: if any part of
    /// it lies outside the collection the call fails and nothing changes.
    pub fn remove_items(&self, start: usize, count: usize) -> Result<Vec<T>> {
        self.mutate("remove_items", |store| {
            let removed = store.remove_range(start, count)?;
            Ok((removed, vec![ChangeNotification::ItemsRemoved { start, count }]))
        })
    }

    /// Removes every item. Emits `ItemsRemoved(0, old_len)` and returns the
    /// old length.
    pub fn clear(&self) -> Result<usize> {
        self.mutate("clear", |store| {
            let count = store.clear()?;
            Ok((count, vec![ChangeNotification::ItemsRemoved { start: 0, count }]))
        })
    }

    /// Moves the item at `pos` to the **end** of the collection.
    ///
    /// Despite the name, the item ends up last, not first. Emits
    /// `ItemsRemoved(pos, 1)` followed by `ItemInserted(last)` and returns
    /// the new position.
    pub fn stick_to_top(&self, pos: usize) -> Result<usize> {
        self.mutate("stick_to_top", |store| {
            let item = store.remove_at(pos)?;
            let new_pos = store.append(item)?;
            Ok((
                new_pos,
                vec![
                    ChangeNotification::ItemsRemoved { start: pos, count: 1 },
                    ChangeNotification::ItemInserted(new_pos),
                ],
            ))
        })
    }

    /// Reverses the order of the items. Emits `Invalidated`.
    pub fn reverse_items(&self) -> Result<()> {
        self.mutate("reverse_items", |store| {
            store.reverse_in_place()?;
            Ok(((), vec![ChangeNotification::Invalidated]))
        })
    }

    /// Installs a whole new collection, returning the previous one. Emits
    /// `Invalidated`.
    ///
    /// This also initializes an adapter created with
    /// [`uninitialized`](Self::uninitialized).
    pub fn replace_items(&self, items: Vec<T>) -> Option<Vec<T>> {
        let _span = PerfSpan::new(span_names::REPLACE_ITEMS);
        let previous = self.store.write().install(items);
        tracing::debug!(target: targets::ADAPTER, op = "replace_items", "collection replaced");
        self.signals.changed.emit(ChangeNotification::Invalidated);
        previous
    }

    // -------------------------------------------------------------------------
    // Policy and listeners
    // -------------------------------------------------------------------------

    /// The policy used by [`set_items_at`](Self::set_items_at).
    pub fn replace_policy(&self) -> Arc<dyn ReplacePolicy<T>> {
        self.policy.read().clone()
    }

    /// Replaces the policy used by [`set_items_at`](Self::set_items_at).
    pub fn set_replace_policy(&self, policy: Arc<dyn ReplacePolicy<T>>) {
        *self.policy.write() = policy;
    }

    /// Installs the listener wired to every bound row's click dispatch.
    pub fn set_on_item_click<F>(&self, listener: F)
    where
        F: Fn(&V, usize) + Send + Sync + 'static,
    {
        *self.on_item_click.write() = Some(Arc::new(listener));
    }

    /// Removes the click listener. Rows bound afterwards get no click dispatch.
    pub fn clear_on_item_click(&self) {
        *self.on_item_click.write() = None;
    }

    /// Installs the listener wired to every bound row's long-click dispatch.
    pub fn set_on_item_long_click<F>(&self, listener: F)
    where
        F: Fn(&V, usize) -> bool + Send + Sync + 'static,
    {
        *self.on_item_long_click.write() = Some(Arc::new(listener));
    }

    /// Removes the long-click listener.
    pub fn clear_on_item_long_click(&self) {
        *self.on_item_long_click.write() = None;
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Creates a holder for a fresh view from `factory`, using the configured
    /// layout and resolving the configured sub-views up front.
    pub fn create_holder<F>(&self, factory: &F) -> Result<ViewHolder<V>>
    where
        F: ViewFactory<View = V>,
    {
        let view = factory.create(self.config.layout);
        tracing::trace!(target: targets::ADAPTER, layout = %self.config.layout, "created row view");
        ViewHolder::with_preloaded(view, &self.config.sub_view_ids)
    }

    /// Binds the item at `position` to `holder`.
    ///
    /// Runs the render callback with the holder, the position and the item,
    /// then wires the click and long-click listeners (if any) to the holder's
    /// view. Does not emit a notification.
    #[tracing::instrument(skip(self, holder), target = "rowbind::adapter", level = "trace")]
    pub fn bind_row(&self, position: usize, holder: &mut ViewHolder<V>) -> Result<()> {
        {
            let store = self.store.read();
            let item = store.get(position)?;
            holder.set_position(position);
            (self.render)(holder, position, item);
        }
        self.wire_listeners(position, holder);
        Ok(())
    }

    fn wire_listeners(&self, position: usize, holder: &mut ViewHolder<V>) {
        let click = self.on_item_click.read().clone().map(|listener| {
            let dispatch: ClickDispatch<V> = Arc::new(move |view: &V| listener(view, position));
            dispatch
        });
        let long_click = self.on_item_long_click.read().clone().map(|listener| {
            let dispatch: LongClickDispatch<V> =
                Arc::new(move |view: &V| listener(view, position));
            dispatch
        });

        let view = holder.view_mut();
        view.set_click_dispatch(click);
        view.set_long_click_dispatch(long_click);
    }

    /// Applies `f` under the write lock, then emits the notifications it
    /// returns once the lock is released.
    fn mutate<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut ItemStore<T>) -> Result<(R, Vec<ChangeNotification>)>,
    ) -> Result<R> {
        let result = f(&mut self.store.write());
        match result {
            Ok((value, changes)) => {
                tracing::debug!(target: targets::ADAPTER, op, ?changes, "collection mutated");
                self.signals.emit_all(changes);
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(target: targets::ADAPTER, op, %err, "mutation rejected");
                Err(err)
            }
        }
    }
}

impl<T, V> Adapter<T, V>
where
    T: Clone + Send + Sync + 'static,
    V: ItemView,
{
    /// A clone of the item at `pos`.
    pub fn item(&self, pos: usize) -> Result<T> {
        self.with_item(pos, T::clone)
    }

    /// A snapshot of all items.
    pub fn items(&self) -> Result<Vec<T>> {
        Ok(self.store.read().as_slice()?.to_vec())
    }
}

impl<T, V> Adapter<T, V>
where
    T: PartialEq + Send + Sync + 'static,
    V: ItemView,
{
    /// Removes the first item equal to `item`.
    ///
    /// Emits `ItemsRemoved(pos, 1)` if one was found and nothing otherwise.
    pub fn remove_value(&self, item: &T) -> Result<Option<T>> {
        self.mutate("remove_value", |store| match store.position_of(item)? {
            Some(pos) => {
                let removed = store.remove_at(pos)?;
                Ok((
                    Some(removed),
                    vec![ChangeNotification::ItemsRemoved { start: pos, count: 1 }],
                ))
            }
            None => Ok((None, Vec::new())),
        })
    }
}

impl<T, V: ItemView> fmt::Debug for Adapter<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("item_count", &self.store.read().count())
            .field("config", &self.config)
            .field("has_click_listener", &self.on_item_click.read().is_some())
            .field(
                "has_long_click_listener",
                &self.on_item_long_click.read().is_some(),
            )
            .finish()
    }
}
