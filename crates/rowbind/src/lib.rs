//! Rowbind: binds item collections to recyclable list row views.
//!
//! A host list widget shows a scrolling list by repeatedly asking "how many
//! rows are there?" and "fill this recycled row view with the item at
//! position *n*". Rowbind answers both and keeps the host informed of every
//! change to the underlying collection.
//!
//! # Overview
//!
//! - [`Adapter`]: owns the items, performs mutations and binds rows
//! - [`ItemStore`]: the ordered collection with checked positional access
//! - [`ReplacePolicy`]: decides how misaligned bulk replacements are merged
//! - [`ViewHolder`] and [`ViewCache`]: a row view plus its resolved sub-views
//! - [`ChangeNotification`]: what the host is told after each mutation
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use rowbind::{
//!     Adapter, AdapterConfig, ChangeNotification, ClickDispatch, ItemView, LayoutId,
//!     LongClickDispatch, ViewFactory, ViewHolder, ViewId,
//! };
//!
//! const NAME: ViewId = ViewId(1);
//!
//! #[derive(Default)]
//! struct Row {
//!     text: String,
//! }
//!
//! impl ItemView for Row {
//!     type Child = ViewId;
//!
//!     fn find_child(&self, id: ViewId) -> Option<ViewId> {
//!         (id == NAME).then_some(id)
//!     }
//!
//!     fn set_click_dispatch(&mut self, _: Option<ClickDispatch<Self>>) {}
//!     fn set_long_click_dispatch(&mut self, _: Option<LongClickDispatch<Self>>) {}
//! }
//!
//! struct Rows;
//!
//! impl ViewFactory for Rows {
//!     type View = Row;
//!
//!     fn create(&self, _layout: LayoutId) -> Row {
//!         Row::default()
//!     }
//! }
//!
//! let adapter = Adapter::new(
//!     AdapterConfig::new(LayoutId(1)).with_sub_view_ids([NAME]),
//!     |holder: &mut ViewHolder<Row>, _pos, name: &String| {
//!         holder.view_mut().text = name.clone();
//!     },
//! );
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let recv = changes.clone();
//! adapter.signals().changed.connect(move |c| recv.lock().push(*c));
//!
//! adapter.add_item("Ada".to_string()).unwrap();
//! adapter.add_item("Grace".to_string()).unwrap();
//!
//! let mut holder = adapter.create_holder(&Rows).unwrap();
//! adapter.bind_row(1, &mut holder).unwrap();
//!
//! assert_eq!(holder.view().text, "Grace");
//! assert_eq!(
//!     *changes.lock(),
//!     vec![ChangeNotification::ItemInserted(0), ChangeNotification::ItemInserted(1)]
//! );
//! ```
//!
//! # Logging
//!
//! Every module logs through `tracing` under the targets listed in
//! [`logging::targets`]. Set `RUST_LOG=rowbind=debug` with a
//! `tracing-subscriber` env filter to see each mutation and the
//! notifications it produced.

pub mod adapter;
pub mod config;
pub mod error;
pub mod holder;
pub mod notification;
pub mod policy;
pub mod store;
pub mod view_cache;

pub use adapter::{Adapter, ItemClickListener, ItemLongClickListener, RenderCallback};
pub use config::{AdapterConfig, InsertNotification};
pub use error::{AdapterError, ConfigError, Result};
pub use holder::{ClickDispatch, ItemView, LayoutId, LongClickDispatch, ViewFactory, ViewHolder};
pub use notification::{AdapterSignals, ChangeNotification, NotificationSink};
pub use policy::{Grow, Overwrite, ReplaceMode, ReplacePolicy, Strict};
pub use store::ItemStore;
pub use view_cache::{ViewCache, ViewId};

pub use rowbind_core::{ConnectionId, PerfSpan, Signal, logging};
