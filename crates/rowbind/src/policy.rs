//! Strategies for bulk positional replacement.
//!
//! [`Adapter::set_items_at`](crate::Adapter::set_items_at) writes a slice of
//! new items over the collection starting at some offset. When the slice ends
//! exactly where the collection ends the items are simply written. When it
//! does not, a [`ReplacePolicy`] decides what happens:
//!
//! - **overflow**: the slice runs past the end of the collection
//! - **underflow**: the slice stops short of the end of the collection
//!
//! Three policies are provided:
//!
//! | policy | overflow | underflow |
//! |---|---|---|
//! | [`Overwrite`] (default) | overwrite the overlap, drop the tail | overwrite the slice |
//! | [`Grow`] | overwrite the overlap, append the tail | overwrite the slice |
//! | [`Strict`] | fail, nothing written | overwrite the slice |
//!
//! # Custom policies
//!
//! ```ignore
//! use rowbind::{ChangeNotification, ItemStore, ReplacePolicy, Result};
//!
//! /// Replaces the whole tail with the incoming items.
//! struct Truncate;
//!
//! impl<T> ReplacePolicy<T> for Truncate {
//!     fn on_overflow(&self, store: &mut ItemStore<T>, items: Vec<T>, start: usize)
//!         -> Result<Vec<ChangeNotification>> { /* ... */ }
//!
//!     fn on_underflow(&self, store: &mut ItemStore<T>, items: Vec<T>, start: usize)
//!         -> Result<Vec<ChangeNotification>> { /* ... */ }
//! }
//! ```

use std::sync::Arc;

use rowbind_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};
use crate::notification::ChangeNotification;
use crate::store::ItemStore;

/// Decides how a misaligned bulk replacement is merged into the collection.
///
/// [`ItemStore::replace_range`] only calls these with `start <= store.len()`
/// and with the matching kind of misalignment. The built-in policies also
/// accept any other input when called directly: a `start` past the end is
/// reported as [`AdapterError::IndexOutOfRange`], never a panic. They return
/// the notifications describing what they changed, in the order the host
/// should see them.
pub trait ReplacePolicy<T>: Send + Sync {
    /// Called when `start + items.len() > store.len()`.
    fn on_overflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>>;

    /// Called when `start + items.len() < store.len()`.
    fn on_underflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>>;
}

/// Overwrites what fits and never changes the item count.
///
/// Overflowing items are discarded. Callers that need the collection to grow
/// should use [`Grow`] or the adapter's insertion methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overwrite;

impl<T> ReplacePolicy<T> for Overwrite {
    fn on_overflow(
        &self,
        store: &mut ItemStore<T>,
        mut items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        let room = room_after(store, start)?;
        let incoming = items.len();
        items.truncate(room);
        let count = items.len();
        store.overwrite(start, items)?;
        tracing::debug!(target: targets::POLICY, start, count, dropped = incoming - count, "overflow: tail discarded");
        Ok(vec![ChangeNotification::ItemsRangeChanged { start, count }])
    }

    fn on_underflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        let count = items.len();
        store.overwrite(start, items)?;
        tracing::debug!(target: targets::POLICY, start, count, "underflow: slice overwritten");
        Ok(vec![ChangeNotification::ItemsRangeChanged { start, count }])
    }
}

/// Overwrites what fits and appends the rest.
///
/// On overflow this reports the overwritten range (when non-empty) followed
/// by the appended range.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grow;

impl<T> ReplacePolicy<T> for Grow {
    fn on_overflow(
        &self,
        store: &mut ItemStore<T>,
        mut items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        let room = room_after(store, start)?;
        let tail = items.split_off(room.min(items.len()));
        let count = items.len();
        let tail_len = tail.len();

        store.overwrite(start, items)?;
        let old_len = store.extend(tail)?;
        tracing::debug!(target: targets::POLICY, start, count, appended = tail_len, "overflow: tail appended");

        let mut changes = Vec::with_capacity(2);
        if count > 0 {
            changes.push(ChangeNotification::ItemsRangeChanged { start, count });
        }
        if tail_len > 0 {
            changes.push(ChangeNotification::ItemsInserted {
                start: old_len,
                count: tail_len,
            });
        }
        Ok(changes)
    }

    fn on_underflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        Overwrite.on_underflow(store, items, start)
    }
}

/// Refuses replacements that run past the end of the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl<T> ReplacePolicy<T> for Strict {
    fn on_overflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        let len = store.len();
        tracing::debug!(target: targets::POLICY, start, incoming = items.len(), len, "overflow rejected");
        let last = start.saturating_add(items.len().saturating_sub(1));
        Err(AdapterError::out_of_range(last, len))
    }

    fn on_underflow(
        &self,
        store: &mut ItemStore<T>,
        items: Vec<T>,
        start: usize,
    ) -> Result<Vec<ChangeNotification>> {
        Overwrite.on_underflow(store, items, start)
    }
}

/// Number of existing items from `start` to the end of the collection.
fn room_after<T>(store: &ItemStore<T>, start: usize) -> Result<usize> {
    let len = store.len();
    len.checked_sub(start)
        .ok_or(AdapterError::out_of_range(start, len))
}

/// Names the built-in policies, for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceMode {
    /// [`Overwrite`]: only cover existing items.
    #[default]
    CoverOnly,
    /// [`Grow`]: cover existing items and append the excess.
    CoverAppend,
    /// [`Strict`]: report an error when items do not fit.
    ShowError,
}

impl ReplaceMode {
    /// Instantiates the policy this mode names.
    pub fn policy<T: 'static>(self) -> Arc<dyn ReplacePolicy<T>> {
        match self {
            Self::CoverOnly => Arc::new(Overwrite),
            Self::CoverAppend => Arc::new(Grow),
            Self::ShowError => Arc::new(Strict),
        }
    }
}
