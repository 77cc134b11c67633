//! The ordered item collection behind an adapter.
//!
//! `ItemStore<T>` owns the items and offers checked positional primitives.
//! It knows nothing about notifications; the adapter pairs each primitive
//! with the [`ChangeNotification`](crate::ChangeNotification) it implies.
//!
//! A store may be *uninitialized*, meaning no collection has been installed
//! yet. Every operation except [`install`](ItemStore::install) and the count
//! queries fails with [`AdapterError::UninitializedCollection`] in that state.

use rowbind_core::logging::targets;

use crate::error::{AdapterError, Result};
use crate::notification::ChangeNotification;
use crate::policy::ReplacePolicy;

/// An ordered, mutable collection of items with checked access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStore<T> {
    items: Option<Vec<T>>,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemStore<T> {
    /// Creates an empty, initialized store.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a store seeded with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self { items: Some(items) }
    }

    /// Creates a store with no collection installed.
    pub fn uninitialized() -> Self {
        Self { items: None }
    }

    /// Returns `true` once a collection has been installed.
    pub fn is_initialized(&self) -> bool {
        self.items.is_some()
    }

    /// Installs a whole new collection, returning the previous one.
    pub fn install(&mut self, items: Vec<T>) -> Option<Vec<T>> {
        tracing::debug!(target: targets::STORE, len = items.len(), "installing collection");
        self.items.replace(items)
    }

    /// Number of items, or `None` if uninitialized.
    pub fn count(&self) -> Option<usize> {
        self.items.as_ref().map(Vec::len)
    }

    /// Number of items; an uninitialized store counts as empty.
    pub fn len(&self) -> usize {
        self.count().unwrap_or(0)
    }

    /// Returns `true` if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The items as a slice.
    pub fn as_slice(&self) -> Result<&[T]> {
        self.items().map(Vec::as_slice)
    }

    /// The item at `pos`.
    pub fn get(&self, pos: usize) -> Result<&T> {
        let items = self.items()?;
        items
            .get(pos)
            .ok_or(AdapterError::out_of_range(pos, items.len()))
    }

    /// Appends `item`, returning its position.
    pub fn append(&mut self, item: T) -> Result<usize> {
        let items = self.items_mut()?;
        items.push(item);
        Ok(items.len() - 1)
    }

    /// Appends all of `items`, returning the count before the append.
    pub fn extend(&mut self, new_items: Vec<T>) -> Result<usize> {
        let items = self.items_mut()?;
        let old_len = items.len();
        items.extend(new_items);
        Ok(old_len)
    }

    /// Inserts `item` at `pos`, shifting later items up. `pos` may equal the
    /// length.
    pub fn insert(&mut self, pos: usize, item: T) -> Result<()> {
        let items = self.items_mut()?;
        check_insert(pos, items.len())?;
        items.insert(pos, item);
        Ok(())
    }

    /// Inserts all of `new_items` starting at `pos`, preserving their order.
    pub fn insert_all(&mut self, pos: usize, new_items: Vec<T>) -> Result<()> {
        let items = self.items_mut()?;
        check_insert(pos, items.len())?;
        items.splice(pos..pos, new_items);
        Ok(())
    }

    /// Replaces the item at `pos`, returning the old one.
    pub fn set(&mut self, pos: usize, item: T) -> Result<T> {
        let items = self.items_mut()?;
        let len = items.len();
        let slot = items
            .get_mut(pos)
            .ok_or(AdapterError::out_of_range(pos, len))?;
        Ok(std::mem::replace(slot, item))
    }

    /// Overwrites `[start, start + new_items.len())` in place.
    ///
    /// The whole range must already exist; nothing is written otherwise.
    pub fn overwrite(&mut self, start: usize, new_items: Vec<T>) -> Result<()> {
        let items = self.items_mut()?;
        let len = items.len();
        let end = start
            .checked_add(new_items.len())
            .filter(|&end| end <= len)
            .ok_or(AdapterError::out_of_range(start.max(len), len))?;
        for (slot, item) in items[start..end].iter_mut().zip(new_items) {
            *slot = item;
        }
        Ok(())
    }

    /// Removes and returns the item at `pos`, shifting later items down.
    pub fn remove_at(&mut self, pos: usize) -> Result<T> {
        let items = self.items_mut()?;
        if pos >= items.len() {
            return Err(AdapterError::out_of_range(pos, items.len()));
        }
        Ok(items.remove(pos))
    }

    /// Removes `count` consecutive items starting at `start`.
    ///
    /// The full range is validated before anything is removed, so a failing
    /// call leaves the store untouched. The range is then spliced out in one
    /// step, which removes exactly the `count` logical items that were at
    /// `start..start + count` when the call began.
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<Vec<T>> {
        let items = self.items_mut()?;
        let len = items.len();
        let end = start
            .checked_add(count)
            .ok_or(AdapterError::out_of_range(usize::MAX, len))?;
        if start > len || end > len {
            return Err(AdapterError::out_of_range(start.max(len), len));
        }
        Ok(items.drain(start..end).collect())
    }

    /// Removes every item, returning how many there were.
    pub fn clear(&mut self) -> Result<usize> {
        let items = self.items_mut()?;
        let old_len = items.len();
        items.clear();
        Ok(old_len)
    }

    /// Reverses the order of the items.
    pub fn reverse_in_place(&mut self) -> Result<()> {
        self.items_mut()?.reverse();
        Ok(())
    }

    /// Writes `new_items` over the collection starting at `start`.
    ///
    /// When the slice ends exactly at the end of the collection the items are
    /// written directly. Otherwise `policy` decides what happens to the part
    /// that overhangs (overflow) or falls short of (underflow) the end.
    /// `start` beyond the end of the collection is always an error.
    ///
    /// Returns the notifications describing what changed.
    pub fn replace_range(
        &mut self,
        start: usize,
        new_items: Vec<T>,
        policy: &dyn ReplacePolicy<T>,
    ) -> Result<Vec<ChangeNotification>> {
        let len = self.items()?.len();
        if start > len {
            return Err(AdapterError::out_of_range(start, len));
        }

        let end = start + new_items.len();
        if end == len {
            let count = new_items.len();
            tracing::debug!(target: targets::STORE, start, count, "exact-fit replace");
            self.overwrite(start, new_items)?;
            Ok(vec![ChangeNotification::ItemsRangeChanged { start, count }])
        } else if end > len {
            tracing::debug!(target: targets::STORE, start, incoming = new_items.len(), len, "replace overflows");
            policy.on_overflow(self, new_items, start)
        } else {
            tracing::debug!(target: targets::STORE, start, incoming = new_items.len(), len, "replace underflows");
            policy.on_underflow(self, new_items, start)
        }
    }

    /// Consumes the store, returning the collection if one was installed.
    pub fn into_inner(self) -> Option<Vec<T>> {
        self.items
    }

    fn items(&self) -> Result<&Vec<T>> {
        self.items
            .as_ref()
            .ok_or(AdapterError::UninitializedCollection)
    }

    fn items_mut(&mut self) -> Result<&mut Vec<T>> {
        self.items
            .as_mut()
            .ok_or(AdapterError::UninitializedCollection)
    }
}

impl<T: PartialEq> ItemStore<T> {
    /// Position of the first item equal to `item`.
    pub fn position_of(&self, item: &T) -> Result<Option<usize>> {
        Ok(self.items()?.iter().position(|candidate| candidate == item))
    }
}

fn check_insert(pos: usize, len: usize) -> Result<()> {
    if pos > len {
        Err(AdapterError::out_of_range(pos, len))
    } else {
        Ok(())
    }
}
