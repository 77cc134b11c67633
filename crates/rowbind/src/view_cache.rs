//! Per-view sub-view lookup cache.
//!
//! Finding a child view inside a row's view tree is a traversal. A row is
//! bound over and over as it is recycled, so every holder memoizes the
//! children it has already looked up, keyed by the caller-declared [`ViewId`].

use std::collections::HashMap;
use std::fmt;

use rowbind_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};

/// Identifier of a sub-view inside an item view.
///
/// Ids are declared by the caller (see
/// [`AdapterConfig::sub_view_ids`](crate::AdapterConfig)) and are only required
/// to be unique within one item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u32);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ViewId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Memoized `ViewId -> child` lookups for a single item view.
///
/// Entries are never evicted; they live exactly as long as the cache, which
/// is owned by the [`ViewHolder`](crate::ViewHolder) of the view they came
/// from. A lookup that finds nothing is reported as
/// [`AdapterError::NotFound`] and leaves no entry behind, so the next call
/// for that id performs the lookup again.
pub struct ViewCache<C> {
    entries: HashMap<ViewId, C>,
}

impl<C> Default for ViewCache<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ViewCache<C> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Resolves `id`, running `lookup` only if the id has not been resolved
    /// before.
    pub fn resolve<F>(&mut self, id: ViewId, lookup: F) -> Result<&C>
    where
        F: FnOnce(ViewId) -> Option<C>,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(id) {
            Entry::Occupied(entry) => {
                tracing::trace!(target: targets::VIEW_CACHE, %id, "cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::trace!(target: targets::VIEW_CACHE, %id, "cache miss, looking up");
                match lookup(id) {
                    Some(child) => Ok(entry.insert(child)),
                    None => Err(AdapterError::NotFound(id)),
                }
            }
        }
    }

    /// Resolves every id in `ids` up front.
    ///
    /// Stops at the first id that resolves to nothing; ids resolved before it
    /// stay cached.
    pub fn preload<F>(&mut self, ids: &[ViewId], mut lookup: F) -> Result<()>
    where
        F: FnMut(ViewId) -> Option<C>,
    {
        for &id in ids {
            self.resolve(id, &mut lookup)?;
        }
        Ok(())
    }

    /// Returns the cached child for `id` without performing a lookup.
    pub fn get(&self, id: ViewId) -> Option<&C> {
        self.entries.get(&id)
    }

    /// Returns `true` if `id` has been resolved.
    pub fn contains(&self, id: ViewId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of resolved ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> fmt::Debug for ViewCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort();
        f.debug_struct("ViewCache").field("resolved", &ids).finish()
    }
}

static_assertions::assert_impl_all!(ViewCache<String>: Send, Sync);
