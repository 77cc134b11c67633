//! Error types for adapter operations.

use crate::view_cache::ViewId;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors surfaced by the item store, the replace policies, the view cache
/// and the adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A position or range fell outside the collection.
    ///
    /// `index` is the first offending position and `len` the collection
    /// length at the time of the call.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A sub-view identifier resolved to nothing in the item view.
    #[error("no sub-view with id {0} in the item view")]
    NotFound(ViewId),

    /// The adapter has no backing collection yet.
    #[error("the item collection has not been initialized")]
    UninitializedCollection,
}

impl AdapterError {
    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

/// Errors produced while loading an [`AdapterConfig`](crate::AdapterConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing or deserialization error.
    #[error("invalid adapter config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The same sub-view id was declared more than once.
    #[error("sub-view id {0} declared more than once")]
    DuplicateViewId(ViewId),
}
