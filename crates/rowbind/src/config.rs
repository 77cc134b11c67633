//! Adapter configuration.
//!
//! An [`AdapterConfig`] names the layout every row is built from and the
//! sub-views each row exposes. It can be built in code:
//!
//! ```
//! use rowbind::{AdapterConfig, LayoutId, ViewId};
//!
//! let config = AdapterConfig::new(LayoutId(3))
//!     .with_sub_view_ids([ViewId(10), ViewId(11)]);
//! assert_eq!(config.sub_view_ids.len(), 2);
//! ```
//!
//! or loaded from TOML:
//!
//! ```
//! use rowbind::{AdapterConfig, InsertNotification, ReplaceMode};
//!
//! let config = AdapterConfig::from_toml_str(r#"
//!     layout = 3
//!     sub_view_ids = [10, 11]
//!     insert_notification = "inserted"
//!     replace_mode = "cover-append"
//! "#).unwrap();
//!
//! assert_eq!(config.insert_notification, InsertNotification::Inserted);
//! assert_eq!(config.replace_mode, ReplaceMode::CoverAppend);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::holder::LayoutId;
use crate::policy::ReplaceMode;
use crate::view_cache::ViewId;

/// Which notification [`Adapter::insert_item`](crate::Adapter::insert_item)
/// emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertNotification {
    /// Report the insertion as `ItemChanged(pos)`.
    ///
    /// This is the legacy behavior some hosts depend on: the host redraws the
    /// row at `pos` and re-queries the count on its next layout pass.
    #[default]
    Changed,
    /// Report the insertion as `ItemInserted(pos)`.
    Inserted,
}

/// Construction-time configuration of an [`Adapter`](crate::Adapter).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Layout template every row view is created from.
    pub layout: LayoutId,
    /// Sub-views resolved eagerly when a holder is created.
    pub sub_view_ids: Vec<ViewId>,
    /// Notification kind for positional inserts.
    pub insert_notification: InsertNotification,
    /// Replace policy installed when the adapter is created.
    pub replace_mode: ReplaceMode,
}

impl AdapterConfig {
    /// Creates a configuration for `layout` with no declared sub-views.
    pub fn new(layout: LayoutId) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    /// Sets the sub-views resolved when a holder is created.
    pub fn with_sub_view_ids(mut self, ids: impl IntoIterator<Item = ViewId>) -> Self {
        self.sub_view_ids = ids.into_iter().collect();
        self
    }

    /// Sets the notification kind for positional inserts.
    pub fn with_insert_notification(mut self, kind: InsertNotification) -> Self {
        self.insert_notification = kind;
        self
    }

    /// Sets the initial replace policy.
    pub fn with_replace_mode(mut self, mode: ReplaceMode) -> Self {
        self.replace_mode = mode;
        self
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that no sub-view id is declared twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.sub_view_ids.len());
        for &id in &self.sub_view_ids {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateViewId(id));
            }
        }
        Ok(())
    }
}
