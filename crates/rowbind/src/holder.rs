//! Item views, the factory that creates them, and the holder that caches
//! their children.
//!
//! The adapter never constructs or destroys views itself. A host list widget
//! keeps a recycling pool of [`ViewHolder`]s, creating new ones through a
//! [`ViewFactory`] when the pool runs dry, and hands them to
//! [`Adapter::bind_row`](crate::Adapter::bind_row) to be filled with data.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::view_cache::{ViewCache, ViewId};

/// Identifier of the layout template an item view is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(pub u32);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layout#{}", self.0)
    }
}

/// Click handler installed on an item view by the adapter.
///
/// The view invokes it with itself when it is clicked.
pub type ClickDispatch<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Long-click handler installed on an item view by the adapter.
///
/// Returns `true` if the long click was consumed.
pub type LongClickDispatch<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// The view of a single list row, as seen by the adapter.
///
/// Implemented by the host's view type. The adapter only looks up children
/// and installs click dispatch; it never inspects the view otherwise.
pub trait ItemView: Sized + Send + Sync + 'static {
    /// Handle to a child view found inside this view.
    type Child: Send + Sync;

    /// Walks the view tree looking for the child with the given id.
    fn find_child(&self, id: ViewId) -> Option<Self::Child>;

    /// Installs (or with `None`, removes) the click handler.
    fn set_click_dispatch(&mut self, dispatch: Option<ClickDispatch<Self>>);

    /// Installs (or with `None`, removes) the long-click handler.
    fn set_long_click_dispatch(&mut self, dispatch: Option<LongClickDispatch<Self>>);
}

/// Builds fresh item views from a layout template.
pub trait ViewFactory {
    /// The kind of view produced.
    type View: ItemView;

    /// Creates a new, unbound view for `layout`.
    fn create(&self, layout: LayoutId) -> Self::View;
}

/// A recyclable row view together with its sub-view cache.
///
/// The holder remembers the position it was last bound to. Children looked
/// up through [`find_child`](Self::find_child) are cached for as long as the
/// holder lives, so rebinding a recycled holder skips the view traversal.
pub struct ViewHolder<V: ItemView> {
    view: V,
    cache: ViewCache<V::Child>,
    position: Option<usize>,
}

impl<V: ItemView> ViewHolder<V> {
    /// Wraps a view that has not been bound yet.
    pub fn new(view: V) -> Self {
        Self {
            view,
            cache: ViewCache::new(),
            position: None,
        }
    }

    /// Wraps a view and resolves `ids` immediately.
    pub fn with_preloaded(view: V, ids: &[ViewId]) -> Result<Self> {
        let mut holder = Self::new(view);
        let Self { view, cache, .. } = &mut holder;
        cache.preload(ids, |id| view.find_child(id))?;
        Ok(holder)
    }

    /// Returns the child with `id`, looking it up on first use.
    pub fn find_child(&mut self, id: ViewId) -> Result<&V::Child> {
        let view = &self.view;
        self.cache.resolve(id, |id| view.find_child(id))
    }

    /// The wrapped view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the wrapped view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The holder's sub-view cache.
    pub fn cache(&self) -> &ViewCache<V::Child> {
        &self.cache
    }

    /// The position this holder was last bound to, if any.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = Some(position);
    }

    /// Unwraps the holder, returning the view.
    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V: ItemView + fmt::Debug> fmt::Debug for ViewHolder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHolder")
            .field("view", &self.view)
            .field("cache", &self.cache)
            .field("position", &self.position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Row {
        children: Vec<u32>,
        lookups: Arc<AtomicUsize>,
        click: Option<ClickDispatch<Row>>,
        long_click: Option<LongClickDispatch<Row>>,
    }

    impl ItemView for Row {
        type Child = String;

        fn find_child(&self, id: ViewId) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.children
                .contains(&id.0)
                .then(|| format!("child-{}", id))
        }

        fn set_click_dispatch(&mut self, dispatch: Option<ClickDispatch<Row>>) {
            self.click = dispatch;
        }

        fn set_long_click_dispatch(&mut self, dispatch: Option<LongClickDispatch<Row>>) {
            self.long_click = dispatch;
        }
    }

    fn row(children: &[u32]) -> (Row, Arc<AtomicUsize>) {
        let lookups = Arc::new(AtomicUsize::new(0));
        let row = Row {
            children: children.to_vec(),
            lookups: lookups.clone(),
            click: None,
            long_click: None,
        };
        (row, lookups)
    }

    #[test]
    fn test_find_child_traverses_once() {
        let (view, lookups) = row(&[1, 2]);
        let mut holder = ViewHolder::new(view);

        assert_eq!(holder.find_child(ViewId(1)).unwrap(), "child-1");
        assert_eq!(holder.find_child(ViewId(1)).unwrap(), "child-1");
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert_eq!(holder.position(), None);
    }

    #[test]
    fn test_with_preloaded_fills_cache() {
        let (view, lookups) = row(&[1, 2, 3]);
        let mut holder = ViewHolder::with_preloaded(view, &[ViewId(1), ViewId(3)]).unwrap();

        assert_eq!(holder.cache().len(), 2);
        assert_eq!(lookups.load(Ordering::SeqCst), 2);

        holder.find_child(ViewId(3)).unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_with_preloaded_reports_missing_id() {
        let (view, _) = row(&[1]);
        let result = ViewHolder::with_preloaded(view, &[ViewId(1), ViewId(5)]);
        assert!(matches!(result, Err(AdapterError::NotFound(ViewId(5)))));
    }

    #[test]
    fn test_layout_id_display() {
        assert_eq!(LayoutId(7).to_string(), "layout#7");
    }
}
