//! Atomically swappable content index.
//!
//! Readers take a cheap [`Arc`] clone of the current index and keep using it
//! for the whole request. A rebuild constructs the replacement without
//! holding the lock, then swaps the pointer, so readers only ever observe a
//! complete index.

use std::sync::{Arc, PoisonError, RwLock};

use log::info;
use reelmatch_core::MovieCatalog;

use crate::ContentIndex;

/// Shared handle to the current [`ContentIndex`].
///
/// # Examples
/// ```
/// use reelmatch_core::{CatalogSnapshot, Movie};
/// use reelmatch_index::SharedContentIndex;
///
/// let shared = SharedContentIndex::default();
/// let before = shared.snapshot();
/// shared.rebuild(&CatalogSnapshot::new([Movie::new("1", "A").with_genres(["Drama"])]));
/// assert!(before.is_empty());
/// assert_eq!(shared.snapshot().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SharedContentIndex {
    current: RwLock<Arc<ContentIndex>>,
}

impl SharedContentIndex {
    /// Wrap an already-built index.
    #[must_use]
    pub fn new(index: ContentIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Build the initial index from `catalog`.
    #[must_use]
    pub fn build<C>(catalog: &C) -> Self
    where
        C: MovieCatalog + ?Sized,
    {
        Self::new(ContentIndex::build(catalog))
    }

    /// The current complete index.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ContentIndex> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a complete index.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `index`, returning the one it replaces.
    pub fn replace(&self, index: ContentIndex) -> Arc<ContentIndex> {
        let fresh = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, fresh)
    }

    /// Rebuild from `catalog` and publish the result.
    ///
    /// Returns the newly published index.
    pub fn rebuild<C>(&self, catalog: &C) -> Arc<ContentIndex>
    where
        C: MovieCatalog + ?Sized,
    {
        let fresh = Arc::new(ContentIndex::build(catalog));
        {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = Arc::clone(&fresh);
        }
        info!("published content index with {} movies", fresh.len());
        fresh
    }
}
