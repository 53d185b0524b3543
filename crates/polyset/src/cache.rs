//! Read-mostly snapshot of every stored polygon.
//!
//! The store stays authoritative; this is a disposable mirror that is replaced
//! wholesale by [`PolygonCache::refresh`], never patched. Readers may see a stale
//! snapshot between a store write and the next refresh.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::geom::Polygon;
use crate::store::{PolygonStore, StoreError};

#[derive(Debug, Default)]
pub struct PolygonCache {
    snap: ArcSwap<Vec<Polygon>>,
}

impl PolygonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with `store.list_all()`. On error the previous snapshot stays.
    pub fn refresh<S: PolygonStore + ?Sized>(&self, store: &S) -> Result<usize, StoreError> {
        match store.list_all() {
            Ok(all) => {
                let n = all.len();
                self.snap.store(Arc::new(all));
                debug!(polygons = n, "cache refreshed");
                Ok(n)
            }
            Err(e) => {
                warn!(error = %e, "cache refresh failed; keeping last snapshot");
                Err(e)
            }
        }
    }

    /// Current snapshot, cheap to clone and safe to hold across refreshes.
    #[inline]
    pub fn snapshot(&self) -> Arc<Vec<Polygon>> {
        self.snap.load_full()
    }

    /// Linear scan by exact name.
    pub fn lookup_by_name(&self, name: &str) -> Option<Polygon> {
        self.snap.load().iter().find(|p| p.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.snap.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
