//! Store doubles for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::geom::{Point, Polygon};
use crate::store::{PolygonStore, StoreError, StoreResult};

/// Wraps a store, counting every call and optionally failing them.
pub struct CountingStore<S> {
    inner: S,
    calls: AtomicUsize,
    fail_all: AtomicBool,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
}

impl<S: PolygonStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_all: AtomicBool::new(false),
            fail_list: AtomicBool::new(false),
            fail_insert: AtomicBool::new(false),
        }
    }

    /// Every call returns `Unavailable`.
    pub fn failing(self) -> Self {
        self.fail_all.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_fail_list(&self, on: bool) {
        self.fail_list.store(on, Ordering::SeqCst);
    }

    pub fn set_fail_insert(&self, on: bool) {
        self.fail_insert.store(on, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn enter(&self, extra: &AtomicBool) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) || extra.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "injected".to_string(),
            });
        }
        Ok(())
    }
}

impl<S: PolygonStore> PolygonStore for CountingStore<S> {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        self.enter(&self.fail_all)?;
        self.inner.exists(name)
    }
    fn intersects(&self, ring: &[Point]) -> StoreResult<bool> {
        self.enter(&self.fail_all)?;
        self.inner.intersects(ring)
    }
    fn insert(&self, polygon: &Polygon) -> StoreResult<()> {
        self.enter(&self.fail_insert)?;
        self.inner.insert(polygon)
    }
    fn insert_batch(&self, polygons: &[Polygon]) -> StoreResult<()> {
        self.enter(&self.fail_insert)?;
        self.inner.insert_batch(polygons)
    }
    fn list_all(&self) -> StoreResult<Vec<Polygon>> {
        self.enter(&self.fail_list)?;
        self.inner.list_all()
    }
}
