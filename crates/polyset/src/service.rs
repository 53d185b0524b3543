//! Entry points for a transport layer (CLI, HTTP, ...).
//!
//! `PolygonService` owns the store handle and the read cache. Every successful
//! mutation is followed by a cache refresh; a failed refresh is logged and the
//! previous snapshot keeps serving reads.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::admit::{admit, AdmitError};
use crate::batch::{self, BatchCfg, BatchError, BatchReport};
use crate::cache::PolygonCache;
use crate::geom::{Point, Polygon};
use crate::store::{PolygonStore, StoreError};

/// Reply to a generation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub accepted_count: usize,
}

pub struct PolygonService<S> {
    store: S,
    cache: PolygonCache,
    batch: BatchCfg,
}

impl<S: PolygonStore> PolygonService<S> {
    /// Wrap `store` and load the initial cache snapshot.
    pub fn open(store: S, batch: BatchCfg) -> Result<Self, StoreError> {
        let svc = Self {
            store,
            cache: PolygonCache::new(),
            batch,
        };
        svc.cache.refresh(&svc.store)?;
        Ok(svc)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &PolygonCache {
        &self.cache
    }

    /// Reload the cache from the store.
    pub fn refresh(&self) -> Result<usize, StoreError> {
        self.cache.refresh(&self.store)
    }

    /// Every polygon as of the last refresh.
    pub fn list_cached(&self) -> Arc<Vec<Polygon>> {
        self.cache.snapshot()
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<Polygon> {
        self.cache.lookup_by_name(name)
    }

    /// Admit and store one polygon given as a raw counter-clockwise ring.
    pub fn submit_polygon(
        &self,
        points: Vec<Point>,
        name: impl Into<String>,
    ) -> Result<Polygon, AdmitError> {
        let polygon = admit(&self.store, Polygon::candidate(name, points))?;
        self.store.insert(&polygon)?;
        info!(name = %polygon.name, area = polygon.area, "polygon stored");
        self.refresh_after_write();
        Ok(polygon)
    }

    /// Run one batch of `size` attempts with the service's batch settings.
    pub fn generate_batch(&self, size: usize) -> Result<BatchSummary, BatchError> {
        let cfg = BatchCfg { size, ..self.batch };
        let report = self.generate_batch_with(&cfg)?;
        Ok(BatchSummary {
            accepted_count: report.accepted_count(),
        })
    }

    /// Run one batch with explicit settings and return the full report.
    pub fn generate_batch_with(&self, cfg: &BatchCfg) -> Result<BatchReport, BatchError> {
        let report = batch::generate_batch(&self.store, cfg)?;
        self.refresh_after_write();
        Ok(report)
    }

    fn refresh_after_write(&self) {
        if let Err(e) = self.cache.refresh(&self.store) {
            warn!(error = %e, "store write succeeded but cache is stale");
        }
    }
}
