//! Named, non-overlapping polygons on a bounded plane.
//!
//! Layers, leaves first:
//! - `geom`: ring normalization, bounds, signed area, overlap predicate, random rings.
//! - `admit`: the admission gates a candidate must pass against a store.
//! - `batch`: parallel generate+admit with channel aggregation and reconciliation.
//! - `cache`: wholesale-refreshed snapshot of the store.
//! - `service`: the surface a transport calls.
//! - `store`: the storage interface and its bindings.
//!
//! API Policy
//! - Prefer `api` or `prelude` imports in callers; module paths may move.

pub mod admit;
pub mod api;
pub mod batch;
pub mod cache;
pub mod geom;
pub mod service;
pub mod store;

#[cfg(test)]
mod testing;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::admit::{admit, AdmitError, ValidationError};
    pub use crate::batch::{BatchCfg, BatchReport};
    pub use crate::geom::rand::{RingCfg, VertexCount};
    pub use crate::geom::{Point, Polygon, Ring};
    pub use crate::service::{BatchSummary, PolygonService};
    pub use crate::store::{JsonFileStore, MemoryStore, PolygonStore, StoreError};
}
