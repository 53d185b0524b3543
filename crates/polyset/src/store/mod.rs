//! Polygon store interface and bindings.
//!
//! The store is the authoritative record of admitted polygons. The core only
//! issues requests through [`PolygonStore`]; each binding guards its own state.
//!
//! Bindings
//! - [`MemoryStore`]: process-local, for tests and dry runs.
//! - [`JsonFileStore`]: one JSON document of [`StoredPolygon`] records on disk.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{to_wkt, Point, Polygon};

/// Infrastructure failure, distinct from a logical `false`/"not found".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("store content is corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("name {name:?} is already taken in the store")]
    Conflict { name: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the core needs from persistent storage.
///
/// Implementations must be shareable across the batch workers.
pub trait PolygonStore: Send + Sync {
    /// Whether a polygon with exactly this name is stored.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Whether the closed ring overlaps or touches any stored polygon.
    fn intersects(&self, ring: &[Point]) -> StoreResult<bool>;

    fn insert(&self, polygon: &Polygon) -> StoreResult<()>;

    /// All-or-nothing insert of several polygons.
    fn insert_batch(&self, polygons: &[Polygon]) -> StoreResult<()>;

    /// Every stored polygon, in insertion order.
    fn list_all(&self) -> StoreResult<Vec<Polygon>>;
}

impl<S: PolygonStore + ?Sized> PolygonStore for std::sync::Arc<S> {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        (**self).exists(name)
    }
    fn intersects(&self, ring: &[Point]) -> StoreResult<bool> {
        (**self).intersects(ring)
    }
    fn insert(&self, polygon: &Polygon) -> StoreResult<()> {
        (**self).insert(polygon)
    }
    fn insert_batch(&self, polygons: &[Polygon]) -> StoreResult<()> {
        (**self).insert_batch(polygons)
    }
    fn list_all(&self) -> StoreResult<Vec<Polygon>> {
        (**self).list_all()
    }
}

/// Persisted record: the ring as `{x, y}` pairs plus the redundant spatial text
/// encoding consulted only by the intersection predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredPolygon {
    pub name: String,
    pub area: f64,
    pub points: Vec<Point>,
    pub wkt: String,
}

impl From<&Polygon> for StoredPolygon {
    fn from(p: &Polygon) -> Self {
        Self {
            name: p.name.clone(),
            area: p.area,
            points: p.points.clone(),
            wkt: to_wkt(&p.points),
        }
    }
}

impl From<StoredPolygon> for Polygon {
    fn from(s: StoredPolygon) -> Self {
        Polygon {
            name: s.name,
            points: s.points,
            area: s.area,
        }
    }
}

/// Reject a batch whose names collide with each other or with `taken`.
fn check_unique<'a>(
    taken: impl Fn(&str) -> bool,
    incoming: impl IntoIterator<Item = &'a Polygon>,
) -> StoreResult<()> {
    let mut seen = std::collections::HashSet::new();
    for p in incoming {
        if taken(&p.name) || !seen.insert(p.name.as_str()) {
            return Err(StoreError::Conflict {
                name: p.name.clone(),
            });
        }
    }
    Ok(())
}
