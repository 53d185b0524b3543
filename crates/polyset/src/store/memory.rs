use parking_lot::RwLock;

use super::{check_unique, PolygonStore, StoreResult};
use crate::geom::{rings_intersect, Point, Polygon};

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Polygon>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with polygons that bypass admission.
    pub fn with_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            rows: RwLock::new(polygons),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl PolygonStore for MemoryStore {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.rows.read().iter().any(|p| p.name == name))
    }

    fn intersects(&self, ring: &[Point]) -> StoreResult<bool> {
        Ok(self
            .rows
            .read()
            .iter()
            .any(|p| rings_intersect(&p.points, ring)))
    }

    fn insert(&self, polygon: &Polygon) -> StoreResult<()> {
        self.insert_batch(std::slice::from_ref(polygon))
    }

    fn insert_batch(&self, polygons: &[Polygon]) -> StoreResult<()> {
        let mut rows = self.rows.write();
        check_unique(|name| rows.iter().any(|p| p.name == name), polygons)?;
        rows.extend_from_slice(polygons);
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Polygon>> {
        Ok(self.rows.read().clone())
    }
}
