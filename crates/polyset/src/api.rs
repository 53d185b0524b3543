//! Curated surface for transports and tools.
//!
//! Re-exports only; breaking changes follow the modules they point at.

// Geometry kernel
pub use crate::geom::{
    distinct_vertices, is_closed, normalize, rings_intersect, signed_area, to_wkt, validate_bounds, Point, Polygon,
    Ring, MAX_COORD, MIN_COORD, MIN_VERTICES,
};
// Random rings
pub use crate::geom::rand::{draw_ring, ReplayToken, RingCfg, VertexCount};
// Admission and batches
pub use crate::admit::{admit, AdmitError, ValidationError};
pub use crate::batch::{candidate, candidate_name, generate_batch, BatchCfg, BatchError, BatchReport};
// Read side and transport surface
pub use crate::cache::PolygonCache;
pub use crate::service::{BatchSummary, PolygonService};
// Storage
pub use crate::store::{JsonFileStore, MemoryStore, PolygonStore, StoreError, StoredPolygon};
