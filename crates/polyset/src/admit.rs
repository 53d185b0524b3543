//! Admission pipeline: decide whether a candidate polygon may join the collection.
//!
//! Gates, in order (first failure aborts, nothing is written):
//! 1. at least `MIN_VERTICES` distinct vertices before closing (no store round-trip
//!    before this passes)
//! 2. name not taken in the store
//! 3. normalize (close + reverse)
//! 4. no overlap with stored polygons
//! 5. every vertex in bounds while computing the signed area
//!
//! Store checks are check-then-act: a concurrent writer may take the name or the
//! space before the caller inserts. Batches reconcile among themselves afterwards.

use thiserror::Error;
use tracing::debug;

use crate::geom::{distinct_vertices, normalize, signed_area, Polygon, MIN_VERTICES};
use crate::store::{PolygonStore, StoreError};

/// The candidate itself is unacceptable. Never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("a polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("polygon with name {name:?} already exists")]
    DuplicateName { name: String },

    #[error("polygon intersects polygons already stored")]
    Intersects,

    #[error("x and y bounds not satisfied")]
    OutOfBounds,
}

/// Why `admit` did not return a polygon.
#[derive(Error, Debug)]
pub enum AdmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AdmitError {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AdmitError::Validation(v) => Some(v),
            AdmitError::Store(_) => None,
        }
    }
}

/// Validate `candidate` against the store and return it normalized with its area.
pub fn admit<S: PolygonStore + ?Sized>(
    store: &S,
    candidate: Polygon,
) -> Result<Polygon, AdmitError> {
    let Polygon { name, points, .. } = candidate;

    let count = distinct_vertices(&points);
    if count < MIN_VERTICES {
        debug!(%name, count, "rejected: too few vertices");
        return Err(ValidationError::TooFewVertices { count }.into());
    }

    if store.exists(&name)? {
        debug!(%name, "rejected: duplicate name");
        return Err(ValidationError::DuplicateName { name }.into());
    }

    let points = normalize(points);

    if store.intersects(&points)? {
        debug!(%name, "rejected: intersects stored polygon");
        return Err(ValidationError::Intersects.into());
    }

    let Some(area) = signed_area(&points) else {
        debug!(%name, "rejected: out of bounds");
        return Err(ValidationError::OutOfBounds.into());
    };

    debug!(%name, area, vertices = points.len(), "admitted");
    Ok(Polygon { name, points, area })
}
