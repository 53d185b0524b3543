//! Point, ring and polygon records.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A vertex on the plane. Bounds are checked at admission, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered polygon boundary. Traversal order is significant.
pub type Ring = Vec<Point>;

/// A named polygon.
///
/// Invariants once admitted:
/// - `points` is closed (first == last) and clockwise, with at least 4 entries.
/// - `area` is the signed shoelace area of `points`, computed once at admission.
/// - `name` is unique across the collection (exact byte equality).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub name: String,
    pub points: Ring,
    #[serde(default)]
    pub area: f64,
}

impl Polygon {
    /// Unadmitted candidate: raw ring, zero area.
    pub fn candidate(name: impl Into<String>, points: Ring) -> Self {
        Self {
            name: name.into(),
            points,
            area: 0.0,
        }
    }
}
