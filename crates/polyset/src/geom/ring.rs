//! Ring normalization, bounds, area and overlap.

use geo::{Coord, Intersects, LineString};

use super::cfg::{MAX_COORD, MIN_COORD};
use super::types::Point;

/// True when the ring repeats its first point at the end.
#[inline]
pub fn is_closed(ring: &[Point]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) => ring.len() > 1 && a == b,
        _ => false,
    }
}

/// Number of distinct vertices, ignoring a closing duplicate.
pub fn distinct_vertices(ring: &[Point]) -> usize {
    let open = if is_closed(ring) {
        &ring[..ring.len() - 1]
    } else {
        ring
    };
    open.iter()
        .enumerate()
        .filter(|&(i, p)| !open[..i].contains(p))
        .count()
}

/// Close the ring if open, then reverse it (counter-clockwise in, clockwise out).
///
/// Apply exactly once per candidate: the reversal is unconditional.
pub fn normalize(mut ring: Vec<Point>) -> Vec<Point> {
    if let Some(&first) = ring.first() {
        if !is_closed(&ring) {
            ring.push(first);
        }
    }
    ring.reverse();
    ring
}

/// `MIN_COORD <= x, y <= MAX_COORD`. NaN fails.
#[inline]
pub fn validate_bounds(p: &Point) -> bool {
    (MIN_COORD..=MAX_COORD).contains(&p.x) && (MIN_COORD..=MAX_COORD).contains(&p.y)
}

/// Signed shoelace area of a closed ring.
///
/// Sums over the pairs `(p[i], p[i+1])` only; the closing duplicate stands in for the
/// wraparound. Returns `None` as soon as a vertex is out of bounds, before its pair
/// contributes. The sign follows the winding (clockwise rings come out negative).
pub fn signed_area(ring: &[Point]) -> Option<f64> {
    let mut xy = 0.0;
    let mut yx = 0.0;
    for (i, p) in ring.iter().enumerate() {
        if !validate_bounds(p) {
            return None;
        }
        if let Some(q) = ring.get(i + 1) {
            xy += p.x * q.y;
            yx += p.y * q.x;
        }
    }
    Some((xy - yx) / 2.0)
}

fn to_geo(ring: &[Point]) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    geo::Polygon::new(LineString::new(coords), vec![])
}

/// Whether the two rings, read as filled polygons, share any point.
///
/// Boundary contact counts as intersection.
pub fn rings_intersect(a: &[Point], b: &[Point]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    to_geo(a).intersects(&to_geo(b))
}

/// Spatial text encoding `POLYGON((x y,x y,...))`, one decimal per coordinate.
pub fn to_wkt(ring: &[Point]) -> String {
    let body: Vec<String> = ring
        .iter()
        .map(|p| format!("{:.1} {:.1}", p.x, p.y))
        .collect();
    format!("POLYGON(({}))", body.join(","))
}
