//! Planar polygon geometry on the bounded coordinate plane.
//!
//! Purpose
//! - Provide the pure kernel used by admission: ring normalization, bounds checks,
//!   signed shoelace area, and the ring/ring intersection predicate.
//! - Keep everything free of I/O and shared state so it can run on any worker.
//!
//! Conventions
//! - Producers hand in counter-clockwise rings; `normalize` closes and reverses them
//!   into the clockwise form the spatial encoding expects.
//! - Coordinates live in `[MIN_COORD, MAX_COORD]` on a flat Cartesian plane.
//!
//! Code cross-refs: `Point`, `Polygon`, `ring::{normalize, signed_area}`, `rand::draw_ring`

pub mod cfg;
pub mod rand;
mod ring;
mod types;

pub use cfg::{MAX_COORD, MIN_COORD, MIN_VERTICES};
pub use ring::{distinct_vertices, is_closed, normalize, rings_intersect, signed_area, to_wkt, validate_bounds};
pub use types::{Point, Polygon, Ring};
