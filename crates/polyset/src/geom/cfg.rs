//! Coordinate bounds and ring size limits.
//!
//! Policy
//! - Bounds are fixed constants checked directly by the kernel; nothing inspects
//!   field metadata at runtime.

/// Smallest admissible coordinate on either axis.
pub const MIN_COORD: f64 = 0.0;
/// Largest admissible coordinate on either axis.
pub const MAX_COORD: f64 = 999_999.0;
/// Distinct vertices a ring needs before it is closed.
pub const MIN_VERTICES: usize = 3;
