//! Random star-shaped rings (angular slices + radial jitter + replay tokens).
//!
//! Purpose
//! - Produce candidate rings for batch generation. Output is reproducible from a
//!   replay token and comes out counter-clockwise, open (not closed).
//!
//! Model
//! - One center `(ox, oy)` per ring, uniform in `[OFFSET_MIN, OFFSET_MAX]`.
//! - The full turn is split into `n + 1` equal slices; vertex `i` draws its angle
//!   from slice `i` and its radius from `[radius_min, radius_max]`. The unused last
//!   slice keeps the ring from wrapping onto itself.
//! - Coordinates are clamped into the admissible plane afterwards. Clamping can
//!   flatten a ring near the border; admission is the only backstop.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::cfg::{MAX_COORD, MIN_COORD, MIN_VERTICES};
use super::types::{Point, Ring};

/// Lower bound for the ring center on both axes.
pub const OFFSET_MIN: f64 = 1.0;
/// Upper bound for the ring center on both axes.
pub const OFFSET_MAX: f64 = 999_998.0;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(MIN_VERTICES),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(MIN_VERTICES);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Ring sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RingCfg {
    pub vertex_count: VertexCount,
    /// Smallest vertex distance from the center.
    pub radius_min: f64,
    /// Largest vertex distance from the center. Raised to `radius_min` if smaller.
    pub radius_max: f64,
}

impl Default for RingCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 20 },
            radius_min: 1.0,
            radius_max: 100.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random open ring, counter-clockwise, every vertex inside the plane.
pub fn draw_ring(cfg: RingCfg, tok: ReplayToken) -> Ring {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    draw_ring_with(&mut rng, n, cfg.radius_min, cfg.radius_max)
}

/// Draw `n` vertices around one random center using the caller's RNG.
pub fn draw_ring_with<R: Rng>(rng: &mut R, n: usize, radius_min: f64, radius_max: f64) -> Ring {
    let r_lo = radius_min.max(0.0);
    let r_hi = radius_max.max(r_lo);
    let center = Vector2::new(
        rng.gen_range(OFFSET_MIN..=OFFSET_MAX),
        rng.gen_range(OFFSET_MIN..=OFFSET_MAX),
    );
    let spread = std::f64::consts::TAU / (n as f64 + 1.0);
    (0..n)
        .map(|i| {
            let th = rng.gen_range((i as f64) * spread..((i + 1) as f64) * spread);
            let r = rng.gen_range(r_lo..=r_hi);
            let v = Vector2::new(th.cos(), th.sin()) * r + center;
            Point::new(
                v.x.clamp(MIN_COORD, MAX_COORD),
                v.y.clamp(MIN_COORD, MAX_COORD),
            )
        })
        .collect()
}
