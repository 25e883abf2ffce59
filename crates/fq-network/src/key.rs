//! Fuzzy vertex keys for junction detection.
//!
//! Endpoints digitized on different features rarely coincide bit-for-bit.
//! Rounding each coordinate to a grid of `tolerance` cells makes near
//! coincident vertices hash to the same key, so they become one junction.

use std::fmt;

use fq_core::Point;

/// Grid cell of a quantized coordinate: `(round(x/tol), round(y/tol))`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VertexKey(pub i64, pub i64);

/// Quantize `point` onto a grid with cell size `tolerance`.
///
/// `tolerance` must be positive; callers get it from
/// [`NetworkConfig::tolerance`](fq_core::NetworkConfig::tolerance) or
/// [`check_tolerance`](fq_core::check_tolerance).
#[inline]
pub fn key_for(point: Point, tolerance: f64) -> VertexKey {
    debug_assert!(tolerance > 0.0, "tolerance must be positive");
    VertexKey(
        (point.x / tolerance).round() as i64,
        (point.y / tolerance).round() as i64,
    )
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}
