//! Distance measurement between two map coordinates.
//!
//! The host binds a measurer to its working CRS and ellipsoid; the network
//! crate only ever asks it for the length of one straight piece.  A failed
//! measurement is an ordinary `Err` so callers can decide to count it as
//! zero instead of aborting a whole computation.

use ::geo::{Distance, Geodesic};
use thiserror::Error;

use crate::Point;

/// Why a single measurement could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("non-finite coordinate {0:?}")]
    NonFinite(Point),

    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
}

/// Measures the length of a straight line between two points in a linear
/// unit (metres at every call site in FiberQ).
pub trait DistanceMeasurer {
    fn measure_line(&self, a: Point, b: Point) -> Result<f64, MeasureError>;
}

impl<M: DistanceMeasurer + ?Sized> DistanceMeasurer for &M {
    fn measure_line(&self, a: Point, b: Point) -> Result<f64, MeasureError> {
        (**self).measure_line(a, b)
    }
}

// ── PlanarMeasurer ────────────────────────────────────────────────────────────

/// Euclidean distance in CRS units, optionally scaled to metres.
///
/// Suitable for projected CRSs whose unit is already the metre (scale 1.0).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanarMeasurer {
    /// Metres per CRS unit.
    pub unit_scale: f64,
}

impl PlanarMeasurer {
    pub const METRES: PlanarMeasurer = PlanarMeasurer { unit_scale: 1.0 };

    pub fn new(unit_scale: f64) -> Self {
        Self { unit_scale }
    }
}

impl Default for PlanarMeasurer {
    fn default() -> Self {
        Self::METRES
    }
}

impl DistanceMeasurer for PlanarMeasurer {
    fn measure_line(&self, a: Point, b: Point) -> Result<f64, MeasureError> {
        for p in [a, b] {
            if !p.is_finite() {
                return Err(MeasureError::NonFinite(p));
            }
        }
        Ok(a.distance(b) * self.unit_scale)
    }
}

// ── EllipsoidMeasurer ─────────────────────────────────────────────────────────

/// Earth model used for geographic measurement.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ellipsoid {
    /// Geodesic on the WGS 84 ellipsoid (Karney's algorithm via `geo`).
    #[default]
    Wgs84,
    /// Great circle on a sphere with the given radius in metres.
    Sphere(f64),
}

impl Ellipsoid {
    /// IUGG mean Earth radius, for use with [`Ellipsoid::Sphere`].
    pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;
}

/// Distance for geographic coordinates, x = lon and y = lat in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct EllipsoidMeasurer {
    pub ellipsoid: Ellipsoid,
}

impl EllipsoidMeasurer {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }
}

impl DistanceMeasurer for EllipsoidMeasurer {
    fn measure_line(&self, a: Point, b: Point) -> Result<f64, MeasureError> {
        for p in [a, b] {
            if !p.is_finite() {
                return Err(MeasureError::NonFinite(p));
            }
            if p.y.abs() > 90.0 {
                return Err(MeasureError::LatitudeOutOfRange(p.y));
            }
        }

        match self.ellipsoid {
            Ellipsoid::Wgs84 => {
                Ok(Geodesic.distance(::geo::Point::new(a.x, a.y), ::geo::Point::new(b.x, b.y)))
            }
            Ellipsoid::Sphere(radius) => Ok(radius * central_angle(a, b)),
        }
    }
}

/// Haversine central angle in radians.
fn central_angle(a: Point, b: Point) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}
