//! Query configuration shared by the map tools.
//!
//! The host knows the canvas scale; everything else is tuned here.  Typically
//! built with `Default` and optionally overridden from a JSON file by the
//! application crate.

use crate::{FqError, FqResult};

/// Tolerances and strategy switches for path and snap queries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Quantization tolerance in screen pixels.  Multiplied by the canvas
    /// map-units-per-pixel to get a tolerance in CRS units.  The map tools
    /// use values between 6 and 20.
    pub snap_pixels: f64,

    /// A click snaps to a graph vertex only within
    /// `snap_radius_factor × tolerance`.  Default: 3.
    pub snap_radius_factor: f64,

    /// Retry with the endpoint-only joined-route graph when the dense vertex
    /// graph finds no connection.
    pub join_fallback: bool,
}

impl NetworkConfig {
    pub const DEFAULT_SNAP_PIXELS: f64 = 10.0;
    pub const DEFAULT_SNAP_RADIUS_FACTOR: f64 = 3.0;

    /// Quantization tolerance in CRS units for the current canvas scale.
    ///
    /// # Errors
    ///
    /// [`FqError::InvalidTolerance`] if the product is not a positive finite
    /// number (e.g. a canvas that has not been rendered yet reports 0).
    pub fn tolerance(&self, map_units_per_pixel: f64) -> FqResult<f64> {
        check_tolerance(map_units_per_pixel * self.snap_pixels)
    }

    /// Maximum snap distance for a given tolerance.
    #[inline]
    pub fn snap_radius(&self, tolerance: f64) -> f64 {
        tolerance * self.snap_radius_factor
    }

    /// Reject settings that would make every query fail or misbehave.
    pub fn validate(&self) -> FqResult<()> {
        if !(self.snap_pixels.is_finite() && self.snap_pixels > 0.0) {
            return Err(FqError::Config(format!(
                "snap_pixels must be positive, got {}",
                self.snap_pixels
            )));
        }
        if !(self.snap_radius_factor.is_finite() && self.snap_radius_factor >= 0.0) {
            return Err(FqError::Config(format!(
                "snap_radius_factor must be non-negative, got {}",
                self.snap_radius_factor
            )));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            snap_pixels: Self::DEFAULT_SNAP_PIXELS,
            snap_radius_factor: Self::DEFAULT_SNAP_RADIUS_FACTOR,
            join_fallback: true,
        }
    }
}

/// Pass a tolerance through if it is positive and finite.
pub fn check_tolerance(tolerance: f64) -> FqResult<f64> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(FqError::InvalidTolerance(tolerance))
    }
}
