//! Distance along a polyline and whole-cable lengths.
//!
//! Every straight piece is measured separately through the host's
//! [`DistanceMeasurer`].  A piece that fails to measure counts as 0 m and
//! the sum carries on, so a pathological vertex costs accuracy, not the
//! whole answer.

use fq_core::{DistanceMeasurer, Point};

/// Measure one piece, treating a failure as zero length.
fn measure_or_zero<M: DistanceMeasurer + ?Sized>(measurer: &M, a: Point, b: Point) -> f64 {
    match measurer.measure_line(a, b) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("measuring {a} → {b} failed ({e}); counting it as 0");
            0.0
        }
    }
}

/// Distance from the start of `vertices` to `point_on_segment`, which lies
/// on segment `segment_index` (between `vertices[i]` and `vertices[i + 1]`).
///
/// `segment_index` is clamped into `[0, len - 2]`, so negative or
/// past-the-end indices from a geometry engine still produce a sensible
/// answer.  Fewer than two vertices measure 0.
pub fn distance_along_line<M: DistanceMeasurer + ?Sized>(
    vertices: &[Point],
    segment_index: isize,
    point_on_segment: Point,
    measurer: &M,
) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }
    let last_segment = vertices.len() - 2;
    let seg = usize::try_from(segment_index).unwrap_or(0).min(last_segment);

    let to_segment_start: f64 = vertices[..=seg]
        .windows(2)
        .map(|w| measure_or_zero(measurer, w[0], w[1]))
        .sum();
    let partial = measure_or_zero(measurer, vertices[seg], point_on_segment);

    to_segment_start + partial
}

/// Full measured length of a polyline.
pub fn line_length<M: DistanceMeasurer + ?Sized>(vertices: &[Point], measurer: &M) -> f64 {
    vertices
        .windows(2)
        .map(|w| measure_or_zero(measurer, w[0], w[1]))
        .sum()
}

// ── Cable length with slack ───────────────────────────────────────────────────

/// Geometric length of a cable plus the slack coiled at its reserves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CableLength {
    /// Measured length of the cable geometry, metres (unrounded).
    pub geometry_m: f64,
    /// Sum of reserve slack, metres, rounded to 2 decimals.
    pub slack_m: f64,
    /// `geometry_m + slack`, rounded to 2 decimals.
    pub total_m: f64,
}

/// Total cable length: geometry plus every slack entry.
///
/// Missing slack values (`None`) count as 0, as do non-finite ones.
pub fn cable_length<M, I>(vertices: &[Point], slack: I, measurer: &M) -> CableLength
where
    M: DistanceMeasurer + ?Sized,
    I: IntoIterator<Item = Option<f64>>,
{
    let geometry_m = line_length(vertices, measurer);
    let slack_sum: f64 = slack
        .into_iter()
        .flatten()
        .filter(|s| s.is_finite())
        .sum();

    CableLength {
        geometry_m,
        slack_m: round_to(slack_sum, 2),
        total_m: round_to(geometry_m + slack_sum, 2),
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
