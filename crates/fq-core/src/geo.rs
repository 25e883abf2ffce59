//! Planar coordinate, polyline, and line-geometry types.
//!
//! Coordinates are `f64` in whatever CRS the host works in: metres for a
//! projected CRS, degrees (x = longitude, y = latitude) for a geographic one.
//! Nothing here knows which; measurement in real units goes through a
//! [`DistanceMeasurer`](crate::DistanceMeasurer).

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// An immutable `(x, y)` map coordinate.  No z/m ordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared planar distance in CRS units.
    #[inline]
    pub fn distance_2(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Planar Euclidean distance in CRS units.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_2(other).sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> [f64; 2] {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// One contiguous vertex chain.
///
/// A usable polyline has at least two vertices.  Shorter ones are still
/// representable so that graph construction can skip them instead of the
/// loader rejecting a whole layer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline(pub Vec<Point>);

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` if there is no segment to speak of (fewer than two vertices).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < 2
    }

    pub fn first(&self) -> Option<Point> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    /// Number of segments (`len - 1`, or 0).
    pub fn segment_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive vertex pairs, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Planar length in CRS units.
    pub fn planar_length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }
}

impl AsRef<[Point]> for Polyline {
    fn as_ref(&self) -> &[Point] {
        &self.0
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A line geometry as the host stores it: single- or multi-part.
///
/// # First-part policy
///
/// Routing and measurement read [`primary_part`](Self::primary_part) only.
/// For a multi-part cable or route, all parts after the first are ignored
/// there; only nearest-cable selection looks at every part.  This matches how existing project data has always been
/// measured and is known to lose geometry for genuinely multi-part features.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    SinglePart(Polyline),
    MultiPart(Vec<Polyline>),
}

impl Geometry {
    /// The part used for routing and measurement.  `None` for an empty
    /// multi-part geometry.
    pub fn primary_part(&self) -> Option<&Polyline> {
        match self {
            Geometry::SinglePart(line) => Some(line),
            Geometry::MultiPart(parts) => parts.first(),
        }
    }

    /// Vertices of the primary part, or an empty slice.
    pub fn primary_points(&self) -> &[Point] {
        self.primary_part().map(Polyline::points).unwrap_or(&[])
    }

    /// Every part, in order.
    pub fn parts(&self) -> &[Polyline] {
        match self {
            Geometry::SinglePart(line) => std::slice::from_ref(line),
            Geometry::MultiPart(parts) => parts,
        }
    }

    pub fn part_count(&self) -> usize {
        match self {
            Geometry::SinglePart(_) => 1,
            Geometry::MultiPart(parts) => parts.len(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Geometry::MultiPart(_))
    }
}

impl From<Polyline> for Geometry {
    fn from(line: Polyline) -> Self {
        Geometry::SinglePart(line)
    }
}

impl From<Vec<Point>> for Geometry {
    fn from(points: Vec<Point>) -> Self {
        Geometry::SinglePart(Polyline(points))
    }
}
