//! Snapping a click onto the nearest cable and locating a fiber break.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every segment of every part of every cable,
//! tagged with its feature index.  The nearest segment to a click picks the
//! cable; the click is then projected onto that cable's primary part, which
//! is the only part measured along.

use rstar::primitives::{GeomWithData, Line};
use rstar::{PointDistance, RTree};

use fq_core::{DistanceMeasurer, FeatureId, Point};

use crate::distance::{distance_along_line, round_to};
use crate::source::RouteFeature;

// ── Segment projection ────────────────────────────────────────────────────────

/// Where a point lands on a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentHit {
    /// Planar distance from the query point to `point`.
    pub distance: f64,
    /// Closest point on the polyline.
    pub point: Point,
    /// Segment `point` lies on (between vertices `i` and `i + 1`).
    pub segment_index: usize,
}

/// Closest point on segment `a → b` to `p`.
pub fn project_onto_segment(a: Point, b: Point, p: Point) -> Point {
    let len_2 = a.distance_2(b);
    if len_2 == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_2).clamp(0.0, 1.0);
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Closest segment of `vertices` to `point`; the earliest wins on ties.
///
/// `None` for fewer than two vertices.
pub fn closest_segment(vertices: &[Point], point: Point) -> Option<SegmentHit> {
    let mut best: Option<SegmentHit> = None;
    for (segment_index, w) in vertices.windows(2).enumerate() {
        let snapped = project_onto_segment(w[0], w[1], point);
        let distance = snapped.distance(point);
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(SegmentHit { distance, point: snapped, segment_index });
        }
    }
    best
}

// ── CableIndex ────────────────────────────────────────────────────────────────

type SegmentEntry = GeomWithData<Line<[f64; 2]>, usize>;

/// The nearest cable to a query point.
#[derive(Clone, Debug, PartialEq)]
pub struct CableHit {
    /// Index into the features the index was built from.
    pub feature: usize,
    pub layer: String,
    pub id: FeatureId,
    /// Segment of the primary part that `point` lies on.
    pub segment_index: usize,
    /// Query point projected onto the primary part.
    pub point: Point,
    /// Planar distance from the query point to the nearest part of the cable.
    pub distance: f64,
}

/// R-tree over cable segments for nearest-cable queries.
pub struct CableIndex<'a> {
    features: &'a [RouteFeature],
    tree: RTree<SegmentEntry>,
}

impl<'a> CableIndex<'a> {
    /// Index every part of every feature.  Features whose primary part has
    /// no segment, and zero-length segments, are left out.
    pub fn new(features: &'a [RouteFeature]) -> Self {
        let entries: Vec<SegmentEntry> = features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.points().len() >= 2)
            .flat_map(|(fi, f)| {
                f.geometry
                    .parts()
                    .iter()
                    .flat_map(|part| part.points().windows(2))
                    .filter(|w| w[0] != w[1])
                    .map(move |w| {
                        let line = Line::new([w[0].x, w[0].y], [w[1].x, w[1].y]);
                        GeomWithData::new(line, fi)
                    })
            })
            .collect();
        log::trace!("indexed {} cable segments", entries.len());

        Self { features, tree: RTree::bulk_load(entries) }
    }

    pub fn segment_count(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest cable to `point`, or `None` if nothing is indexed.
    pub fn nearest(&self, point: Point) -> Option<CableHit> {
        let entry = self.tree.nearest_neighbor(&[point.x, point.y])?;
        let feature = entry.data;
        let f = &self.features[feature];
        let on_primary = closest_segment(f.points(), point)?;

        Some(CableHit {
            feature,
            layer: f.layer.clone(),
            id: f.id,
            segment_index: on_primary.segment_index,
            point: on_primary.point,
            distance: entry.distance_2(&[point.x, point.y]).sqrt(),
        })
    }
}

// ── Fiber break ───────────────────────────────────────────────────────────────

/// A break recorded on a cable.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakLocation {
    pub layer: String,
    pub feature_id: FeatureId,
    /// Click snapped onto the cable.
    pub point: Point,
    pub segment_index: usize,
    /// Distance from the cable start, metres, rounded to 3 decimals.
    pub distance_m: f64,
    /// Segments in the cable's primary part.
    pub segment_count: usize,
}

/// Snap `click` to the nearest cable and measure how far along it the break
/// lies.  `None` if there is no usable cable.
pub fn locate_break<M: DistanceMeasurer + ?Sized>(
    features: &[RouteFeature],
    click: Point,
    measurer: &M,
) -> Option<BreakLocation> {
    let hit = CableIndex::new(features).nearest(click)?;
    let pts = features[hit.feature].points();
    let distance = distance_along_line(pts, hit.segment_index as isize, hit.point, measurer);

    log::debug!(
        "break on {} {} at {:.2} m (segment {})",
        hit.layer, hit.id, distance, hit.segment_index
    );

    Some(BreakLocation {
        layer: hit.layer,
        feature_id: hit.id,
        point: hit.point,
        segment_index: hit.segment_index,
        distance_m: round_to(distance, 3),
        segment_count: pts.len().saturating_sub(1),
    })
}
