//! Path finding across whole route features joined at their endpoints.
//!
//! Routes are often split into many features whose endpoints meet only
//! within tolerance.  This graph treats each feature as one edge between its
//! two endpoint keys and ignores interior vertices, so a path is a sequence
//! of features rather than vertex hops.  The route planner uses it when the
//! dense vertex graph finds no connection.

use indexmap::IndexMap;

use fq_core::{NetworkConfig, Point};

use crate::graph::nearest_within;
use crate::key::{key_for, VertexKey};
use crate::path::bfs;

/// A feature traversal: index into the input features and whether it is
/// walked end → start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JoinedEdge {
    pub feature: usize,
    pub reversed: bool,
}

// ── JoinedRouteGraph ──────────────────────────────────────────────────────────

/// Sparse endpoint-only graph over a borrowed feature list.
pub struct JoinedRouteGraph<'a, L> {
    tolerance: f64,
    lines: &'a [L],
    /// `(start_key, end_key)` per input line; `None` for skipped lines.
    ends: Vec<Option<(VertexKey, VertexKey)>>,
    endpoints: IndexMap<VertexKey, Point>,
    adjacency: IndexMap<VertexKey, Vec<JoinedEdge>>,
}

impl<'a, L: AsRef<[Point]>> JoinedRouteGraph<'a, L> {
    /// Register every usable line as an edge between its endpoint keys.
    ///
    /// Lines with fewer than two vertices, or whose endpoints share a key,
    /// are skipped.
    pub fn new(lines: &'a [L], tolerance: f64) -> Self {
        let mut endpoints = IndexMap::new();
        let mut adjacency: IndexMap<VertexKey, Vec<JoinedEdge>> = IndexMap::new();
        let mut ends = Vec::with_capacity(lines.len());

        for (feature, line) in lines.iter().enumerate() {
            let pts = line.as_ref();
            let (Some(&first), Some(&last)) = (pts.first(), pts.last()) else {
                ends.push(None);
                continue;
            };
            let ks = key_for(first, tolerance);
            let ke = key_for(last, tolerance);
            if pts.len() < 2 || ks == ke {
                log::trace!("feature #{feature} has no distinct endpoints, skipped");
                ends.push(None);
                continue;
            }

            endpoints.entry(ks).or_insert(first);
            endpoints.entry(ke).or_insert(last);
            adjacency.entry(ks).or_default().push(JoinedEdge { feature, reversed: false });
            adjacency.entry(ke).or_default().push(JoinedEdge { feature, reversed: true });
            ends.push(Some((ks, ke)));
        }

        Self { tolerance, lines, ends, endpoints, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Number of features registered as edges.
    pub fn edge_count(&self) -> usize {
        self.ends.iter().flatten().count()
    }

    /// Key of the endpoint nearest to `point` within `max_distance`.
    pub fn snap(&self, point: Point, max_distance: f64) -> Option<VertexKey> {
        nearest_within(self.endpoints.iter().map(|(&k, &p)| (k, p)), point, max_distance)
    }

    /// Ordered feature traversals from `from` to `to`, fewest features first.
    pub fn route(&self, from: VertexKey, to: VertexKey) -> Option<Vec<JoinedEdge>> {
        let hops = bfs(from, to, move |node| {
            self.adjacency
                .get(&node)
                .map(Vec::as_slice)
                .unwrap_or(&[])
                .iter()
                .filter_map(move |&edge| {
                    let (ks, ke) = self.ends[edge.feature]?;
                    Some((edge, if edge.reversed { ks } else { ke }))
                })
        })?;
        Some(hops.into_iter().map(|(edge, _)| edge).collect())
    }

    /// Concatenate the vertex lists of `edges`, dropping the shared vertex
    /// at each seam where consecutive features meet on the same key.
    pub fn stitch(&self, edges: &[JoinedEdge]) -> Vec<Point> {
        let mut path: Vec<Point> = Vec::new();
        for edge in edges {
            let pts = self.lines[edge.feature].as_ref();
            let mut segment = pts.to_vec();
            if edge.reversed {
                segment.reverse();
            }
            let seam = match (path.last(), segment.first()) {
                (Some(&last), Some(&first)) => {
                    key_for(last, self.tolerance) == key_for(first, self.tolerance)
                }
                _ => false,
            };
            if seam {
                path.extend_from_slice(&segment[1..]);
            } else {
                path.extend(segment);
            }
        }
        path
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Find a path by chaining whole features end to end.
///
/// Snapping follows the dense finder's rule (`3 × tolerance`).  `None` if
/// either point fails to snap, no chain of features connects them, the two
/// points snap to the same endpoint, or the stitched path does not finish on
/// the key of `end` itself.
pub fn find_path_via_features<L: AsRef<[Point]>>(
    features: &[L],
    start: Point,
    end: Point,
    tolerance: f64,
) -> Option<Vec<Point>> {
    find_path_via_features_within(
        features,
        start,
        end,
        tolerance,
        tolerance * NetworkConfig::DEFAULT_SNAP_RADIUS_FACTOR,
    )
}

/// Like [`find_path_via_features`] with an explicit snap radius.
pub fn find_path_via_features_within<L: AsRef<[Point]>>(
    features: &[L],
    start: Point,
    end: Point,
    tolerance: f64,
    snap_radius: f64,
) -> Option<Vec<Point>> {
    let graph = JoinedRouteGraph::new(features, tolerance);
    let from = graph.snap(start, snap_radius)?;
    let to = graph.snap(end, snap_radius)?;

    let edges = graph.route(from, to)?;
    let path = graph.stitch(&edges);

    let end_key = key_for(end, tolerance);
    match path.last() {
        Some(&last) if key_for(last, tolerance) == end_key => {
            log::debug!("joined {} features into a {}-vertex path", edges.len(), path.len());
            Some(path)
        }
        _ => {
            log::debug!("stitched path does not end at {end_key}");
            None
        }
    }
}
