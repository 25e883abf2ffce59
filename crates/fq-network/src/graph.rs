//! Dense route graph over quantized vertices.
//!
//! # Data layout
//!
//! Every vertex of every polyline is a potential junction, interior
//! breakpoints included.  Two maps describe the graph:
//!
//! ```text
//! points:    VertexKey → Point             (first writer wins)
//! adjacency: VertexKey → [VertexKey, ...]  (undirected, no duplicates)
//! ```
//!
//! Both are `IndexMap`s, so iteration follows insertion order.  That order is
//! what makes snapping and BFS tie-breaking deterministic for a given
//! feature order.
//!
//! Graphs are request-scoped: build one per query from the current feature
//! snapshot, then drop it.

use indexmap::IndexMap;
use indexmap::map::Entry;

use fq_core::Point;

use crate::key::{key_for, VertexKey};

// ── NetworkGraph ──────────────────────────────────────────────────────────────

/// Undirected vertex graph built from route polylines.
///
/// Do not construct directly; use [`build_graph`] or [`NetworkGraphBuilder`].
#[derive(Clone, Debug)]
pub struct NetworkGraph {
    tolerance: f64,
    points: IndexMap<VertexKey, Point>,
    adjacency: IndexMap<VertexKey, Vec<VertexKey>>,
    edge_count: usize,
}

impl NetworkGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Quantization tolerance the graph was built with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Representative point of `key`: the first vertex that mapped to it.
    pub fn point(&self, key: VertexKey) -> Option<Point> {
        self.points.get(&key).copied()
    }

    /// Neighbours of `key` in insertion order; empty for unknown keys.
    pub fn neighbors(&self, key: VertexKey) -> &[VertexKey] {
        self.adjacency.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: VertexKey) -> bool {
        self.points.contains_key(&key)
    }

    /// All indexed vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, Point)> + '_ {
        self.points.iter().map(|(&k, &p)| (k, p))
    }

    // ── Snapping ──────────────────────────────────────────────────────────

    /// Nearest indexed vertex to `point`, accepted only within `max_distance`.
    ///
    /// A plain linear scan: the click is off-grid, so its own key cannot be
    /// trusted to hit an existing vertex.  On equal distances the vertex
    /// indexed first wins.
    pub fn snap(&self, point: Point, max_distance: f64) -> Option<VertexKey> {
        nearest_within(self.vertices(), point, max_distance)
    }
}

/// Linear nearest-neighbour scan shared by the dense and joined graphs.
pub(crate) fn nearest_within(
    candidates: impl Iterator<Item = (VertexKey, Point)>,
    point: Point,
    max_distance: f64,
) -> Option<VertexKey> {
    let mut best: Option<(VertexKey, f64)> = None;
    for (key, p) in candidates {
        let d = p.distance(point);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((key, d));
        }
    }
    best.filter(|&(_, d)| d <= max_distance).map(|(k, _)| k)
}

// ── NetworkGraphBuilder ───────────────────────────────────────────────────────

/// Accumulate polylines, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fq_core::Point;
/// use fq_network::NetworkGraphBuilder;
///
/// let mut b = NetworkGraphBuilder::new(0.5);
/// b.add_polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
/// b.add_polyline(&[Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 3); // shared (10, 0) is one junction
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub struct NetworkGraphBuilder {
    tolerance: f64,
    points: IndexMap<VertexKey, Point>,
    adjacency: IndexMap<VertexKey, Vec<VertexKey>>,
    edge_count: usize,
}

impl NetworkGraphBuilder {
    /// `tolerance` must be positive (see [`fq_core::check_tolerance`]).
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: IndexMap::new(),
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Add one edge per consecutive vertex pair whose keys differ.
    ///
    /// Polylines with fewer than two vertices add nothing.  Returns the
    /// number of new undirected edges.
    pub fn add_polyline(&mut self, vertices: &[Point]) -> usize {
        if vertices.len() < 2 {
            log::trace!("skipping polyline with {} vertices", vertices.len());
            return 0;
        }

        let before = self.edge_count;
        for pair in vertices.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let ka = key_for(a, self.tolerance);
            let kb = key_for(b, self.tolerance);
            if ka == kb {
                continue;
            }
            self.points.entry(ka).or_insert(a);
            self.points.entry(kb).or_insert(b);
            self.link(ka, kb);
        }
        self.edge_count - before
    }

    fn link(&mut self, a: VertexKey, b: VertexKey) {
        let inserted = push_unique(&mut self.adjacency, a, b);
        push_unique(&mut self.adjacency, b, a);
        if inserted {
            self.edge_count += 1;
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Consume the builder.  `None` if no polyline contributed an edge.
    pub fn build(self) -> Option<NetworkGraph> {
        if self.edge_count == 0 {
            return None;
        }
        Some(NetworkGraph {
            tolerance: self.tolerance,
            points: self.points,
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        })
    }
}

fn push_unique(
    adjacency: &mut IndexMap<VertexKey, Vec<VertexKey>>,
    from: VertexKey,
    to: VertexKey,
) -> bool {
    match adjacency.entry(from) {
        Entry::Occupied(mut e) => {
            let list = e.get_mut();
            if list.contains(&to) {
                false
            } else {
                list.push(to);
                true
            }
        }
        Entry::Vacant(e) => {
            e.insert(vec![to]);
            true
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Build the dense vertex graph for a set of polylines.
///
/// Returns `None` if nothing contributed an edge (no input, or only
/// degenerate polylines).  The input is not modified.
pub fn build_graph<I>(polylines: I, tolerance: f64) -> Option<NetworkGraph>
where
    I: IntoIterator,
    I::Item: AsRef<[Point]>,
{
    let mut builder = NetworkGraphBuilder::new(tolerance);
    for line in polylines {
        builder.add_polyline(line.as_ref());
    }
    builder.build()
}
