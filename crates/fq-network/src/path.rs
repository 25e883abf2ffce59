//! Hop-count shortest path over the dense vertex graph.
//!
//! # Tie-breaking
//!
//! Neighbours are expanded in adjacency insertion order and the first path
//! to reach a node is kept.  The result is shortest by **segment count**,
//! not by geometric length: with several candidate routes the one found may
//! be physically longer.  Insertion order follows the feature order the
//! host supplied.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use fq_core::{NetworkConfig, Point};

use crate::graph::NetworkGraph;
use crate::key::VertexKey;

/// Find a path between two clicked points.
///
/// Both points snap to the nearest graph vertex within
/// `3 × tolerance`; if either fails to snap, or the snapped vertices are not
/// connected, the result is `None`.
pub fn find_path(graph: &NetworkGraph, start: Point, end: Point, tolerance: f64) -> Option<Vec<Point>> {
    find_path_within(
        graph,
        start,
        end,
        tolerance * NetworkConfig::DEFAULT_SNAP_RADIUS_FACTOR,
    )
}

/// Like [`find_path`] with an explicit snap radius in CRS units.
pub fn find_path_within(
    graph: &NetworkGraph,
    start: Point,
    end: Point,
    snap_radius: f64,
) -> Option<Vec<Point>> {
    let Some(from) = graph.snap(start, snap_radius) else {
        log::debug!("start {start} is farther than {snap_radius} from any route vertex");
        return None;
    };
    let Some(to) = graph.snap(end, snap_radius) else {
        log::debug!("end {end} is farther than {snap_radius} from any route vertex");
        return None;
    };

    let hops = bfs(from, to, move |node| graph.neighbors(node).iter().map(|&n| ((), n)))?;

    let mut path = Vec::with_capacity(hops.len() + 1);
    path.extend(graph.point(from));
    path.extend(hops.iter().filter_map(|&((), key)| graph.point(key)));
    Some(path)
}

// ── BFS internals ─────────────────────────────────────────────────────────────

/// Breadth-first search from `start` to `goal`.
///
/// `edges_from(node)` yields `(edge, neighbour)` pairs in the order they
/// should be tried.  On success returns the hops from `start` to `goal`, each
/// as the edge taken and the node it led to; `start == goal` gives an empty
/// list.  `None` if `goal` is unreachable.
pub(crate) fn bfs<E, F, It>(start: VertexKey, goal: VertexKey, mut edges_from: F) -> Option<Vec<(E, VertexKey)>>
where
    E: Copy,
    F: FnMut(VertexKey) -> It,
    It: IntoIterator<Item = (E, VertexKey)>,
{
    // parent[v] = (node we came from, edge taken)
    let mut parent: FxHashMap<VertexKey, (VertexKey, E)> = FxHashMap::default();
    let mut seen: FxHashSet<VertexKey> = FxHashSet::default();
    let mut queue = VecDeque::new();

    seen.insert(start);
    queue.push_back(start);
    let mut found = start == goal;

    'search: while !found {
        let Some(node) = queue.pop_front() else {
            break;
        };
        for (edge, next) in edges_from(node) {
            if !seen.insert(next) {
                continue;
            }
            parent.insert(next, (node, edge));
            if next == goal {
                found = true;
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !found {
        log::debug!("no connection from {start} to {goal} ({} nodes explored)", seen.len());
        return None;
    }

    let mut hops = Vec::new();
    let mut cur = goal;
    while cur != start {
        let (prev, edge) = parent[&cur];
        hops.push((edge, cur));
        cur = prev;
    }
    hops.reverse();
    Some(hops)
}
