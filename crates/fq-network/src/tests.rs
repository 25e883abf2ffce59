//! Unit tests for fq-network.
//!
//! All tests use hand-crafted features so they run without any project data.

#[cfg(test)]
mod helpers {
    use fq_core::{FeatureId, Point};
    use crate::RouteFeature;

    pub fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    pub fn line(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    pub fn feature(layer: &str, id: u64, coords: &[(f64, f64)]) -> RouteFeature {
        RouteFeature::new(layer, FeatureId(id), line(coords))
    }

    /// Three route features forming a staircase:
    ///
    ///   A: (0,0)-(10,0)   B: (10,0)-(10,10)   C: (10,10)-(20,10)
    pub fn staircase() -> Vec<RouteFeature> {
        vec![
            feature("Route", 1, &[(0.0, 0.0), (10.0, 0.0)]),
            feature("Route", 2, &[(10.0, 0.0), (10.0, 10.0)]),
            feature("Route", 3, &[(10.0, 10.0), (20.0, 10.0)]),
        ]
    }

    pub const TOL: f64 = 0.5;
}

// ── Vertex keys ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod keys {
    use super::helpers::pt;
    use crate::{key_for, VertexKey};

    #[test]
    fn rounds_to_grid() {
        assert_eq!(key_for(pt(10.0, -4.0), 0.5), VertexKey(20, -8));
        assert_eq!(key_for(pt(10.2, 0.26), 0.5), VertexKey(20, 1));
    }

    #[test]
    fn nearby_points_share_a_key() {
        // Both inside the same 1.0 cell, less than tol/2 apart.
        let a = pt(10.1, 5.1);
        let b = pt(10.3, 4.95);
        assert!(a.distance(b) < 0.5);
        assert_eq!(key_for(a, 1.0), key_for(b, 1.0));
        assert_eq!(key_for(b, 1.0), key_for(a, 1.0));
    }

    #[test]
    fn distant_points_differ() {
        assert_ne!(key_for(pt(0.0, 0.0), 1.0), key_for(pt(2.0, 0.0), 1.0));
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::helpers::{line, pt, staircase, TOL};
    use crate::{build_graph, key_for, NetworkGraphBuilder};

    #[test]
    fn every_vertex_is_a_node() {
        let polyline = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (10.0, 5.0)]);
        let g = build_graph([&polyline], TOL).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        // Interior breakpoint (5,0) connects to both sides.
        assert_eq!(g.neighbors(key_for(pt(5.0, 0.0), TOL)).len(), 2);
    }

    #[test]
    fn zero_length_segments_merge() {
        let polyline = line(&[(0.0, 0.0), (0.1, 0.0), (5.0, 0.0)]);
        let g = build_graph([&polyline], 1.0).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn shared_endpoints_become_junctions() {
        let g = build_graph(&staircase(), TOL).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(key_for(pt(10.0, 0.0), TOL)).len(), 2);
    }

    #[test]
    fn first_writer_keeps_representative_point() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = line(&[(10.1, 0.0), (10.0, 10.0)]);
        let g = build_graph([&a, &b], TOL).unwrap();
        assert_eq!(g.point(key_for(pt(10.1, 0.0), TOL)), Some(pt(10.0, 0.0)));
    }

    #[test]
    fn duplicate_features_do_not_duplicate_edges() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let mut b = NetworkGraphBuilder::new(TOL);
        assert_eq!(b.add_polyline(&a), 1);
        assert_eq!(b.add_polyline(&a), 0);
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(key_for(pt(0.0, 0.0), TOL)).len(), 1);
    }

    #[test]
    fn degenerate_input_builds_nothing() {
        let empty: Vec<Vec<fq_core::Point>> = vec![];
        assert!(build_graph(&empty, TOL).is_none());

        let single = line(&[(1.0, 1.0)]);
        let stub = line(&[(1.0, 1.0), (1.1, 1.0)]);
        assert!(build_graph([&single, &stub], TOL).is_none());
    }

    #[test]
    fn input_is_not_modified() {
        let features = staircase();
        let before = features.clone();
        let _ = build_graph(&features, TOL);
        assert_eq!(features, before);
    }
}

// ── Dense BFS ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dense_path {
    use super::helpers::{line, pt, staircase, TOL};
    use crate::{build_graph, find_path, find_path_within};

    #[test]
    fn staircase_end_to_end() {
        let g = build_graph(&staircase(), TOL).unwrap();
        let path = find_path(&g, pt(0.0, 0.0), pt(20.0, 10.0), TOL).unwrap();
        assert_eq!(path, vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(20.0, 10.0)]);
    }

    #[test]
    fn off_grid_clicks_snap_to_vertices() {
        let g = build_graph(&staircase(), TOL).unwrap();
        let path = find_path(&g, pt(0.4, -0.6), pt(19.2, 10.3), TOL).unwrap();
        assert_eq!(path.first(), Some(&pt(0.0, 0.0)));
        assert_eq!(path.last(), Some(&pt(20.0, 10.0)));
    }

    #[test]
    fn y_junction_takes_two_hops() {
        let arms = [
            line(&[(0.0, 0.0), (-10.0, -10.0)]),
            line(&[(0.0, 0.0), (10.0, -10.0)]),
            line(&[(0.0, 0.0), (0.0, 10.0)]),
        ];
        let g = build_graph(&arms, TOL).unwrap();
        let ends = [pt(-10.0, -10.0), pt(10.0, -10.0), pt(0.0, 10.0)];
        for (i, &a) in ends.iter().enumerate() {
            for &b in &ends[i + 1..] {
                let path = find_path(&g, a, b, TOL).unwrap();
                assert_eq!(path.len(), 3, "{a} → {b}");
                assert_eq!(path[1], pt(0.0, 0.0));
            }
        }
    }

    #[test]
    fn fewest_hops_beats_shortest_length() {
        // Two hops over a tall detour vs. three hops along the axis.
        let detour = line(&[(0.0, 0.0), (5.0, 50.0), (10.0, 0.0)]);
        let straight = line(&[(0.0, 0.0), (3.0, 0.0), (6.0, 0.0), (10.0, 0.0)]);
        let g = build_graph([&straight, &detour], TOL).unwrap();
        let path = find_path(&g, pt(0.0, 0.0), pt(10.0, 0.0), TOL).unwrap();
        assert_eq!(path, vec![pt(0.0, 0.0), pt(5.0, 50.0), pt(10.0, 0.0)]);
    }

    #[test]
    fn disconnected_clusters_return_none() {
        let a = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = line(&[(100.0, 0.0), (110.0, 0.0)]);
        let g = build_graph([&a, &b], TOL).unwrap();
        assert!(find_path(&g, pt(0.0, 0.0), pt(110.0, 0.0), TOL).is_none());
    }

    #[test]
    fn snap_beyond_three_tolerances_is_rejected() {
        let g = build_graph(&staircase(), TOL).unwrap();
        // 2.0 > 3 × 0.5
        assert!(find_path(&g, pt(0.0, 2.0), pt(20.0, 10.0), TOL).is_none());
        assert!(find_path(&g, pt(0.0, 0.0), pt(20.0, 12.0), TOL).is_none());
        // 1.4 is within range.
        assert!(find_path(&g, pt(0.0, 1.4), pt(20.0, 10.0), TOL).is_some());
    }

    #[test]
    fn explicit_snap_radius() {
        let g = build_graph(&staircase(), TOL).unwrap();
        assert!(find_path_within(&g, pt(0.0, 2.0), pt(20.0, 10.0), 2.5).is_some());
        assert!(find_path_within(&g, pt(0.0, 0.3), pt(20.0, 10.0), 0.1).is_none());
    }

    #[test]
    fn same_vertex_is_a_single_point() {
        let g = build_graph(&staircase(), TOL).unwrap();
        let path = find_path(&g, pt(10.0, 0.0), pt(10.1, 0.1), TOL).unwrap();
        assert_eq!(path, vec![pt(10.0, 0.0)]);
    }
}

// ── Joined routes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod joined {
    use super::helpers::{line, pt, TOL};
    use crate::{find_path_via_features, JoinedEdge, JoinedRouteGraph, VertexKey};

    #[test]
    fn stitching_drops_shared_vertex() {
        let features = [line(&[(0.0, 0.0), (10.0, 0.0)]), line(&[(10.0, 0.0), (20.0, 0.0)])];
        let path = find_path_via_features(&features, pt(0.0, 0.0), pt(20.0, 0.0), TOL).unwrap();
        assert_eq!(path, vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    }

    #[test]
    fn reversed_features_are_flipped() {
        let features = [line(&[(10.0, 0.0), (0.0, 0.0)]), line(&[(20.0, 0.0), (10.0, 0.0)])];
        let graph = JoinedRouteGraph::new(&features, TOL);
        let from = graph.snap(pt(0.0, 0.0), 1.5).unwrap();
        let to = graph.snap(pt(20.0, 0.0), 1.5).unwrap();
        let edges = graph.route(from, to).unwrap();
        assert_eq!(
            edges,
            vec![
                JoinedEdge { feature: 0, reversed: true },
                JoinedEdge { feature: 1, reversed: true },
            ]
        );
        assert_eq!(graph.stitch(&edges), vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    }

    #[test]
    fn interior_vertices_are_kept_in_the_output() {
        let features = [
            line(&[(0.0, 0.0), (5.0, 2.0), (10.0, 0.0)]),
            line(&[(10.0, 0.0), (15.0, -2.0), (20.0, 0.0)]),
        ];
        let path = find_path_via_features(&features, pt(0.0, 0.0), pt(20.0, 0.0), TOL).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[2], pt(10.0, 0.0));
    }

    #[test]
    fn interior_vertices_are_not_junctions() {
        // The spur starts at an interior vertex of the trunk.
        let features = [
            line(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]),
            line(&[(10.0, 0.0), (10.0, 10.0)]),
        ];
        let graph = JoinedRouteGraph::new(&features, TOL);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert!(find_path_via_features(&features, pt(0.0, 0.0), pt(10.0, 10.0), TOL).is_none());
    }

    #[test]
    fn closed_and_degenerate_features_are_skipped() {
        let features = [
            line(&[(0.0, 0.0), (5.0, 5.0), (0.0, 0.1)]),
            line(&[(3.0, 3.0)]),
            line(&[]),
        ];
        let graph = JoinedRouteGraph::new(&features, TOL);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn same_endpoint_is_not_a_path() {
        let features = [line(&[(0.0, 0.0), (10.0, 0.0)])];
        assert!(find_path_via_features(&features, pt(0.0, 0.0), pt(0.1, 0.0), TOL).is_none());
    }

    #[test]
    fn snap_picks_nearest_endpoint_across_cell_boundary() {
        // (0.24, 0) keys to (0, 0) and (0.3, 0) keys to (1, 0); the click
        // keys to (1, 0) but lies closer to (0.24, 0).
        let features = [line(&[(-10.0, 0.0), (0.24, 0.0)]), line(&[(0.3, 0.0), (10.0, 0.0)])];
        let graph = JoinedRouteGraph::new(&features, TOL);
        assert_eq!(graph.snap(pt(0.26, 0.0), 1.5), Some(VertexKey(0, 0)));
        assert_eq!(graph.snap(pt(0.29, 0.0), 1.5), Some(VertexKey(1, 0)));
    }

    #[test]
    fn end_must_share_the_last_point_key() {
        let features = [line(&[(0.0, 0.0), (10.0, 0.0)]), line(&[(10.0, 0.0), (20.0, 0.0)])];
        // Snaps to (20, 0) but keys to (40, 2).
        assert!(find_path_via_features(&features, pt(0.0, 0.0), pt(20.0, 1.2), TOL).is_none());
        // Off the vertex but inside its cell.
        let path = find_path_via_features(&features, pt(0.0, 0.0), pt(20.1, 0.1), TOL).unwrap();
        assert_eq!(path.last(), Some(&pt(20.0, 0.0)));
    }

    #[test]
    fn unreachable_end_returns_none() {
        let features = [line(&[(0.0, 0.0), (10.0, 0.0)]), line(&[(50.0, 0.0), (60.0, 0.0)])];
        assert!(find_path_via_features(&features, pt(0.0, 0.0), pt(60.0, 0.0), TOL).is_none());
        assert!(find_path_via_features(&features, pt(0.0, 0.0), pt(30.0, 0.0), TOL).is_none());
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use fq_core::{FqError, NetworkConfig};

    use super::helpers::{feature, pt, staircase};
    use crate::{LayerFilter, MemorySource, RoutePlanner, Strategy};

    /// tolerance = 0.25 × 2 = 0.5
    const MUPP: f64 = 0.25;

    fn planner(filter: LayerFilter) -> RoutePlanner {
        let config = NetworkConfig { snap_pixels: 2.0, ..NetworkConfig::default() };
        RoutePlanner::new(config, filter)
    }

    #[test]
    fn dense_graph_first() {
        let source = MemorySource::new(staircase());
        let planned = planner(LayerFilter::All)
            .plan(&source, pt(0.0, 0.0), pt(20.0, 10.0), MUPP)
            .unwrap()
            .unwrap();
        assert_eq!(planned.strategy, Strategy::Dense);
        assert_eq!(planned.points.len(), 4);
    }

    #[test]
    fn filter_excludes_other_layers() {
        let mut features = staircase();
        // A cable shortcut that must not be used for routing.
        features.push(feature("Cable", 9, &[(0.0, 0.0), (20.0, 10.0)]));
        let source = MemorySource::new(features);

        let routed = planner(LayerFilter::Prefix("route".into()))
            .plan(&source, pt(0.0, 0.0), pt(20.0, 10.0), MUPP)
            .unwrap()
            .unwrap();
        assert_eq!(routed.points.len(), 4);

        let any = planner(LayerFilter::All)
            .plan(&source, pt(0.0, 0.0), pt(20.0, 10.0), MUPP)
            .unwrap()
            .unwrap();
        assert_eq!(any.points, vec![pt(0.0, 0.0), pt(20.0, 10.0)]);
    }

    /// The click's nearest vertex is the interior of an isolated feature, so
    /// the dense graph fails; the nearest endpoint belongs to a usable route.
    fn decoy_and_route() -> MemorySource {
        MemorySource::new(vec![
            feature("Route", 1, &[(-5.0, 1.0), (0.0, 0.2), (5.0, 1.0)]),
            feature("Route", 2, &[(0.0, 0.5), (10.0, 0.5)]),
        ])
    }

    #[test]
    fn falls_back_to_joined_routes() {
        let planned = planner(LayerFilter::All)
            .plan(&decoy_and_route(), pt(0.0, 0.0), pt(10.0, 0.5), MUPP)
            .unwrap()
            .unwrap();
        assert_eq!(planned.strategy, Strategy::Joined);
        assert_eq!(planned.points, vec![pt(0.0, 0.5), pt(10.0, 0.5)]);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let mut p = planner(LayerFilter::All);
        p.config.join_fallback = false;
        let planned = p.plan(&decoy_and_route(), pt(0.0, 0.0), pt(10.0, 0.5), MUPP).unwrap();
        assert!(planned.is_none());
    }

    #[test]
    fn bad_scale_is_an_error() {
        let source = MemorySource::new(staircase());
        let result = planner(LayerFilter::All).plan(&source, pt(0.0, 0.0), pt(20.0, 10.0), 0.0);
        assert!(matches!(result, Err(FqError::InvalidTolerance(_))));
    }

    #[test]
    fn empty_source_finds_nothing() {
        let source = MemorySource::default();
        let planned = planner(LayerFilter::All)
            .plan(&source, pt(0.0, 0.0), pt(20.0, 10.0), MUPP)
            .unwrap();
        assert!(planned.is_none());
    }
}

// ── Distance along line ───────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use fq_core::{DistanceMeasurer, MeasureError, PlanarMeasurer, Point};

    use super::helpers::{line, pt, staircase};
    use crate::{cable_length, distance_along_line, line_length};
    use crate::distance::round_to;

    const M: PlanarMeasurer = PlanarMeasurer::METRES;

    /// Fails for any piece starting at x = 5.
    struct FailsAtFive;

    impl DistanceMeasurer for FailsAtFive {
        fn measure_line(&self, a: Point, b: Point) -> Result<f64, MeasureError> {
            if a.x == 5.0 {
                Err(MeasureError::NonFinite(a))
            } else {
                Ok(a.distance(b))
            }
        }
    }

    #[test]
    fn click_on_first_route() {
        let a = &staircase()[0];
        assert_eq!(distance_along_line(a.points(), 0, pt(5.0, 0.0), &M), 5.0);
    }

    #[test]
    fn start_middle_end() {
        let v = line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let total = line_length(&v, &M);
        assert_eq!(total, 10.0);
        assert_eq!(distance_along_line(&v, 0, pt(0.0, 0.0), &M), 0.0);
        assert_eq!(distance_along_line(&v, 0, pt(5.0, 0.0), &M), total / 2.0);
        assert_eq!(distance_along_line(&v, 1, pt(5.0, 0.0), &M), total / 2.0);
        assert!((distance_along_line(&v, 1, pt(10.0, 0.0), &M) - total).abs() < 1e-9);
    }

    #[test]
    fn accumulates_earlier_segments() {
        let v = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]);
        assert_eq!(distance_along_line(&v, 2, pt(15.0, 10.0), &M), 25.0);
    }

    #[test]
    fn segment_index_is_clamped() {
        let v = line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert_eq!(distance_along_line(&v, -3, pt(2.0, 0.0), &M), 2.0);
        assert_eq!(distance_along_line(&v, 7, pt(10.0, 0.0), &M), 10.0);
    }

    #[test]
    fn short_lines_measure_zero() {
        assert_eq!(distance_along_line(&[], 0, pt(1.0, 1.0), &M), 0.0);
        assert_eq!(distance_along_line(&[pt(0.0, 0.0)], 0, pt(1.0, 1.0), &M), 0.0);
    }

    #[test]
    fn failed_pieces_count_as_zero() {
        let v = line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert_eq!(distance_along_line(&v, 1, pt(10.0, 0.0), &FailsAtFive), 5.0);
        assert_eq!(line_length(&v, &FailsAtFive), 5.0);
    }

    #[test]
    fn cable_length_adds_slack() {
        let v = line(&[(0.0, 0.0), (3.0, 4.0)]);
        let len = cable_length(&v, [Some(10.0), None, Some(2.5), Some(f64::NAN)], &M);
        assert_eq!(len.geometry_m, 5.0);
        assert_eq!(len.slack_m, 12.5);
        assert_eq!(len.total_m, 17.5);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }
}

// ── Cable snapping and breaks ─────────────────────────────────────────────────

#[cfg(test)]
mod locate {
    use fq_core::{FeatureId, PlanarMeasurer};

    use super::helpers::{feature, line, pt};
    use crate::{closest_segment, locate_break, CableIndex};

    fn cables() -> Vec<crate::RouteFeature> {
        vec![
            feature("Cable", 7, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            feature("Cable", 8, &[(50.0, 50.0), (60.0, 50.0)]),
        ]
    }

    #[test]
    fn closest_segment_projects_orthogonally() {
        let v = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let hit = closest_segment(&v, pt(12.0, 5.0)).unwrap();
        assert_eq!(hit.segment_index, 1);
        assert_eq!(hit.point, pt(10.0, 5.0));
        assert_eq!(hit.distance, 2.0);

        let hit = closest_segment(&v, pt(5.0, -1.0)).unwrap();
        assert_eq!(hit.segment_index, 0);
        assert_eq!(hit.point, pt(5.0, 0.0));
    }

    #[test]
    fn closest_segment_clamps_to_ends() {
        let v = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let hit = closest_segment(&v, pt(-3.0, 4.0)).unwrap();
        assert_eq!(hit.point, pt(0.0, 0.0));
        assert_eq!(hit.distance, 5.0);
        assert!(closest_segment(&v[..1], pt(0.0, 0.0)).is_none());
    }

    #[test]
    fn index_finds_nearest_cable() {
        let features = cables();
        let index = CableIndex::new(&features);
        assert_eq!(index.segment_count(), 3);

        let hit = index.nearest(pt(55.0, 52.0)).unwrap();
        assert_eq!(hit.id, FeatureId(8));
        assert_eq!(hit.point, pt(55.0, 50.0));
        assert_eq!(hit.distance, 2.0);
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index = CableIndex::new(&[]);
        assert!(index.is_empty());
        assert!(index.nearest(pt(0.0, 0.0)).is_none());
    }

    #[test]
    fn break_distance_along_cable() {
        let features = cables();
        let brk = locate_break(&features, pt(11.0, 4.0), &PlanarMeasurer::METRES).unwrap();
        assert_eq!(brk.layer, "Cable");
        assert_eq!(brk.feature_id, FeatureId(7));
        assert_eq!(brk.segment_index, 1);
        assert_eq!(brk.point, pt(10.0, 4.0));
        assert_eq!(brk.distance_m, 14.0);
        assert_eq!(brk.segment_count, 2);
    }

    #[test]
    fn multipart_cable_chosen_by_any_part_measured_on_first() {
        use fq_core::{Geometry, Polyline};

        let geometry = Geometry::MultiPart(vec![
            Polyline::new(line(&[(0.0, 0.0), (10.0, 0.0)])),
            Polyline::new(line(&[(0.0, 20.0), (10.0, 20.0)])),
        ]);
        let features = vec![
            crate::RouteFeature::new("Cable", FeatureId(1), geometry),
            feature("Cable", 2, &[(0.0, 25.0), (10.0, 25.0)]),
        ];
        // The second part is the closest line, so the multi-part cable is
        // chosen; the break is still measured along its first part.
        let hit = CableIndex::new(&features).nearest(pt(5.0, 20.5)).unwrap();
        assert_eq!(hit.id, FeatureId(1));
        assert_eq!(hit.distance, 0.5);
        assert_eq!(hit.point, pt(5.0, 0.0));

        let brk = locate_break(&features, pt(5.0, 20.5), &PlanarMeasurer::METRES).unwrap();
        assert_eq!(brk.feature_id, FeatureId(1));
        assert_eq!(brk.point, pt(5.0, 0.0));
        assert_eq!(brk.distance_m, 5.0);
        assert_eq!(brk.segment_count, 1);
    }
}

// ── Sources and CSV loading ───────────────────────────────────────────────────

#[cfg(test)]
mod sources {
    use std::io::Cursor;

    use fq_core::{FeatureId, FqError, Geometry};

    use super::helpers::{feature, pt};
    use crate::{load_features_csv, load_features_reader, FeatureSource, LayerFilter, MemorySource};

    const CSV: &str = "\
layer,feature_id,part,seq,x,y\n\
Route,1,0,1,10.0,0.0\n\
Route,1,0,0,0.0,0.0\n\
Cable,5,0,0,0.0,0.0\n\
Cable,5,1,0,5.0,5.0\n\
Cable,5,0,1,3.0,0.0\n\
Cable,5,1,1,6.0,5.0\n\
Route,2,0,0,10.0,0.0\n\
Route,2,0,1,10.0,10.0\n";

    #[test]
    fn filters() {
        assert!(LayerFilter::All.matches("anything"));
        assert!(LayerFilter::Prefix("route".into()).matches("Route_2"));
        assert!(!LayerFilter::Prefix("route".into()).matches("Cable"));
        assert!(!LayerFilter::Prefix("routes_long".into()).matches("Route"));
        assert!(LayerFilter::Prefix("траса".into()).matches("Траса_1"));
        assert!(LayerFilter::Prefix("šaht".into()).matches("ŠAHTOVI"));
        assert!(LayerFilter::Prefix("Kabl".into()).matches("kablovi"));
        assert!(!LayerFilter::Prefix("šaht".into()).matches("Saht"));
        let named = LayerFilter::Named(vec!["Route".into()]);
        assert!(named.matches("Route"));
        assert!(!named.matches("Route_2"));
    }

    #[test]
    fn memory_source_applies_filter() {
        let source = MemorySource::new(vec![
            feature("Route", 1, &[(0.0, 0.0), (1.0, 0.0)]),
            feature("Cable", 2, &[(0.0, 0.0), (1.0, 0.0)]),
        ]);
        let routes = source.list_polylines(&LayerFilter::Named(vec!["Route".into()]));
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, FeatureId(1));
        // Snapshots are independent; listing twice works.
        assert_eq!(source.list_polylines(&LayerFilter::All).len(), 2);
        assert_eq!(source.list_polylines(&LayerFilter::All).len(), 2);
    }

    #[test]
    fn csv_groups_and_orders_vertices() {
        let source = load_features_reader(Cursor::new(CSV)).unwrap();
        let features = source.features();
        assert_eq!(features.len(), 3);

        // First-seen order.
        assert_eq!(features[0].id, FeatureId(1));
        assert_eq!(features[1].id, FeatureId(5));
        assert_eq!(features[2].id, FeatureId(2));

        // Sorted by seq.
        assert_eq!(features[0].points(), &[pt(0.0, 0.0), pt(10.0, 0.0)]);

        // Two parts → multi-part, first part used.
        assert!(features[1].geometry.is_multipart());
        assert_eq!(features[1].geometry.part_count(), 2);
        assert_eq!(features[1].points(), &[pt(0.0, 0.0), pt(3.0, 0.0)]);
        assert!(matches!(features[2].geometry, Geometry::SinglePart(_)));
    }

    #[test]
    fn csv_rejects_bad_numbers() {
        let bad = "layer,feature_id,part,seq,x,y\nRoute,1,0,0,abc,0.0\n";
        let err = load_features_reader(Cursor::new(bad)).unwrap_err();
        assert!(matches!(err, FqError::Parse(_)));

        let nan = "layer,feature_id,part,seq,x,y\nRoute,1,0,0,NaN,0.0\n";
        assert!(matches!(load_features_reader(Cursor::new(nan)), Err(FqError::Parse(_))));
    }

    #[test]
    fn csv_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.csv");
        std::fs::write(&path, CSV).unwrap();
        let source = load_features_csv(&path).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_features_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, FqError::Io(_)));
    }
}
