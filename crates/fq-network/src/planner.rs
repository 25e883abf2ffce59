//! Path-finding strategies and the planner that chains them.
//!
//! # Pluggability
//!
//! Map tools call path finding through the [`PathFinder`] trait, so a
//! weighted finder (shortest by length rather than hop count) can be dropped
//! in without touching callers.  [`RoutePlanner`] runs the dense vertex
//! graph first and, when enabled, falls back to joining whole features.

use std::fmt;

use fq_core::{check_tolerance, FqResult, NetworkConfig, Point};

use crate::graph::build_graph;
use crate::joined::find_path_via_features_within;
use crate::path::find_path_within;
use crate::source::{FeatureSource, LayerFilter, RouteFeature};

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// One way of connecting two points across a set of route features.
pub trait PathFinder {
    /// `None` if the points cannot be connected.  `tolerance` is the
    /// quantization tolerance; `snap_radius` bounds how far a point may be
    /// from the network.
    fn find(
        &self,
        features: &[RouteFeature],
        start: Point,
        end: Point,
        tolerance: f64,
        snap_radius: f64,
    ) -> Option<Vec<Point>>;
}

/// BFS over every vertex of every feature.
#[derive(Copy, Clone, Debug, Default)]
pub struct DenseBfsFinder;

impl PathFinder for DenseBfsFinder {
    fn find(
        &self,
        features: &[RouteFeature],
        start: Point,
        end: Point,
        tolerance: f64,
        snap_radius: f64,
    ) -> Option<Vec<Point>> {
        let graph = build_graph(features, tolerance)?;
        find_path_within(&graph, start, end, snap_radius)
    }
}

/// BFS over feature endpoints, stitching whole features.
#[derive(Copy, Clone, Debug, Default)]
pub struct JoinedRouteFinder;

impl PathFinder for JoinedRouteFinder {
    fn find(
        &self,
        features: &[RouteFeature],
        start: Point,
        end: Point,
        tolerance: f64,
        snap_radius: f64,
    ) -> Option<Vec<Point>> {
        find_path_via_features_within(features, start, end, tolerance, snap_radius)
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Which strategy produced a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Dense,
    Joined,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Dense => "dense",
            Strategy::Joined => "joined",
        })
    }
}

/// A connecting path and how it was found.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPath {
    pub points: Vec<Point>,
    pub strategy: Strategy,
}

/// Reads features from a [`FeatureSource`] and connects two points.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    pub config: NetworkConfig,
    pub filter: LayerFilter,
}

impl RoutePlanner {
    pub fn new(config: NetworkConfig, filter: LayerFilter) -> Self {
        Self { config, filter }
    }

    /// Connect `start` and `end` at the given canvas scale.
    ///
    /// # Errors
    ///
    /// Only for an unusable tolerance; "no path" is `Ok(None)`.
    pub fn plan<S: FeatureSource + ?Sized>(
        &self,
        source: &S,
        start: Point,
        end: Point,
        map_units_per_pixel: f64,
    ) -> FqResult<Option<PlannedPath>> {
        let tolerance = self.config.tolerance(map_units_per_pixel)?;
        let features = source.list_polylines(&self.filter);
        Ok(self.plan_features(&features, start, end, tolerance))
    }

    /// Connect `start` and `end` over an explicit feature list with a
    /// tolerance already in CRS units.  A non-positive tolerance yields
    /// `None`.
    pub fn plan_features(
        &self,
        features: &[RouteFeature],
        start: Point,
        end: Point,
        tolerance: f64,
    ) -> Option<PlannedPath> {
        let Ok(tolerance) = check_tolerance(tolerance) else {
            log::warn!("refusing path query with tolerance {tolerance}");
            return None;
        };
        let snap_radius = self.config.snap_radius(tolerance);

        if let Some(points) = DenseBfsFinder.find(features, start, end, tolerance, snap_radius) {
            log::debug!("dense graph connected {start} → {end} in {} points", points.len());
            return Some(PlannedPath { points, strategy: Strategy::Dense });
        }
        if !self.config.join_fallback {
            return None;
        }
        let points = JoinedRouteFinder.find(features, start, end, tolerance, snap_radius)?;
        log::debug!("joined routes connected {start} → {end} in {} points", points.len());
        Some(PlannedPath { points, strategy: Strategy::Joined })
    }
}
