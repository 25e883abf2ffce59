//! Where route and cable features come from.
//!
//! Path and locate queries never look up layers themselves; the host hands
//! in a [`FeatureSource`] bound to its current project.  Each call returns a
//! fresh owned snapshot, so a query can iterate it as often as it likes.

use fq_core::{FeatureId, Geometry, Point};

// ── RouteFeature ──────────────────────────────────────────────────────────────

/// One line feature from a host layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteFeature {
    /// Name of the layer the feature belongs to.
    pub layer: String,
    pub id: FeatureId,
    pub geometry: Geometry,
}

impl RouteFeature {
    pub fn new(layer: impl Into<String>, id: FeatureId, geometry: impl Into<Geometry>) -> Self {
        Self { layer: layer.into(), id, geometry: geometry.into() }
    }

    /// Vertices used for routing and measurement (first part only).
    #[inline]
    pub fn points(&self) -> &[Point] {
        self.geometry.primary_points()
    }
}

impl AsRef<[Point]> for RouteFeature {
    fn as_ref(&self) -> &[Point] {
        self.points()
    }
}

// ── LayerFilter ───────────────────────────────────────────────────────────────

/// Which layers a query should read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LayerFilter {
    #[default]
    All,
    /// Exact layer names.
    Named(Vec<String>),
    /// Case-insensitive name prefix (Unicode lowercase), e.g. `"route"` for
    /// `Route`, `Route_2`, or `"траса"` for `Траса_1`.
    Prefix(String),
}

impl LayerFilter {
    pub fn matches(&self, layer: &str) -> bool {
        match self {
            LayerFilter::All => true,
            LayerFilter::Named(names) => names.iter().any(|n| n == layer),
            LayerFilter::Prefix(prefix) => layer.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }
}

// ── FeatureSource ─────────────────────────────────────────────────────────────

/// Supplies line features to path and locate queries.
pub trait FeatureSource {
    /// Snapshot of all features on layers accepted by `filter`, in the
    /// source's natural order.
    fn list_polylines(&self, filter: &LayerFilter) -> Vec<RouteFeature>;
}

/// A fixed, in-memory feature collection.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    features: Vec<RouteFeature>,
}

impl MemorySource {
    pub fn new(features: Vec<RouteFeature>) -> Self {
        Self { features }
    }

    pub fn push(&mut self, feature: RouteFeature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[RouteFeature] {
        &self.features
    }
}

impl FeatureSource for MemorySource {
    fn list_polylines(&self, filter: &LayerFilter) -> Vec<RouteFeature> {
        self.features
            .iter()
            .filter(|f| filter.matches(&f.layer))
            .cloned()
            .collect()
    }
}

impl FromIterator<RouteFeature> for MemorySource {
    fn from_iter<I: IntoIterator<Item = RouteFeature>>(iter: I) -> Self {
        Self { features: iter.into_iter().collect() }
    }
}
