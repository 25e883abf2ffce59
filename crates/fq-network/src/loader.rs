//! CSV route feature loader.
//!
//! # CSV format
//!
//! One row per vertex.  Vertices of a feature may appear in any order; they
//! are ordered by `part`, then by `seq`.
//!
//! ```csv
//! layer,feature_id,part,seq,x,y
//! Route,1,0,0,0.0,0.0
//! Route,1,0,1,10.0,0.0
//! Route,2,0,0,10.0,0.0
//! Route,2,0,1,10.0,10.0
//! ```
//!
//! Features keep the order in which their first row appears.  A feature with
//! a single part loads as [`Geometry::SinglePart`], one with several parts as
//! [`Geometry::MultiPart`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Deserialize;

use fq_core::{FeatureId, FqError, FqResult, Geometry, Point, Polyline};

use crate::source::{MemorySource, RouteFeature};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeatureRecord {
    layer:      String,
    feature_id: u64,
    #[serde(default)]
    part:       u32,
    seq:        u32,
    x:          f64,
    y:          f64,
}

type PartMap = BTreeMap<u32, Vec<(u32, Point)>>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load route features from a CSV file.
pub fn load_features_csv(path: &Path) -> FqResult<MemorySource> {
    let file = std::fs::File::open(path)?;
    load_features_reader(file)
}

/// Like [`load_features_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for data embedded in a
/// binary.
pub fn load_features_reader<R: Read>(reader: R) -> FqResult<MemorySource> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_feature: IndexMap<(String, u64), PartMap, FxBuildHasher> = IndexMap::default();

    for result in csv_reader.deserialize::<FeatureRecord>() {
        let row = result.map_err(|e| FqError::Parse(e.to_string()))?;
        let point = Point::new(row.x, row.y);
        if !point.is_finite() {
            return Err(FqError::Parse(format!(
                "feature {} on layer {:?} has a non-finite vertex",
                row.feature_id, row.layer
            )));
        }
        by_feature
            .entry((row.layer, row.feature_id))
            .or_default()
            .entry(row.part)
            .or_default()
            .push((row.seq, point));
    }

    let features: MemorySource = by_feature
        .into_iter()
        .map(|((layer, id), parts)| RouteFeature::new(layer, FeatureId(id), assemble(parts)))
        .collect();

    log::debug!("loaded {} route features", features.len());
    Ok(features)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn assemble(parts: PartMap) -> Geometry {
    let mut lines: Vec<Polyline> = parts
        .into_values()
        .map(|mut vertices| {
            vertices.sort_by_key(|&(seq, _)| seq);
            vertices.into_iter().map(|(_, p)| p).collect()
        })
        .collect();

    if lines.len() == 1 {
        Geometry::SinglePart(lines.remove(0))
    } else {
        Geometry::MultiPart(lines)
    }
}
