//! `fq-network` — route graphs, path finding, and distance along cables.
//!
//! All structures are built per query from a snapshot of the host's route
//! features and dropped afterwards.  "Nothing found" is always `None`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`key`]      | `VertexKey`, `key_for`                                        |
//! | [`graph`]    | `NetworkGraph`, `NetworkGraphBuilder`, `build_graph`          |
//! | [`path`]     | `find_path` (hop-count BFS over the dense graph)              |
//! | [`joined`]   | `JoinedRouteGraph`, `find_path_via_features`                  |
//! | [`planner`]  | `PathFinder` trait, `RoutePlanner` with joined fallback       |
//! | [`distance`] | `distance_along_line`, `line_length`, `cable_length`          |
//! | [`locate`]   | `closest_segment`, `CableIndex`, `locate_break`               |
//! | [`source`]   | `FeatureSource`, `LayerFilter`, `RouteFeature`, `MemorySource`|
//! | [`loader`]   | `load_features_csv`, `load_features_reader`                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `fq-core` types.        |

pub mod distance;
pub mod graph;
pub mod joined;
pub mod key;
pub mod loader;
pub mod locate;
pub mod path;
pub mod planner;
pub mod source;

#[cfg(test)]
mod tests;

pub use distance::{cable_length, distance_along_line, line_length, CableLength};
pub use graph::{build_graph, NetworkGraph, NetworkGraphBuilder};
pub use joined::{find_path_via_features, find_path_via_features_within, JoinedEdge, JoinedRouteGraph};
pub use key::{key_for, VertexKey};
pub use loader::{load_features_csv, load_features_reader};
pub use locate::{closest_segment, locate_break, BreakLocation, CableHit, CableIndex, SegmentHit};
pub use path::{find_path, find_path_within};
pub use planner::{DenseBfsFinder, JoinedRouteFinder, PathFinder, PlannedPath, RoutePlanner, Strategy};
pub use source::{FeatureSource, LayerFilter, MemorySource, RouteFeature};
