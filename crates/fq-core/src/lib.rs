//! `fq-core` — foundational types for the FiberQ route network crates.
//!
//! This crate has no `fq-*` dependencies and only `thiserror` (plus optional
//! `serde`) as external ones.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `FeatureId`                                           |
//! | [`geo`](self::geo)| `Point`, `Polyline`, `Geometry`                       |
//! | [`measure`]     | `DistanceMeasurer`, planar and ellipsoidal measurers  |
//! | [`config`]      | `NetworkConfig`, tolerance checks                     |
//! | [`error`]       | `FqError`, `FqResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod measure;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{check_tolerance, NetworkConfig};
pub use error::{FqError, FqResult};
pub use self::geo::{Geometry, Point, Polyline};
pub use ids::FeatureId;
pub use measure::{DistanceMeasurer, Ellipsoid, EllipsoidMeasurer, MeasureError, PlanarMeasurer};
