//! `ev-core`: foundational types for the `evac` route engine.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `AreaId`, `NodeId`, `EdgeId`                            |
//! | [`geo`]       | `GeoPoint`, haversine distance, `BoundingBox`           |
//! | [`risk`]      | `FloodRisk`, `EvacuationPriority`                       |
//! | [`area`]      | `AreaRecord`, name normalization and display helpers    |
//! | [`transport`] | `EvacuationMode` (recommended means of travel)          |
//! | [`error`]     | `EvError`, `EvResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod area;
pub mod error;
pub mod geo;
pub mod ids;
pub mod risk;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use area::{AreaRecord, normalize_name, title_case};
pub use error::{EvError, EvResult};
pub use geo::{BoundingBox, GeoPoint, haversine_km};
pub use ids::{AreaId, EdgeId, NodeId};
pub use risk::{EvacuationPriority, FloodRisk};
pub use transport::EvacuationMode;
