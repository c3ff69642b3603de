//! `ev-route`: scoring, ranking, and the per-query entry point.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`config`]  | `RouteConfig`, `ScoreWeights`, `EtaModel`                  |
//! | [`scorer`]  | ETA, composite score, urgency, capacity score              |
//! | [`ranker`]  | `RouteCandidate`, `RoadContext`, `rank_routes`             |
//! | [`context`] | `EvacuationContext`, `Recommendation`                      |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                             |
//!
//! # Flow
//!
//! ```text
//! query ──► PlaceResolver ──► start AreaId ──► rank_routes ──► Vec<RouteCandidate>
//!                 │                                 │
//!                 └─► Unresolved (suggestions)      └─► NoRoute (empty)
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod ranker;
pub mod scorer;


pub use config::{EtaModel, RouteConfig, ScoreWeights, SpeedTier};
pub use context::{EvacuationContext, Recommendation};
pub use error::{RouteError, RouteResult};
pub use ranker::{RoadContext, RouteCandidate, is_eligible, rank_routes};
