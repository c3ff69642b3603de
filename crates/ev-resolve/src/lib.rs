//! `ev-resolve`: fuzzy place-name resolution.
//!
//! Free-text queries such as `"  Bandra  West"` or `"churchgat"` are matched
//! against the canonical names of an [`ev_catalog::AreaCatalog`].
//!
//! # Key types
//!
//! - [`PlaceResolver`] holds the acceptance threshold; `resolve` and
//!   `suggest` are pure functions of the query and the catalog.
//! - [`Resolution`]: best match (if accepted) and its 0–100 confidence.
//! - [`similarity`]: the weighted edit-distance scorer.

pub mod resolver;
pub mod similarity;


pub use resolver::{DEFAULT_THRESHOLD, PlaceResolver, Resolution};
pub use similarity::score;
