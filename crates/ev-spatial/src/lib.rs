//! `ev-spatial`: road network, spatial indexing, routing, and region mapping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`          |
//! | [`scc`]     | `RoadNetwork::largest_strongly_connected`                   |
//! | [`router`]  | `Router` trait, `Path`, `DijkstraRouter`                    |
//! | [`regions`] | `RegionMap`: nearest-area tagging of nodes and edges        |
//! | [`loader`]  | `load_graph_csv`: `nodes.csv` / `edges.csv` pair            |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Coordinate frame
//!
//! Node positions, area positions and every query point are raw WGS-84
//! degrees.  The R-trees compare squared `[lat, lon]` differences, which
//! orders neighbours correctly at city scale; distances reported to callers
//! are haversine.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `osm`      | Enables OSM PBF loading via the `osmpbf` crate.          |
//! | `parallel` | Region assignment runs on the Rayon pool.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod error;
pub mod loader;
pub mod network;
pub mod regions;
pub mod router;
pub mod scc;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use loader::{load_graph_csv, load_graph_readers};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use regions::RegionMap;
pub use router::{DijkstraRouter, Path, Router};
