//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use ev_spatial::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("mumbai.osm.pbf"))?.largest_strongly_connected();
//! ```
//!
//! # What is loaded
//!
//! Only drivable `highway=*` ways are included (see [`is_drivable`]).
//! Footways, buildings, POIs and relations are ignored.  One-way roads add a
//! single directed edge; two-way roads add both directions.  Edge lengths
//! are haversine distances between consecutive way nodes.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};

use ev_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a drivable road network from an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] when the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> SpatialResult<RoadNetwork> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| is_drivable(h)) {
                    let oneway = is_oneway(highway, &tags);
                    road_ways.push(OsmWay { refs: w.refs().collect(), oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: FxHashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Sorted so node ids are reproducible across runs.
    let mut ordered: Vec<i64> = road_node_ids.into_iter().collect();
    ordered.sort_unstable();

    let mut osm_to_node: FxHashMap<i64, NodeId> = FxHashMap::default();
    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            osm_to_node.insert(osm_id, builder.add_node(pos, osm_id));
        }
    }
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            if let (Some(&from), Some(&to)) = (osm_to_node.get(&window[0]), osm_to_node.get(&window[1])) {
                builder.add_directed_edge_derived(from, to);
                if !way.oneway {
                    builder.add_directed_edge_derived(to, from);
                }
            }
        }
    }

    let network = builder.build();
    log::info!(
        "Loaded OSM road graph from {}: {} nodes, {} edges from {} ways",
        path.display(),
        network.node_count(),
        network.edge_count(),
        road_ways.len()
    );
    Ok(network)
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:   Vec<i64>,
    oneway: bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` if a `highway` value is drivable by car.
///
/// Unknown road types are kept rather than dropped.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction"
    )
}

/// Determine whether a way should be treated as one-way for car traffic.
///
/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
