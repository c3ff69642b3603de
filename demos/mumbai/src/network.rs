//! Synthetic South Mumbai road network.
//!
//! An 11-junction stand-in for the island city's arterial roads, one junction
//! per catalog area, used by `--demo-roads` when no road CSVs are at hand.
//! Lengths are rough street distances, not survey figures.

use anyhow::{Context, Result};

use ev_catalog::AreaCatalog;
use ev_spatial::{RoadNetwork, RoadNetworkBuilder};

const JUNCTIONS: [&str; 11] = [
    "colaba",
    "cuffe parade",
    "fort",
    "churchgate",
    "marine lines",
    "grant road",
    "byculla",
    "lower parel",
    "worli",
    "dadar west",
    "dadar east",
];

// (from, to, metres); every road is two-way.
const ROADS: [(usize, usize, f64); 13] = [
    (0, 1,  1_900.0),  // Colaba Causeway
    (0, 3,  3_100.0),  // Madame Cama Road
    (1, 2,  2_000.0),
    (2, 3,  1_300.0),  // Veer Nariman Road
    (3, 4,  1_500.0),  // Marine Drive
    (4, 5,  2_200.0),
    (2, 6,  5_600.0),  // P D'Mello Road
    (5, 6,  2_700.0),
    (5, 8,  6_800.0),  // Peddar Road / Annie Besant Road
    (6, 7,  4_700.0),  // Dr Ambedkar Road
    (7, 8,  1_600.0),
    (7, 10, 1_400.0),
    (8, 9,  1_900.0),  // Senapati Bapat Marg
];

/// Build the synthetic network with one node at each junction area's
/// catalog position.
pub fn build_network(catalog: &AreaCatalog) -> Result<RoadNetwork> {
    let mut b = RoadNetworkBuilder::new();
    let mut nodes = Vec::with_capacity(JUNCTIONS.len());
    for (i, name) in JUNCTIONS.iter().enumerate() {
        let id = catalog
            .by_name(name)
            .with_context(|| format!("catalog has no area named {name:?}"))?;
        nodes.push(b.add_node(catalog[id].pos, i as i64));
    }
    for (from, to, length_m) in ROADS {
        b.add_road(nodes[from], nodes[to], length_m);
    }
    Ok(b.build())
}
