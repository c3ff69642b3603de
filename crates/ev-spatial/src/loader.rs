//! CSV road-graph loader.
//!
//! A graph is a pair of files, typically exported from OSMnx:
//!
//! ```csv
//! # nodes.csv
//! id,lat,lon
//! 245,18.9151,72.8141
//! 246,18.9160,72.8150
//!
//! # edges.csv
//! u,v,key,length
//! 245,246,0,131.4
//! 246,245,0,131.4
//! ```
//!
//! Headers are matched case-insensitively:
//!
//! | File      | Field    | Accepted headers                  |
//! |-----------|----------|-----------------------------------|
//! | nodes     | id       | `id` `osmid` `node_id`            |
//! | nodes     | lat      | `lat` `latitude` `y`              |
//! | nodes     | lon      | `lon` `lng` `longitude` `x`       |
//! | edges     | from     | `u` `from` `source`               |
//! | edges     | to       | `v` `to` `target`                 |
//! | edges     | length   | `length` `length_m` *(optional)*  |
//!
//! Each edge row is one **directed** edge.  Extra columns (`key`, `name`,
//! `highway`, …) are ignored.  A missing or empty length is replaced by the
//! haversine distance between the endpoints.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rustc_hash::FxHashMap;

use ev_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::{SpatialError, SpatialResult};

const NODES: &str = "nodes.csv";
const EDGES: &str = "edges.csv";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road network from a `nodes.csv` / `edges.csv` pair.
pub fn load_graph_csv(nodes: &Path, edges: &Path) -> SpatialResult<RoadNetwork> {
    log::info!("Reading road graph from {} and {}", nodes.display(), edges.display());
    load_graph_readers(File::open(nodes)?, File::open(edges)?)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
pub fn load_graph_readers<N: Read, E: Read>(nodes: N, edges: E) -> SpatialResult<RoadNetwork> {
    let mut builder = RoadNetworkBuilder::new();
    let by_source = read_nodes(nodes, &mut builder)?;
    let derived = read_edges(edges, &by_source, &mut builder)?;

    let network = builder.build();
    log::info!(
        "Loaded road graph: {} nodes, {} edges ({} with derived length)",
        network.node_count(),
        network.edge_count(),
        derived
    );
    Ok(network)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_nodes<R: Read>(
    reader: R,
    builder: &mut RoadNetworkBuilder,
) -> SpatialResult<FxHashMap<i64, NodeId>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let [id_col, lat_col, lon_col] = require(
        NODES,
        &headers,
        [
            ("id",  &["id", "osmid", "node_id"][..]),
            ("lat", &["lat", "latitude", "y"][..]),
            ("lon", &["lon", "lng", "longitude", "x"][..]),
        ],
    )?;

    let mut by_source = FxHashMap::default();
    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        let n = i + 1;
        let id: i64 = parse_cell(&row, id_col, "id").map_err(|m| row_err(NODES, n, m))?;
        let lat: f64 = parse_cell(&row, lat_col, "lat").map_err(|m| row_err(NODES, n, m))?;
        let lon: f64 = parse_cell(&row, lon_col, "lon").map_err(|m| row_err(NODES, n, m))?;

        let pos = GeoPoint::new(lat, lon);
        if !pos.is_valid() {
            return Err(row_err(NODES, n, format!("invalid coordinates {pos}")));
        }
        if by_source.contains_key(&id) {
            return Err(row_err(NODES, n, format!("duplicate node id {id}")));
        }
        by_source.insert(id, builder.add_node(pos, id));
    }
    Ok(by_source)
}

/// Returns the number of edges whose length had to be derived.
fn read_edges<R: Read>(
    reader: R,
    by_source: &FxHashMap<i64, NodeId>,
    builder: &mut RoadNetworkBuilder,
) -> SpatialResult<usize> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let [u_col, v_col] = require(
        EDGES,
        &headers,
        [("u", &["u", "from", "source"][..]), ("v", &["v", "to", "target"][..])],
    )?;
    let length_col = find_column(&headers, &["length", "length_m"][..]);

    let mut derived = 0;
    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        let n = i + 1;
        let u: i64 = parse_cell(&row, u_col, "u").map_err(|m| row_err(EDGES, n, m))?;
        let v: i64 = parse_cell(&row, v_col, "v").map_err(|m| row_err(EDGES, n, m))?;
        let from = *by_source.get(&u).ok_or(SpatialError::UnknownNode { row: n, id: u })?;
        let to   = *by_source.get(&v).ok_or(SpatialError::UnknownNode { row: n, id: v })?;

        match length_col.and_then(|c| row.get(c)).filter(|s| !s.is_empty()) {
            Some(cell) => {
                let length_m: f64 = cell
                    .parse()
                    .ok()
                    .filter(|l: &f64| l.is_finite() && *l >= 0.0)
                    .ok_or_else(|| row_err(EDGES, n, format!("invalid length {cell:?}")))?;
                builder.add_directed_edge(from, to, length_m);
            }
            None => {
                builder.add_directed_edge_derived(from, to);
                derived += 1;
            }
        }
    }
    Ok(derived)
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
}

fn require<const N: usize>(
    file: &'static str,
    headers: &StringRecord,
    fields: [(&'static str, &[&str]); N],
) -> SpatialResult<[usize; N]> {
    let mut cols = [0usize; N];
    let mut missing = Vec::new();
    for (slot, (label, aliases)) in cols.iter_mut().zip(fields) {
        match find_column(headers, aliases) {
            Some(c) => *slot = c,
            None => missing.push(label),
        }
    }
    if missing.is_empty() {
        Ok(cols)
    } else {
        Err(SpatialError::MissingColumns { file, missing })
    }
}

fn parse_cell<T: std::str::FromStr>(row: &StringRecord, col: usize, what: &str) -> Result<T, String> {
    let cell = row.get(col).unwrap_or("");
    if cell.is_empty() {
        return Err(format!("empty {what}"));
    }
    // OSMnx writes integer ids as floats in some exports.
    cell.parse::<T>()
        .or_else(|_| cell.strip_suffix(".0").unwrap_or(cell).parse::<T>())
        .map_err(|_| format!("invalid {what} {cell:?}"))
}

fn row_err(file: &'static str, row: usize, message: String) -> SpatialError {
    SpatialError::Row { file, row, message }
}
