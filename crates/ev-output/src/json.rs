//! JSON output backend.
//!
//! Buffers every query and writes `routes.json` on [`finish`](OutputWriter::finish):
//!
//! ```json
//! [
//!   {
//!     "query": "colaba",
//!     "status": "routes",
//!     "start": { "name": "Colaba", "confidence": 100, "coords": [72.8141, 18.9151] },
//!     "routes": [
//!       { "rank": 1, "destination": "Churchgate", "coords": [72.8284, 18.9346],
//!         "path": [[72.8141, 18.9151], [72.8284, 18.9346]], ... }
//!     ]
//!   }
//! ]
//! ```
//!
//! Coordinates are `[lon, lat]` pairs, the order map renderers expect.
//! `path` is `null` for straight-line routes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use ev_core::GeoPoint;
use ev_route::{EvacuationContext, Recommendation, RouteCandidate};

use crate::row::round_to;
use crate::writer::OutputWriter;
use crate::OutputResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Routes,
    NoRoute,
    Unresolved,
}

#[derive(Debug, Serialize)]
struct StartJson {
    name:       String,
    confidence: u8,
    coords:     [f64; 2],
}

#[derive(Debug, Serialize)]
struct SuggestionJson {
    name:  String,
    score: u8,
}

#[derive(Debug, Serialize)]
struct RouteJson {
    rank:               u32,
    destination:        String,
    ward:               String,
    coords:             [f64; 2],
    distance_km:        f64,
    eta_minutes:        f64,
    risk_level:         &'static str,
    safety_improvement: i8,
    score:              f64,
    capacity_score:     f64,
    transport:          &'static str,
    shelter_type:       Option<String>,
    shelter_capacity:   Option<u32>,
    path:               Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Serialize)]
struct QueryJson {
    query:       String,
    status:      Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    start:       Option<StartJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<SuggestionJson>,
    routes:      Vec<RouteJson>,
}

/// Writes every recommendation to `routes.json`.
pub struct JsonRouteWriter {
    path:     PathBuf,
    queries:  Vec<QueryJson>,
    finished: bool,
}

impl JsonRouteWriter {
    /// Prepare to write `routes.json` in `dir`.  The file is created on
    /// [`finish`](OutputWriter::finish); `dir` must exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )
            .into());
        }
        Ok(Self { path: dir.join("routes.json"), queries: Vec::new(), finished: false })
    }
}

fn lon_lat(p: GeoPoint) -> [f64; 2] {
    [p.lon, p.lat]
}

fn route_json(rank: u32, c: &RouteCandidate, ctx: &EvacuationContext) -> RouteJson {
    let coords = ctx.catalog().get(c.destination).map_or([0.0, 0.0], |r| lon_lat(r.pos));
    let path = match (&c.path, ctx.road()) {
        (Some(nodes), Some(road)) => Some(
            nodes
                .iter()
                .filter_map(|n| road.network.node_pos.get(n.index()).copied())
                .map(lon_lat)
                .collect(),
        ),
        _ => None,
    };
    RouteJson {
        rank,
        destination:        c.name.clone(),
        ward:               c.ward.clone(),
        coords,
        distance_km:        round_to(c.distance_km, 2),
        eta_minutes:        round_to(c.eta_minutes, 1),
        risk_level:         c.risk_level.as_str(),
        safety_improvement: c.safety_improvement,
        score:              round_to(c.score, 2),
        capacity_score:     round_to(c.capacity_score, 1),
        transport:          c.transport.as_str(),
        shelter_type:       c.shelter_type.clone(),
        shelter_capacity:   c.shelter_capacity,
        path,
    }
}

impl OutputWriter for JsonRouteWriter {
    fn write_recommendation(
        &mut self,
        query: &str,
        rec: &Recommendation,
        ctx: &EvacuationContext,
    ) -> OutputResult<()> {
        let start = rec.start().and_then(|res| {
            let rec = ctx.catalog().get(res.matched?)?;
            Some(StartJson {
                name:       rec.display_name(),
                confidence: res.confidence,
                coords:     lon_lat(rec.pos),
            })
        });

        let (status, suggestions) = match rec {
            Recommendation::Routes { .. } => (Status::Routes, Vec::new()),
            Recommendation::NoRoute { .. } => (Status::NoRoute, Vec::new()),
            Recommendation::Unresolved { suggestions, .. } => (
                Status::Unresolved,
                suggestions
                    .iter()
                    .map(|(name, score)| SuggestionJson { name: name.clone(), score: *score })
                    .collect(),
            ),
        };

        let routes = rec
            .routes()
            .iter()
            .enumerate()
            .map(|(i, c)| route_json(i as u32 + 1, c, ctx))
            .collect();

        self.queries.push(QueryJson { query: query.to_owned(), status, start, suggestions, routes });
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &self.queries)?;
        out.write_all(b"\n")?;
        out.flush()?;
        log::info!("Wrote {} queries to {}", self.queries.len(), self.path.display());
        Ok(())
    }
}
