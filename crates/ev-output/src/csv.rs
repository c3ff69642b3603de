//! CSV output backend.
//!
//! Creates `routes.csv` in the configured output directory with one row per
//! ranked route.  Queries that produce no routes write nothing.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ev_route::{EvacuationContext, Recommendation};

use crate::row::RouteRow;
use crate::writer::OutputWriter;
use crate::OutputResult;

const HEADER: [&str; 14] = [
    "start",
    "rank",
    "destination",
    "ward",
    "distance_km",
    "eta_minutes",
    "risk_level",
    "safety_improvement",
    "score",
    "capacity_score",
    "transport",
    "path_nodes",
    "shelter_type",
    "shelter_capacity",
];

/// Writes ranked routes to `routes.csv`.
pub struct CsvRouteWriter {
    routes:   Writer<File>,
    finished: bool,
}

impl CsvRouteWriter {
    /// Open (or create) `routes.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(HEADER)?;
        Ok(Self { routes, finished: false })
    }

    pub fn write_rows(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.start.clone(),
                row.rank.to_string(),
                row.destination.clone(),
                row.ward.clone(),
                row.distance_km.to_string(),
                row.eta_minutes.to_string(),
                row.risk_level.to_owned(),
                row.safety_improvement.to_string(),
                row.score.to_string(),
                row.capacity_score.to_string(),
                row.transport.to_owned(),
                row.path_nodes.to_string(),
                row.shelter_type.clone(),
                row.shelter_capacity.map(|c| c.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }
}

impl OutputWriter for CsvRouteWriter {
    fn write_recommendation(
        &mut self,
        query: &str,
        rec: &Recommendation,
        ctx: &EvacuationContext,
    ) -> OutputResult<()> {
        let Recommendation::Routes { start, routes } = rec else {
            log::debug!("no routes to write for {query:?}");
            return Ok(());
        };
        let start_name = start
            .matched
            .and_then(|id| ctx.catalog().get(id))
            .map(|r| r.display_name())
            .unwrap_or_default();
        self.write_rows(&RouteRow::rows(&start_name, routes))
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        Ok(())
    }
}
