//! Plain data row types written by output backends.

use ev_route::RouteCandidate;

/// One ranked route, flattened for tabular output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RouteRow {
    /// Title-cased start area.
    pub start:              String,
    /// 1-based position in the ranking.
    pub rank:               u32,
    pub destination:        String,
    pub ward:               String,
    pub distance_km:        f64,
    pub eta_minutes:        f64,
    pub risk_level:         &'static str,
    pub safety_improvement: i8,
    pub score:              f64,
    pub capacity_score:     f64,
    pub transport:          &'static str,
    /// Road nodes on the path; 0 for straight-line routes.
    pub path_nodes:         u32,
    /// Empty when the destination lists no shelter.
    pub shelter_type:       String,
    pub shelter_capacity:   Option<u32>,
}

impl RouteRow {
    pub fn from_candidate(start: &str, rank: u32, c: &RouteCandidate) -> Self {
        Self {
            start:              start.to_owned(),
            rank,
            destination:        c.name.clone(),
            ward:               c.ward.clone(),
            distance_km:        round_to(c.distance_km, 2),
            eta_minutes:        round_to(c.eta_minutes, 1),
            risk_level:         c.risk_level.as_str(),
            safety_improvement: c.safety_improvement,
            score:              round_to(c.score, 2),
            capacity_score:     round_to(c.capacity_score, 1),
            transport:          c.transport.as_str(),
            path_nodes:         c.path.as_ref().map_or(0, |p| p.len() as u32),
            shelter_type:       c.shelter_type.clone().unwrap_or_default(),
            shelter_capacity:   c.shelter_capacity,
        }
    }

    /// Rows for a whole ranking, ranks starting at 1.
    pub fn rows(start: &str, routes: &[RouteCandidate]) -> Vec<RouteRow> {
        routes
            .iter()
            .enumerate()
            .map(|(i, c)| RouteRow::from_candidate(start, i as u32 + 1, c))
            .collect()
    }
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}
