//! Per-candidate metrics.

use ev_core::{AreaRecord, EvacuationPriority};

use crate::config::{EtaModel, ScoreWeights};

impl EtaModel {
    /// Assumed average speed for a trip of `distance_km`.
    pub fn speed_kmh(&self, distance_km: f64) -> f64 {
        self.tiers
            .iter()
            .find(|t| distance_km < t.below_km)
            .map_or(self.fallback_kmh, |t| t.kmh)
    }

    /// Travel time in minutes, flood buffer included.
    pub fn eta_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh(distance_km) * 60.0 * self.emergency_multiplier
    }
}

impl ScoreWeights {
    /// Composite score of evacuating from `start` to `dest` over
    /// `distance_km`.  Lower is better; negative scores are normal for
    /// moves to much safer areas.
    pub fn score(&self, distance_km: f64, start: &AreaRecord, dest: &AreaRecord) -> f64 {
        let density = dest.population_density.map_or(0.0, f64::from);
        let base = self.distance * distance_km
            - self.safety * f64::from(safety_improvement(start, dest))
            + self.density * density / self.density_scale;
        base * urgency(start.evacuation_priority)
    }
}

/// Severity drop from `start` to `dest`; positive when `dest` is safer.
pub fn safety_improvement(start: &AreaRecord, dest: &AreaRecord) -> i8 {
    start.flood_risk.severity() as i8 - dest.flood_risk.severity() as i8
}

/// Score multiplier for the start area's evacuation priority.  Areas
/// without a priority are treated as `Safe`.
pub fn urgency(priority: Option<EvacuationPriority>) -> f64 {
    priority.map_or(1.0, EvacuationPriority::urgency_multiplier)
}

/// Rough headroom of a destination, `10..=100`, falling with density.
/// Unknown density counts as full headroom.
pub fn capacity_score(population_density: Option<u32>) -> f64 {
    population_density.map_or(100.0, |d| (100.0 - f64::from(d) / 1_000.0).clamp(10.0, 100.0))
}
