//! Ranking configuration.
//!
//! Every constant of the scoring model lives here as a named default so a
//! deployment can retune it from a TOML file without touching code.  With
//! the `serde` feature all structs deserialize with per-field defaults, so a
//! config file only needs the keys it overrides:
//!
//! ```toml
//! top_k = 3
//! safe_ceiling = "low"
//!
//! [weights]
//! safety = 2.5
//!
//! [eta]
//! emergency_multiplier = 1.3
//! ```

use ev_core::FloodRisk;
use ev_resolve::DEFAULT_THRESHOLD;

use crate::{RouteError, RouteResult};

// ── Score weights ─────────────────────────────────────────────────────────────

pub const W_DISTANCE: f64 = 0.3;
pub const W_SAFETY: f64 = 2.0;
pub const W_DENSITY: f64 = 0.5;
/// Divisor that brings residents/km² into the same range as kilometres.
pub const DENSITY_SCALE: f64 = 100_000.0;

/// Coefficients of the composite route score (lower is better):
///
/// ```text
/// (distance·d − safety·(sev(start) − sev(dest)) + density·density/density_scale) · urgency
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    pub distance:      f64,
    pub safety:        f64,
    pub density:       f64,
    pub density_scale: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance:      W_DISTANCE,
            safety:        W_SAFETY,
            density:       W_DENSITY,
            density_scale: DENSITY_SCALE,
        }
    }
}

// ── ETA model ─────────────────────────────────────────────────────────────────

/// Trips shorter than `below_km` are assumed to average `kmh`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTier {
    pub below_km: f64,
    pub kmh:      f64,
}

/// Distance-bracketed urban speeds plus a flood-conditions buffer.
///
/// The multiplier is a planning factor, not a measured quantity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EtaModel {
    /// Ascending by `below_km`; the first tier whose bound exceeds the
    /// distance applies.
    pub tiers:                Vec<SpeedTier>,
    /// Speed for trips beyond the last tier.
    pub fallback_kmh:         f64,
    pub emergency_multiplier: f64,
}

impl Default for EtaModel {
    fn default() -> Self {
        Self {
            tiers: vec![
                SpeedTier { below_km: 3.0,  kmh: 12.0 }, // local roads, heavy traffic
                SpeedTier { below_km: 8.0,  kmh: 18.0 }, // main roads
                SpeedTier { below_km: 15.0, kmh: 25.0 }, // arterials
            ],
            fallback_kmh:         35.0, // highways
            emergency_multiplier: 1.4,
        }
    }
}

// ── RouteConfig ───────────────────────────────────────────────────────────────

/// Everything that shapes one ranking pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Maximum number of routes returned.
    pub top_k: usize,
    /// Highest flood risk a destination may carry.
    pub safe_ceiling: FloodRisk,
    /// When set, destinations that carry an evacuation priority must be
    /// `safe` or `standard`.  Destinations without a priority always pass.
    pub require_receiving_priority: bool,
    /// Minimum resolver confidence (inclusive).
    pub match_threshold: u8,
    /// Suggestions offered for an unresolved query.
    pub suggestion_limit: usize,
    pub weights: ScoreWeights,
    pub eta: EtaModel,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            safe_ceiling: FloodRisk::Moderate,
            require_receiving_priority: true,
            match_threshold: DEFAULT_THRESHOLD,
            suggestion_limit: 5,
            weights: ScoreWeights::default(),
            eta: EtaModel::default(),
        }
    }
}

impl RouteConfig {
    /// Reject settings that would make scores or ETAs meaningless.
    pub fn validate(&self) -> RouteResult<()> {
        let bad = |msg: String| Err(RouteError::Config(msg));

        if self.match_threshold > 100 {
            return bad(format!("match_threshold {} exceeds 100", self.match_threshold));
        }
        let w = &self.weights;
        if ![w.distance, w.safety, w.density].iter().all(|x| x.is_finite()) {
            return bad("score weights must be finite".into());
        }
        if !(w.density_scale.is_finite() && w.density_scale > 0.0) {
            return bad(format!("density_scale must be positive, got {}", w.density_scale));
        }

        let eta = &self.eta;
        if !(eta.emergency_multiplier.is_finite() && eta.emergency_multiplier > 0.0) {
            return bad(format!("emergency_multiplier must be positive, got {}", eta.emergency_multiplier));
        }
        if !(eta.fallback_kmh.is_finite() && eta.fallback_kmh > 0.0) {
            return bad(format!("fallback_kmh must be positive, got {}", eta.fallback_kmh));
        }
        for pair in eta.tiers.windows(2) {
            if pair[0].below_km >= pair[1].below_km {
                return bad("speed tiers must be strictly ascending by below_km".into());
            }
        }
        if let Some(t) = eta.tiers.iter().find(|t| !(t.kmh.is_finite() && t.kmh > 0.0)) {
            return bad(format!("tier below {} km has non-positive speed {}", t.below_km, t.kmh));
        }
        Ok(())
    }
}
