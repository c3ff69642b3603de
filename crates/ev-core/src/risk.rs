//! Flood-risk classes and evacuation priorities.
//!
//! Source tables spell the same class several ways (`Medium` / `moderate`,
//! `Critical` / `severe`).  Parsing folds every spelling onto one variant;
//! `Display` always emits the canonical lowercase name.

use std::fmt;
use std::str::FromStr;

use crate::EvError;

// ── FloodRisk ─────────────────────────────────────────────────────────────────

/// Flood-risk classification of an area.
///
/// Variant order is severity order, so the derived `Ord` gives
/// `Low < Moderate < High < Severe < Extreme`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FloodRisk {
    Low,
    #[cfg_attr(feature = "serde", serde(alias = "medium"))]
    Moderate,
    High,
    #[cfg_attr(feature = "serde", serde(alias = "critical"))]
    Severe,
    Extreme,
}

impl FloodRisk {
    pub const ALL: [FloodRisk; 5] = [
        FloodRisk::Low,
        FloodRisk::Moderate,
        FloodRisk::High,
        FloodRisk::Severe,
        FloodRisk::Extreme,
    ];

    /// Integer severity, `Low = 1` through `Extreme = 5`.
    ///
    /// The ranker's safety-improvement term is a difference of severities.
    #[inline]
    pub fn severity(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FloodRisk::Low      => "low",
            FloodRisk::Moderate => "moderate",
            FloodRisk::High     => "high",
            FloodRisk::Severe   => "severe",
            FloodRisk::Extreme  => "extreme",
        }
    }
}

impl FromStr for FloodRisk {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "minimal" | "safe"   => Ok(FloodRisk::Low),
            "moderate" | "medium"        => Ok(FloodRisk::Moderate),
            "high"                       => Ok(FloodRisk::High),
            "severe" | "critical"        => Ok(FloodRisk::Severe),
            "extreme"                    => Ok(FloodRisk::Extreme),
            other => Err(EvError::Parse(format!("unknown flood risk level {other:?}"))),
        }
    }
}

impl fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EvacuationPriority ────────────────────────────────────────────────────────

/// How urgently an area's residents must leave.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EvacuationPriority {
    Safe,
    Standard,
    Urgent,
    Immediate,
}

impl EvacuationPriority {
    /// Multiplier applied to a route score when evacuating *from* an area
    /// with this priority.
    pub fn urgency_multiplier(self) -> f64 {
        match self {
            EvacuationPriority::Safe      => 1.0,
            EvacuationPriority::Standard  => 1.5,
            EvacuationPriority::Urgent    => 2.0,
            EvacuationPriority::Immediate => 3.0,
        }
    }

    /// `true` for priorities an area may have and still receive evacuees.
    #[inline]
    pub fn accepts_evacuees(self) -> bool {
        matches!(self, EvacuationPriority::Safe | EvacuationPriority::Standard)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvacuationPriority::Safe      => "safe",
            EvacuationPriority::Standard  => "standard",
            EvacuationPriority::Urgent    => "urgent",
            EvacuationPriority::Immediate => "immediate",
        }
    }
}

impl FromStr for EvacuationPriority {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe"      => Ok(EvacuationPriority::Safe),
            "standard"  => Ok(EvacuationPriority::Standard),
            "urgent"    => Ok(EvacuationPriority::Urgent),
            "immediate" => Ok(EvacuationPriority::Immediate),
            other => Err(EvError::Parse(format!("unknown evacuation priority {other:?}"))),
        }
    }
}

impl fmt::Display for EvacuationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
