//! The area record: one row of the area catalog.

use crate::{EvacuationPriority, FloodRisk, GeoPoint};

/// A locality with its position and flood-risk classification.
///
/// `name` is stored normalized (see [`normalize_name`]); use
/// [`display_name`](Self::display_name) for user-facing output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaRecord {
    pub name:                String,
    /// Municipal ward code (`"A"`, `"K/W"`, …); empty when unknown.
    pub ward:                String,
    pub pos:                 GeoPoint,
    pub flood_risk:          FloodRisk,
    pub evacuation_priority: Option<EvacuationPriority>,
    /// Residents per square kilometre.
    pub population_density:  Option<u32>,
    pub shelter_type:        Option<String>,
    pub shelter_capacity:    Option<u32>,
}

impl AreaRecord {
    /// Minimal record with only the required fields set.
    pub fn new(name: &str, ward: &str, pos: GeoPoint, flood_risk: FloodRisk) -> Self {
        Self {
            name: normalize_name(name),
            ward: ward.trim().to_owned(),
            pos,
            flood_risk,
            evacuation_priority: None,
            population_density: None,
            shelter_type: None,
            shelter_capacity: None,
        }
    }

    pub fn with_priority(mut self, priority: EvacuationPriority) -> Self {
        self.evacuation_priority = Some(priority);
        self
    }

    pub fn with_density(mut self, density: u32) -> Self {
        self.population_density = Some(density);
        self
    }

    pub fn with_shelter(mut self, shelter_type: &str, capacity: u32) -> Self {
        self.shelter_type = Some(shelter_type.trim().to_owned());
        self.shelter_capacity = Some(capacity);
        self
    }

    /// Title-cased name for display.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// Canonical matching form of a place name: trimmed, lowercased, inner
/// whitespace collapsed to single spaces.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
