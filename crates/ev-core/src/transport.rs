//! Recommended means of travel for an evacuation leg.

/// How an evacuee should travel, chosen from trip length and urgency.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvacuationMode {
    WalkFast,
    BicycleOrAuto,
    EmergencyVehicle,
    Walk,
    Bicycle,
    CarOrTaxi,
    BusOrTrain,
}

impl EvacuationMode {
    /// Pick a mode for a `distance_km` trip.  `immediate` is set when the
    /// origin area's priority is `Immediate`.
    pub fn recommend(distance_km: f64, immediate: bool) -> Self {
        if immediate {
            return if distance_km < 2.0 {
                EvacuationMode::WalkFast
            } else if distance_km < 8.0 {
                EvacuationMode::BicycleOrAuto
            } else {
                EvacuationMode::EmergencyVehicle
            };
        }
        if distance_km < 1.0 {
            EvacuationMode::Walk
        } else if distance_km < 5.0 {
            EvacuationMode::Bicycle
        } else if distance_km < 12.0 {
            EvacuationMode::CarOrTaxi
        } else {
            EvacuationMode::BusOrTrain
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            EvacuationMode::WalkFast         => "walk fast",
            EvacuationMode::BicycleOrAuto    => "bicycle/auto",
            EvacuationMode::EmergencyVehicle => "emergency vehicle",
            EvacuationMode::Walk             => "walk",
            EvacuationMode::Bicycle          => "bicycle",
            EvacuationMode::CarOrTaxi        => "car/taxi",
            EvacuationMode::BusOrTrain       => "bus/train",
        }
    }
}

impl std::fmt::Display for EvacuationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
