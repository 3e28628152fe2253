#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Historical road accident record types.
//!
//! An [`AccidentRecord`] is one row of the accident dataset. Records are
//! created once by CSV ingestion and are read-only afterwards; every other
//! part of the engine (hotspot aggregation, filtering, statistics) consumes
//! them by reference.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder used by the dataset for a missing city or state.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Severity of a recorded accident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AccidentSeverity {
    /// No serious injuries.
    Minor,
    /// Serious injuries, no deaths.
    Serious,
    /// At least one death.
    Fatal,
}

impl AccidentSeverity {
    /// Weight of this severity in the hotspot intensity formula.
    ///
    /// The weights are normalized by [`AccidentSeverity::MAX_WEIGHT`], so a
    /// cluster made only of fatal accidents has a severity weight of 1.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Minor => 1.0,
            Self::Serious => 2.5,
            Self::Fatal => 4.0,
        }
    }

    /// The largest value returned by [`AccidentSeverity::weight`].
    pub const MAX_WEIGHT: f64 = 4.0;

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minor, Self::Serious, Self::Fatal]
    }
}

/// One historical accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentRecord {
    /// State name (e.g. "Maharashtra"), or [`UNKNOWN_LOCATION`].
    pub state: String,
    /// City name (e.g. "Pune"), or [`UNKNOWN_LOCATION`].
    pub city: String,
    /// Year of the accident, `0` when unparseable.
    pub year: u32,
    /// Month name.
    pub month: String,
    /// Day of the week.
    pub day_of_week: String,
    /// Time of day as written in the source.
    pub time_of_day: String,
    /// Accident severity.
    pub severity: AccidentSeverity,
    /// Number of vehicles involved.
    pub vehicles_involved: u32,
    /// Vehicle type category.
    pub vehicle_type: String,
    /// Number of casualties.
    pub casualties: u32,
    /// Number of fatalities.
    pub fatalities: u32,
    /// Weather category (e.g. "Clear", "Rainy", "Foggy").
    pub weather: String,
    /// Road type category (e.g. "Highway", "City Road").
    pub road_type: String,
    /// Road surface condition.
    pub road_condition: String,
    /// Lighting conditions.
    pub lighting: String,
    /// Traffic control present at the location.
    pub traffic_control: String,
    /// Posted speed limit in km/h.
    pub speed_limit: u32,
    /// Driver age in years.
    pub driver_age: u32,
    /// Driver gender.
    pub driver_gender: String,
    /// Driver license status.
    pub license_status: String,
    /// Whether alcohol was involved.
    pub alcohol_involved: bool,
    /// Free-text location detail.
    pub location_detail: String,
}

impl AccidentRecord {
    /// Whether the record names a real city.
    #[must_use]
    pub fn has_known_city(&self) -> bool {
        is_known_location(&self.city)
    }
}

/// Whether a city or state value names a real place, i.e. is neither empty
/// nor the dataset's [`UNKNOWN_LOCATION`] placeholder.
#[must_use]
pub fn is_known_location(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != UNKNOWN_LOCATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("Fatal".parse::<AccidentSeverity>(), Ok(AccidentSeverity::Fatal));
        assert_eq!("serious".parse::<AccidentSeverity>(), Ok(AccidentSeverity::Serious));
        assert_eq!("MINOR".parse::<AccidentSeverity>(), Ok(AccidentSeverity::Minor));
        assert!("Moderate".parse::<AccidentSeverity>().is_err());
    }

    #[test]
    fn severity_displays_dataset_spelling() {
        for severity in AccidentSeverity::all() {
            let text = severity.to_string();
            assert_eq!(text.parse::<AccidentSeverity>(), Ok(*severity));
        }
        assert_eq!(AccidentSeverity::Serious.as_ref(), "Serious");
    }

    #[test]
    fn weights_never_exceed_max() {
        for severity in AccidentSeverity::all() {
            assert!(severity.weight() <= AccidentSeverity::MAX_WEIGHT);
            assert!(severity.weight() > 0.0);
        }
    }

    #[test]
    fn unknown_locations() {
        assert!(!is_known_location("Unknown"));
        assert!(!is_known_location("  "));
        assert!(is_known_location("Pune"));
    }
}
