#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter and statistics types for accident analytics.
//!
//! [`FilterCriteria`] selects a subset of accident records by attribute;
//! [`AccidentStatistics`] summarizes a hotspot set for display.

use saferoute_accident_models::{AccidentRecord, AccidentSeverity};
use serde::{Deserialize, Serialize};

/// Attribute filters applied to accident records before aggregation.
///
/// Each category holds the allowed values for that attribute. An empty
/// category places no constraint. Categories are combined with AND, values
/// within a category with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Allowed severities.
    #[serde(default)]
    pub severity: Vec<AccidentSeverity>,
    /// Allowed weather categories.
    #[serde(default)]
    pub weather: Vec<String>,
    /// Allowed road types.
    #[serde(default)]
    pub road_type: Vec<String>,
}

impl FilterCriteria {
    /// Whether no category is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.severity.is_empty() && self.weather.is_empty() && self.road_type.is_empty()
    }

    /// Whether `record` passes every constrained category.
    #[must_use]
    pub fn matches(&self, record: &AccidentRecord) -> bool {
        allows(&self.severity, &record.severity)
            && allows(&self.weather, &record.weather)
            && allows(&self.road_type, &record.road_type)
    }
}

fn allows<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// One entry of the top-cities ranking.
///
/// Cities are ranked per hotspot, so a city with several road-type clusters
/// can appear more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityTotals {
    /// Key of the hotspot this entry was taken from.
    pub key: String,
    /// City name.
    pub city: String,
    /// State name.
    pub state: String,
    /// Accidents in the hotspot.
    pub total_accidents: u32,
    /// Fatal accidents in the hotspot.
    pub fatal_accidents: u32,
    /// Serious accidents in the hotspot.
    pub serious_accidents: u32,
    /// Hotspot intensity.
    pub intensity: f64,
}

/// Accident totals for one state, summed over its hotspots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTotals {
    /// State name.
    pub state: String,
    /// Accidents across the state's hotspots.
    pub total: u32,
    /// Fatal accidents across the state's hotspots.
    pub fatal: u32,
}

/// Summary statistics over a hotspot set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentStatistics {
    /// Accidents across all hotspots.
    pub total_accidents: u32,
    /// Fatal accidents across all hotspots.
    pub total_fatal: u32,
    /// Serious accidents across all hotspots.
    pub total_serious: u32,
    /// `total_accidents - total_fatal - total_serious`.
    pub total_minor: u32,
    /// Up to ten hotspots with a known city, largest first.
    pub top_cities: Vec<CityTotals>,
    /// Up to ten states, largest first.
    pub top_states: Vec<StateTotals>,
    /// Number of hotspots.
    pub location_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(severity: AccidentSeverity, weather: &str, road_type: &str) -> AccidentRecord {
        AccidentRecord {
            state: "Maharashtra".to_owned(),
            city: "Pune".to_owned(),
            year: 2020,
            month: "May".to_owned(),
            day_of_week: "Friday".to_owned(),
            time_of_day: "09:15".to_owned(),
            severity,
            vehicles_involved: 1,
            vehicle_type: "Truck".to_owned(),
            casualties: 0,
            fatalities: 0,
            weather: weather.to_owned(),
            road_type: road_type.to_owned(),
            road_condition: "Wet".to_owned(),
            lighting: "Dusk".to_owned(),
            traffic_control: "None".to_owned(),
            speed_limit: 80,
            driver_age: 45,
            driver_gender: "Female".to_owned(),
            license_status: "Valid".to_owned(),
            alcohol_involved: false,
            location_detail: String::new(),
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&record(AccidentSeverity::Minor, "Fog", "Highway")));
    }

    #[test]
    fn values_within_category_are_ored() {
        let criteria = FilterCriteria {
            severity: vec![AccidentSeverity::Fatal, AccidentSeverity::Serious],
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record(AccidentSeverity::Fatal, "Clear", "Highway")));
        assert!(criteria.matches(&record(AccidentSeverity::Serious, "Clear", "Highway")));
        assert!(!criteria.matches(&record(AccidentSeverity::Minor, "Clear", "Highway")));
    }

    #[test]
    fn categories_are_anded() {
        let criteria = FilterCriteria {
            severity: vec![AccidentSeverity::Fatal],
            weather: vec!["Rainy".to_owned()],
            road_type: Vec::new(),
        };
        assert!(criteria.matches(&record(AccidentSeverity::Fatal, "Rainy", "City Road")));
        assert!(!criteria.matches(&record(AccidentSeverity::Fatal, "Clear", "City Road")));
        assert!(!criteria.matches(&record(AccidentSeverity::Minor, "Rainy", "City Road")));
    }

    #[test]
    fn deserializes_with_missing_categories() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"roadType":["Highway"]}"#).unwrap();
        assert!(criteria.severity.is_empty());
        assert_eq!(criteria.road_type, vec!["Highway".to_owned()]);
    }
}
