#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Accident hotspot types.
//!
//! A [`Hotspot`] is a cluster of historical accidents sharing a location
//! key. Hotspots are a pure projection of the record set: they are rebuilt
//! from scratch whenever the records or the active filters change, and are
//! never updated incrementally.

use std::collections::BTreeMap;

use saferoute_accident_models::AccidentRecord;
use saferoute_geography_models::LatLng;
use serde::{Deserialize, Serialize};

/// Where a hotspot came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotOrigin {
    /// Aggregated from the historical accident dataset.
    #[default]
    Dataset,
    /// A single user-submitted accident report.
    UserReport,
}

/// A geographic cluster of accidents.
///
/// `total_accidents == fatal_accidents + serious_accidents + minor_accidents`
/// always holds. For dataset hotspots `records.len() == total_accidents`;
/// report pseudo-hotspots carry no backing records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Identity of the hotspot: the location key for dataset clusters,
    /// `report:<id>` for user reports.
    pub key: String,
    /// Where this hotspot came from.
    #[serde(default)]
    pub origin: HotspotOrigin,
    /// Display latitude (jittered).
    pub lat: f64,
    /// Display longitude (jittered).
    pub lng: f64,
    /// Heat-map intensity in `[0, 1]`.
    pub intensity: f64,
    /// City name.
    pub city: String,
    /// State name.
    pub state: String,
    /// Number of accidents in the cluster.
    pub total_accidents: u32,
    /// Number of fatal accidents.
    pub fatal_accidents: u32,
    /// Number of serious accidents.
    pub serious_accidents: u32,
    /// Number of minor accidents.
    pub minor_accidents: u32,
    /// Accident count per weather category.
    pub weather_breakdown: BTreeMap<String, u32>,
    /// Accident count per road type.
    pub road_type_breakdown: BTreeMap<String, u32>,
    /// The accidents backing this cluster.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<AccidentRecord>,
}

impl Hotspot {
    /// The hotspot's display coordinate.
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Whether the severity counts add up to the total.
    #[must_use]
    pub const fn counts_consistent(&self) -> bool {
        self.fatal_accidents + self.serious_accidents + self.minor_accidents
            == self.total_accidents
    }
}
