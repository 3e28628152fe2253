#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Routing types.
//!
//! Two families of types live here: the response shapes of the external
//! OSRM routing service (deserialized as-is, never fetched by this
//! workspace), and the derived per-route risk and navigation results.

pub mod osrm;

use saferoute_geography_models::LatLng;
use saferoute_hotspot_models::Hotspot;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub use osrm::{OsrmGeometry, OsrmLeg, OsrmManeuver, OsrmResponse, OsrmRoute, OsrmStep};

/// Errors produced while handling routing collaborator responses.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The routing service returned no usable route.
    #[error("No routes found between these coordinates (code: {code})")]
    NoRoute {
        /// Status code reported by the service.
        code: String,
    },
    /// The response body was not valid JSON for the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Risk assessment for one candidate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRiskInfo {
    /// Heuristic risk score. `10` when no hotspot is nearby, otherwise in
    /// `15..=95`.
    pub risk_score: u32,
    /// Hotspots within the scoring radius of the route, each at most once.
    pub nearby_hotspots: Vec<Hotspot>,
    /// Human-readable explanation of the score.
    pub risk_factors: Vec<String>,
    /// Actionable warnings along the route, largest first.
    pub danger_zones: Vec<DangerZone>,
}

/// A hotspot promoted to an actionable route warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerZone {
    /// Latitude of the underlying hotspot.
    pub lat: f64,
    /// Longitude of the underlying hotspot.
    pub lng: f64,
    /// City of the underlying hotspot.
    pub city: String,
    /// Accidents in the underlying hotspot.
    pub total_accidents: u32,
    /// Fatal accidents in the underlying hotspot.
    pub fatal_accidents: u32,
    /// Serious accidents in the underlying hotspot.
    pub serious_accidents: u32,
    /// Suggested speed through the zone in km/h.
    pub recommended_speed: u32,
    /// Warning shown to the driver.
    pub caution_message: String,
}

impl DangerZone {
    /// The zone's coordinate.
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Summary of the danger zone a navigation step was attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerZoneInfo {
    /// City of the zone.
    pub city: String,
    /// Accidents in the zone.
    pub total_accidents: u32,
    /// Fatal accidents in the zone.
    pub fatal_accidents: u32,
    /// Distance from the step to the zone in km, rounded to one decimal.
    pub distance: f64,
}

/// One turn-by-turn instruction, optionally annotated with safety info.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationStep {
    /// Instruction text, e.g. `Turn left onto MG Road`.
    pub instruction: String,
    /// Formatted step distance.
    pub distance: String,
    /// Formatted step duration.
    pub duration: String,
    /// Maneuver icon.
    pub maneuver: String,
    /// Suggested speed in km/h. Set on every enriched step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_limit: Option<u32>,
    /// Whether the step lies within range of a danger zone.
    #[serde(default)]
    pub is_near_danger_zone: bool,
    /// The zone the step was attributed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger_zone_info: Option<DangerZoneInfo>,
    /// The zone's caution message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution_warning: Option<String>,
}

/// Coarse risk band of a route, for display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    /// Score of 30 or less.
    Low,
    /// Score of 60 or less.
    Medium,
    /// Score above 60.
    High,
}

impl RiskLevel {
    /// Bands a risk score.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score <= 30 {
            Self::Low
        } else if score <= 60 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Display summary of one candidate route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// 1-based route number.
    pub id: usize,
    /// Formatted total distance.
    pub distance: String,
    /// Formatted travel time.
    pub eta: String,
    /// Route risk score.
    pub risk_score: u32,
    /// Risk band of `risk_score`.
    pub risk_level: RiskLevel,
}

/// Latitude-first route geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePolyline {
    /// Ordered route points.
    pub coordinates: Vec<LatLng>,
    /// Whether this is the selected safest route.
    pub is_safest: bool,
}

/// Full result of planning a set of candidate routes.
///
/// All vectors are indexed by route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    /// Display summaries.
    pub routes: Vec<RouteSummary>,
    /// Route geometries.
    pub polylines: Vec<RoutePolyline>,
    /// Enriched turn-by-turn steps.
    pub navigation_steps: Vec<Vec<NavigationStep>>,
    /// Risk assessments.
    pub route_risk_info: Vec<RouteRiskInfo>,
    /// Index of the route with the lowest risk score.
    pub safest_index: usize,
    /// Index of the route with the shortest duration.
    pub fastest_index: usize,
    /// Total distance per route in metres.
    pub raw_distance_meters: Vec<f64>,
    /// Total duration per route in seconds.
    pub raw_duration_seconds: Vec<f64>,
}
