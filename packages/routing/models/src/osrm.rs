//! OSRM `route` service response shapes.
//!
//! Only the fields the planner reads are modeled; everything else in the
//! response is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::RoutingError;

/// Status code OSRM reports for a successful request.
pub const OSRM_OK: &str = "Ok";

/// Top-level response of the OSRM `route` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmResponse {
    /// Status code, `Ok` on success.
    pub code: String,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl OsrmResponse {
    /// Returns the candidate routes.
    ///
    /// # Errors
    ///
    /// * [`RoutingError::NoRoute`] if the status code is not `Ok` or the
    ///   response carries no route
    pub fn into_routes(self) -> Result<Vec<OsrmRoute>, RoutingError> {
        if self.code != OSRM_OK || self.routes.is_empty() {
            return Err(RoutingError::NoRoute { code: self.code });
        }
        Ok(self.routes)
    }
}

/// One candidate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmRoute {
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
    /// One leg per pair of consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
    /// Full route geometry.
    pub geometry: OsrmGeometry,
}

/// `GeoJSON` `LineString` geometry, `[lng, lat]` ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmGeometry {
    /// Route points.
    pub coordinates: Vec<[f64; 2]>,
}

/// The part of a route between two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmLeg {
    /// Turn-by-turn steps.
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
    /// Leg distance in metres.
    #[serde(default)]
    pub distance: f64,
    /// Leg duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// One turn-by-turn step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmStep {
    /// Step distance in metres.
    pub distance: f64,
    /// Step duration in seconds.
    pub duration: f64,
    /// Name of the road the step travels on. Empty when unnamed.
    #[serde(default)]
    pub name: String,
    /// The maneuver starting this step.
    pub maneuver: OsrmManeuver,
}

/// A maneuver at the start of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmManeuver {
    /// Maneuver type such as `turn`, `depart` or `end of road`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Direction modifier such as `left` or `slight right`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Maneuver location, `[lng, lat]` ordered.
    pub location: [f64; 2],
}
