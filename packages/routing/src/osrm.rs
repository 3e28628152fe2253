//! Requests to and responses from the OSRM routing service.
//!
//! The engine never performs the HTTP call itself; callers fetch the URL
//! built here and hand the response body back for parsing.

use saferoute_geography_models::LatLng;
use saferoute_routing_models::{OsrmResponse, OsrmRoute, RoutingError};

/// Driving profile endpoint of the public OSRM demo server.
pub const OSRM_ROUTE_URL: &str = "https://router.project-osrm.org/route/v1/driving";

/// Number of alternatives requested when no waypoints are given.
const MAX_ALTERNATIVES: u32 = 3;

/// Builds the OSRM `route` request for a trip from `start` to `end` through
/// `waypoints`.
///
/// Alternatives are only requested for direct trips; OSRM does not return
/// alternatives for multi-stop routes.
#[must_use]
pub fn route_request_url(start: LatLng, waypoints: &[LatLng], end: LatLng) -> String {
    let coordinates = std::iter::once(start)
        .chain(waypoints.iter().copied())
        .chain(std::iter::once(end))
        .map(|point| format!("{},{}", point.lng, point.lat))
        .collect::<Vec<_>>()
        .join(";");

    let alternatives = if waypoints.is_empty() {
        MAX_ALTERNATIVES.to_string()
    } else {
        "false".to_string()
    };

    format!(
        "{OSRM_ROUTE_URL}/{coordinates}?overview=full&geometries=geojson&alternatives={alternatives}&steps=true"
    )
}

/// Parses an OSRM `route` response body into its candidate routes.
///
/// # Errors
///
/// * [`RoutingError::Json`] if the body is not a valid response
/// * [`RoutingError::NoRoute`] if the service found no route
pub fn parse_response(body: &str) -> Result<Vec<OsrmRoute>, RoutingError> {
    let response: OsrmResponse = serde_json::from_str(body)?;
    let routes = response.into_routes()?;
    log::debug!("Parsed {} routes from OSRM response", routes.len());
    Ok(routes)
}
