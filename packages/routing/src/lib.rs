#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route risk scoring and navigation.
//!
//! Candidate routes come from an external routing service (OSRM). Each
//! route's polyline is matched against the hotspot set to produce a risk
//! score with human-readable factors; risky hotspots become danger zones;
//! and the route's turn-by-turn steps are annotated with speed suggestions
//! and proximity warnings.
//!
//! All functions here are pure. Independent routes can be scored in
//! parallel by the caller.

pub mod danger;
pub mod format;
pub mod osrm;
pub mod plan;
pub mod risk;

pub use danger::{build_danger_zones, default_speed, enrich_steps, enrich_steps_within};
pub use osrm::{parse_response, route_request_url};
pub use plan::plan_routes;
pub use risk::{
    basic_risk_info, basic_risk_score, find_nearby_hotspots, score_route, select_fastest,
    select_safest,
};
pub use saferoute_routing_models::{RoutingError, RoutingResult};
