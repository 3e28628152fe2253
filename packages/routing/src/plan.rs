//! Route planning: scoring, selection and navigation for a set of
//! candidate routes.

use saferoute_config::EngineConfig;
use saferoute_geography_models::LatLng;
use saferoute_hotspot_models::Hotspot;
use saferoute_routing_models::{
    NavigationStep, OsrmRoute, RiskLevel, RouteRiskInfo, RoutePolyline, RouteSummary,
    RoutingResult,
};

use crate::danger::enrich_steps_within;
use crate::format::{format_distance, format_duration, format_instruction, maneuver_icon};
use crate::risk::{basic_risk_info, score_route, select_fastest, select_safest};

/// Plans a set of candidate routes against the hotspot set.
///
/// Every route is scored, the safest and fastest are selected, and each
/// route's turn-by-turn steps are enriched with danger-zone warnings. An
/// empty hotspot set means no accident data is loaded, in which case routes
/// are scored by the basic fallback heuristic instead.
#[must_use]
pub fn plan_routes(routes: &[OsrmRoute], hotspots: &[Hotspot], config: &EngineConfig) -> RoutingResult {
    let mut polylines: Vec<RoutePolyline> = routes
        .iter()
        .map(|route| RoutePolyline {
            coordinates: route
                .geometry
                .coordinates
                .iter()
                .copied()
                .map(LatLng::from_lng_lat)
                .collect(),
            is_safest: false,
        })
        .collect();

    if hotspots.is_empty() {
        log::info!("No accident data loaded, using route characteristics for risk");
    }

    let route_risk_info: Vec<RouteRiskInfo> = routes
        .iter()
        .zip(&polylines)
        .enumerate()
        .map(|(index, (route, polyline))| {
            if hotspots.is_empty() {
                basic_risk_info(route.distance, route.duration, index)
            } else {
                score_route(&polyline.coordinates, hotspots, config.scoring_radius_km)
            }
        })
        .collect();

    let scores: Vec<u32> = route_risk_info.iter().map(|info| info.risk_score).collect();
    let raw_distance_meters: Vec<f64> = routes.iter().map(|route| route.distance).collect();
    let raw_duration_seconds: Vec<f64> = routes.iter().map(|route| route.duration).collect();

    let safest_index = select_safest(&scores).unwrap_or(0);
    let fastest_index = select_fastest(&raw_duration_seconds).unwrap_or(0);

    if let Some(polyline) = polylines.get_mut(safest_index) {
        polyline.is_safest = true;
    }

    let summaries: Vec<RouteSummary> = routes
        .iter()
        .zip(&scores)
        .enumerate()
        .map(|(index, (route, &risk_score))| RouteSummary {
            id: index + 1,
            distance: format_distance(route.distance),
            eta: format_duration(route.duration),
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        })
        .collect();

    let navigation_steps: Vec<Vec<NavigationStep>> = routes
        .iter()
        .zip(&route_risk_info)
        .map(|(route, risk)| {
            let (steps, locations) = extract_steps(route);
            enrich_steps_within(steps, &risk.danger_zones, &locations, config.step_radius_km)
        })
        .collect();

    log::info!(
        "Planned {} routes: safest #{} (score {}), fastest #{}",
        routes.len(),
        safest_index + 1,
        scores.get(safest_index).copied().unwrap_or_default(),
        fastest_index + 1,
    );

    RoutingResult {
        routes: summaries,
        polylines,
        navigation_steps,
        route_risk_info,
        safest_index,
        fastest_index,
        raw_distance_meters,
        raw_duration_seconds,
    }
}

/// Extracts displayable steps and their locations. Zero-length steps are
/// dropped except for the final arrival.
fn extract_steps(route: &OsrmRoute) -> (Vec<NavigationStep>, Vec<LatLng>) {
    route
        .legs
        .iter()
        .flat_map(|leg| &leg.steps)
        .filter(|step| step.distance > 0.0 || step.maneuver.kind == "arrive")
        .map(|step| {
            let navigation = NavigationStep {
                instruction: format_instruction(step),
                distance: format_distance(step.distance),
                duration: format_duration(step.duration),
                maneuver: maneuver_icon(&step.maneuver.kind, step.maneuver.modifier.as_deref())
                    .to_owned(),
                ..NavigationStep::default()
            };
            (navigation, LatLng::from_lng_lat(step.maneuver.location))
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use saferoute_accident_models::{AccidentRecord, AccidentSeverity};
    use saferoute_hotspot::{HotspotAggregator, Jitter};
    use saferoute_routing_models::{OsrmGeometry, OsrmLeg, OsrmManeuver, OsrmStep};

    use crate::osrm::parse_response;

    use super::*;

    fn record(severity: AccidentSeverity) -> AccidentRecord {
        AccidentRecord {
            state: "Maharashtra".to_owned(),
            city: "Pune".to_owned(),
            year: 2022,
            month: "January".to_owned(),
            day_of_week: "Tuesday".to_owned(),
            time_of_day: "07:45".to_owned(),
            severity,
            vehicles_involved: 3,
            vehicle_type: "Bus".to_owned(),
            casualties: 4,
            fatalities: u32::from(severity == AccidentSeverity::Fatal),
            weather: "Foggy".to_owned(),
            road_type: "Highway".to_owned(),
            road_condition: "Dry".to_owned(),
            lighting: "Dawn".to_owned(),
            traffic_control: "None".to_owned(),
            speed_limit: 100,
            driver_age: 51,
            driver_gender: "Male".to_owned(),
            license_status: "Valid".to_owned(),
            alcohol_involved: false,
            location_detail: "Expressway toll plaza".to_owned(),
        }
    }

    fn pune_hotspots() -> Vec<Hotspot> {
        let mut records: Vec<AccidentRecord> =
            (0..3).map(|_| record(AccidentSeverity::Fatal)).collect();
        records.extend((0..7).map(|_| record(AccidentSeverity::Minor)));
        HotspotAggregator::new(2)
            .with_jitter(Jitter::None)
            .aggregate(&records)
    }

    fn step(kind: &str, modifier: Option<&str>, name: &str, distance: f64, location: LatLng) -> OsrmStep {
        OsrmStep {
            distance,
            duration: distance / 15.0,
            name: name.to_owned(),
            maneuver: OsrmManeuver {
                kind: kind.to_owned(),
                modifier: modifier.map(ToOwned::to_owned),
                location: location.to_lng_lat(),
            },
        }
    }

    fn route(points: &[LatLng], distance: f64, duration: f64) -> OsrmRoute {
        let first = points[0];
        let last = points[points.len() - 1];
        OsrmRoute {
            distance,
            duration,
            legs: vec![OsrmLeg {
                steps: vec![
                    step("depart", None, "NH48", distance / 2.0, first),
                    step("turn", Some("left"), "", 0.0, first),
                    step("continue", Some("straight"), "Expressway", distance / 2.0, points[1]),
                    step("arrive", None, "", 0.0, last),
                ],
                distance,
                duration,
            }],
            geometry: OsrmGeometry {
                coordinates: points.iter().map(|p| p.to_lng_lat()).collect(),
            },
        }
    }

    /// Passes through Pune.
    fn pune_route() -> OsrmRoute {
        route(
            &[
                LatLng::new(18.40, 73.85),
                LatLng::new(18.5204, 73.8567),
                LatLng::new(18.65, 73.86),
            ],
            30_000.0,
            2_400.0,
        )
    }

    /// Bypasses Pune well to the east.
    fn bypass_route() -> OsrmRoute {
        route(
            &[
                LatLng::new(18.40, 74.30),
                LatLng::new(18.52, 74.35),
                LatLng::new(18.65, 74.30),
            ],
            42_000.0,
            2_700.0,
        )
    }

    #[test]
    fn pune_scenario() {
        let hotspots = pune_hotspots();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].total_accidents, 10);
        assert_eq!(hotspots[0].fatal_accidents, 3);
        assert!(hotspots[0].intensity > 0.5);

        let result = plan_routes(&[pune_route()], &hotspots, &EngineConfig::default());
        let risk = &result.route_risk_info[0];
        assert!(risk.risk_score >= 45);
        assert!(
            risk.risk_factors
                .contains(&"3 fatal accident(s) in nearby areas".to_owned())
        );
        assert_eq!(risk.nearby_hotspots.len(), 1);
        assert_eq!(risk.danger_zones.len(), 1);
        assert_eq!(risk.danger_zones[0].recommended_speed, 30);
    }

    #[test]
    fn safest_and_fastest_selection() {
        let hotspots = pune_hotspots();
        let result = plan_routes(
            &[pune_route(), bypass_route()],
            &hotspots,
            &EngineConfig::default(),
        );

        assert_eq!(result.route_risk_info[1].risk_score, 10);
        assert_eq!(result.safest_index, 1);
        assert_eq!(result.fastest_index, 0);
        assert!(!result.polylines[0].is_safest);
        assert!(result.polylines[1].is_safest);

        assert_eq!(result.routes[0].id, 1);
        assert_eq!(result.routes[0].distance, "30.0 km");
        assert_eq!(result.routes[0].eta, "40 min");
        assert_eq!(result.routes[1].risk_level, RiskLevel::Low);
        assert_eq!(result.raw_distance_meters, vec![30_000.0, 42_000.0]);
        assert_eq!(result.raw_duration_seconds, vec![2_400.0, 2_700.0]);
    }

    #[test]
    fn polylines_are_lat_lng() {
        let result = plan_routes(&[pune_route()], &[], &EngineConfig::default());
        let first = result.polylines[0].coordinates[0];
        assert!((first.lat - 18.40).abs() < f64::EPSILON);
        assert!((first.lng - 73.85).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_length_steps_dropped_except_arrival() {
        let result = plan_routes(&[bypass_route()], &[], &EngineConfig::default());
        let instructions: Vec<&str> = result.navigation_steps[0]
            .iter()
            .map(|s| s.instruction.as_str())
            .collect();
        assert_eq!(
            instructions,
            vec![
                "Start on NH48",
                "Continue on Expressway",
                "Arrive at your destination",
            ]
        );
        let steps = &result.navigation_steps[0];
        assert_eq!(steps[0].maneuver, "🚗");
        assert_eq!(steps[1].maneuver, "⬆️");
        assert_eq!(steps[2].maneuver, "🏁");
    }

    #[test]
    fn steps_near_hotspot_are_annotated() {
        let hotspots = pune_hotspots();
        let result = plan_routes(&[pune_route()], &hotspots, &EngineConfig::default());
        let steps = &result.navigation_steps[0];

        // Departure is ~13 km south of Pune.
        assert!(!steps[0].is_near_danger_zone);
        assert_eq!(steps[0].speed_limit, Some(50));

        // The expressway step starts in Pune.
        assert!(steps[1].is_near_danger_zone);
        assert_eq!(steps[1].speed_limit, Some(30));
        assert_eq!(steps[1].danger_zone_info.as_ref().map(|i| i.city.as_str()), Some("Pune"));

        // Arrival is ~14 km north.
        assert!(!steps[2].is_near_danger_zone);
    }

    #[test]
    fn fallback_scoring_without_data() {
        let result = plan_routes(
            &[pune_route(), bypass_route()],
            &[],
            &EngineConfig::default(),
        );
        // 12.5 m/s: 50 + 0 + 0
        assert_eq!(result.route_risk_info[0].risk_score, 50);
        // 15.6 m/s: 50 - 15 + 12
        assert_eq!(result.route_risk_info[1].risk_score, 47);
        assert_eq!(result.safest_index, 1);
        assert_eq!(
            result.route_risk_info[0].risk_factors,
            vec!["Risk calculated based on route characteristics".to_owned()]
        );
    }

    #[test]
    fn no_routes() {
        let result = plan_routes(&[], &pune_hotspots(), &EngineConfig::default());
        assert!(result.routes.is_empty());
        assert_eq!(result.safest_index, 0);
    }

    #[test]
    fn plans_parsed_response() {
        let body = serde_json::json!({
            "code": "Ok",
            "routes": [serde_json::to_value(pune_route()).unwrap()],
        })
        .to_string();

        let routes = parse_response(&body).unwrap();
        let result = plan_routes(&routes, &pune_hotspots(), &EngineConfig::default());
        assert_eq!(result.routes.len(), 1);
        assert!(result.route_risk_info[0].risk_score >= 45);
    }
}
