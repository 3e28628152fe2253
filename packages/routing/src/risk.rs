//! Proximity-based route risk scoring.

use std::collections::HashSet;

use saferoute_geography::distance_between;
use saferoute_geography_models::LatLng;
use saferoute_hotspot_models::Hotspot;
use saferoute_routing_models::RouteRiskInfo;

use crate::danger::build_danger_zones;

/// Radius within which a hotspot counts as near a route.
pub const DEFAULT_SCORING_RADIUS_KM: f64 = 5.0;

/// Score of a route with no hotspot nearby.
pub const NO_HOTSPOT_SCORE: u32 = 10;

/// Lowest score of a route with at least one hotspot nearby.
pub const MIN_HOTSPOT_SCORE: u32 = 15;

/// Highest score any route can get.
pub const MAX_SCORE: u32 = 95;

const BASE_SCORE: u32 = 20;
const FATAL_PENALTY: u32 = 25;
const MANY_SERIOUS_PENALTY: u32 = 15;
const SOME_SERIOUS_PENALTY: u32 = 8;
const PER_HOTSPOT_PENALTY: u32 = 3;
const MAX_HOTSPOT_PENALTY: u32 = 35;

/// Returns the hotspots within `radius_km` of any route point, in input
/// order. A hotspot is matched at most once; hotspots sharing a key are
/// treated as the same hotspot.
#[must_use]
pub fn find_nearby_hotspots<'a>(
    route: &[LatLng],
    hotspots: &'a [Hotspot],
    radius_km: f64,
) -> Vec<&'a Hotspot> {
    let mut seen: HashSet<&str> = HashSet::new();

    hotspots
        .iter()
        .filter(|hotspot| {
            let position = hotspot.position();
            route
                .iter()
                .any(|&point| distance_between(point, position) <= radius_km)
        })
        .filter(|hotspot| seen.insert(hotspot.key.as_str()))
        .collect()
}

/// Scores a route against the hotspot set.
///
/// With no hotspot nearby the score is [`NO_HOTSPOT_SCORE`]. Otherwise it
/// starts from a base, adds penalties for fatal accidents, serious accidents
/// and the number of nearby hotspots, and is clamped to
/// `MIN_HOTSPOT_SCORE..=MAX_SCORE`.
#[must_use]
pub fn score_route(route: &[LatLng], hotspots: &[Hotspot], radius_km: f64) -> RouteRiskInfo {
    let nearby: Vec<Hotspot> = find_nearby_hotspots(route, hotspots, radius_km)
        .into_iter()
        .cloned()
        .collect();

    if nearby.is_empty() {
        return RouteRiskInfo {
            risk_score: NO_HOTSPOT_SCORE,
            nearby_hotspots: Vec::new(),
            risk_factors: vec!["No known accident hotspots nearby".to_owned()],
            danger_zones: Vec::new(),
        };
    }

    let fatal: u32 = nearby.iter().map(|h| h.fatal_accidents).sum();
    let serious: u32 = nearby.iter().map(|h| h.serious_accidents).sum();
    let count = nearby.len();

    let serious_penalty = if serious > 5 {
        MANY_SERIOUS_PENALTY
    } else if serious > 0 {
        SOME_SERIOUS_PENALTY
    } else {
        0
    };
    let hotspot_penalty = u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(PER_HOTSPOT_PENALTY)
        .min(MAX_HOTSPOT_PENALTY);
    let risk_score = (BASE_SCORE
        + if fatal > 0 { FATAL_PENALTY } else { 0 }
        + serious_penalty
        + hotspot_penalty)
        .clamp(MIN_HOTSPOT_SCORE, MAX_SCORE);

    let mut risk_factors = Vec::new();
    if fatal > 0 {
        risk_factors.push(format!("{fatal} fatal accident(s) in nearby areas"));
    }
    if serious > 0 {
        risk_factors.push(format!("{serious} serious accident(s) reported"));
    }
    if count > 5 {
        risk_factors.push(format!("{count} accident-prone zones on route"));
    } else {
        risk_factors.push(format!("{count} known hotspot(s) nearby"));
    }

    log::trace!(
        "Route with {} points: {count} nearby hotspots, {fatal} fatal, {serious} serious, score {risk_score}",
        route.len()
    );

    RouteRiskInfo {
        risk_score,
        danger_zones: build_danger_zones(&nearby),
        nearby_hotspots: nearby,
        risk_factors,
    }
}

/// Fallback score used only when no accident data is loaded at all.
///
/// Faster routes score lower; `index` adds a cosmetic per-route variation
/// so alternatives do not all tie. The result is clamped to
/// `NO_HOTSPOT_SCORE..=MAX_SCORE`.
#[must_use]
pub fn basic_risk_score(distance_meters: f64, duration_seconds: f64, index: usize) -> u32 {
    // A route covered in no time counts as fast unless it also has no length.
    let average_speed = if duration_seconds > 0.0 {
        distance_meters / duration_seconds
    } else if distance_meters > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let speed_factor: i64 = if average_speed > 15.0 {
        -15
    } else if average_speed > 10.0 {
        0
    } else {
        15
    };
    let variation = i64::try_from((index % 30) * 12 % 30).unwrap_or(0);

    let score = (50 + speed_factor + variation).clamp(i64::from(NO_HOTSPOT_SCORE), i64::from(MAX_SCORE));
    u32::try_from(score).unwrap_or(MAX_SCORE)
}

/// Risk info built by [`basic_risk_score`].
#[must_use]
pub fn basic_risk_info(distance_meters: f64, duration_seconds: f64, index: usize) -> RouteRiskInfo {
    RouteRiskInfo {
        risk_score: basic_risk_score(distance_meters, duration_seconds, index),
        nearby_hotspots: Vec::new(),
        risk_factors: vec!["Risk calculated based on route characteristics".to_owned()],
        danger_zones: Vec::new(),
    }
}

/// Index of the route with the strictly lowest score; the first route wins
/// ties. `None` for no routes.
#[must_use]
pub fn select_safest(scores: &[u32]) -> Option<usize> {
    select_min(scores, |a, b| a < b)
}

/// Index of the route with the strictly shortest duration; the first route
/// wins ties. `None` for no routes.
#[must_use]
pub fn select_fastest(durations: &[f64]) -> Option<usize> {
    select_min(durations, |a, b| a < b)
}

fn select_min<T>(values: &[T], less: impl Fn(&T, &T) -> bool) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    Some((1..values.len()).fold(0, |best, index| {
        if less(&values[index], &values[best]) {
            index
        } else {
            best
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use saferoute_hotspot_models::HotspotOrigin;

    use super::*;

    fn hotspot(key: &str, lat: f64, lng: f64, fatal: u32, serious: u32, minor: u32) -> Hotspot {
        Hotspot {
            key: key.to_owned(),
            origin: HotspotOrigin::Dataset,
            lat,
            lng,
            intensity: 0.5,
            city: key.to_owned(),
            state: "Maharashtra".to_owned(),
            total_accidents: fatal + serious + minor,
            fatal_accidents: fatal,
            serious_accidents: serious,
            minor_accidents: minor,
            weather_breakdown: BTreeMap::new(),
            road_type_breakdown: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    fn route() -> Vec<LatLng> {
        vec![
            LatLng::new(18.50, 73.80),
            LatLng::new(18.60, 73.80),
            LatLng::new(18.70, 73.80),
        ]
    }

    #[test]
    fn nearby_matches_any_point_once() {
        let hotspots = vec![
            hotspot("start", 18.50, 73.81, 0, 0, 2),
            hotspot("middle", 18.60, 73.79, 0, 0, 2),
            hotspot("far", 19.50, 73.80, 0, 0, 2),
        ];
        let nearby = find_nearby_hotspots(&route(), &hotspots, 5.0);
        let keys: Vec<&str> = nearby.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["start", "middle"]);
    }

    #[test]
    fn nearby_dedupes_by_key() {
        let hotspots = vec![
            hotspot("same", 18.50, 73.80, 0, 0, 2),
            hotspot("same", 18.60, 73.80, 0, 0, 2),
        ];
        assert_eq!(find_nearby_hotspots(&route(), &hotspots, 5.0).len(), 1);
    }

    #[test]
    fn empty_route_or_hotspots() {
        assert!(find_nearby_hotspots(&[], &[hotspot("a", 18.5, 73.8, 0, 0, 2)], 5.0).is_empty());
        let info = score_route(&route(), &[], 5.0);
        assert_eq!(info.risk_score, NO_HOTSPOT_SCORE);
        assert_eq!(info.risk_factors, vec!["No known accident hotspots nearby".to_owned()]);
        assert!(info.nearby_hotspots.is_empty());
        assert!(info.danger_zones.is_empty());
    }

    #[test]
    fn score_formula() {
        let hotspots = vec![hotspot("a", 18.5, 73.8, 3, 0, 7)];
        let info = score_route(&route(), &hotspots, 5.0);
        // 20 + 25 fatal + 3 for one hotspot
        assert_eq!(info.risk_score, 48);
        assert_eq!(
            info.risk_factors,
            vec![
                "3 fatal accident(s) in nearby areas".to_owned(),
                "1 known hotspot(s) nearby".to_owned(),
            ]
        );
        assert_eq!(info.danger_zones.len(), 1);
    }

    #[test]
    fn serious_tiers() {
        let some = score_route(&route(), &[hotspot("a", 18.5, 73.8, 0, 2, 0)], 5.0);
        assert_eq!(some.risk_score, 20 + 8 + 3);
        assert_eq!(some.risk_factors[0], "2 serious accident(s) reported");

        let many = score_route(&route(), &[hotspot("a", 18.5, 73.8, 0, 6, 0)], 5.0);
        assert_eq!(many.risk_score, 20 + 15 + 3);
    }

    #[test]
    fn many_hotspots_capped() {
        let hotspots: Vec<Hotspot> = (0..20)
            .map(|i| hotspot(&format!("h{i}"), 18.5, 73.8, 1, 6, 0))
            .collect();
        let info = score_route(&route(), &hotspots, 5.0);
        assert_eq!(info.risk_score, MAX_SCORE);
        assert_eq!(info.risk_factors[2], "20 accident-prone zones on route");
    }

    #[test]
    fn score_bounds() {
        for minor in 0..4 {
            for serious in 0..8 {
                let hotspots = vec![hotspot("a", 18.5, 73.8, 0, serious, minor)];
                let score = score_route(&route(), &hotspots, 5.0).risk_score;
                assert!((MIN_HOTSPOT_SCORE..=MAX_SCORE).contains(&score));
            }
        }
    }

    #[test]
    fn basic_score() {
        // 20 m/s: fast route
        assert_eq!(basic_risk_score(20_000.0, 1_000.0, 0), 35);
        // 12 m/s, second route: 50 + 0 + 12
        assert_eq!(basic_risk_score(12_000.0, 1_000.0, 1), 62);
        // 5 m/s, third route: 50 + 15 + 24
        assert_eq!(basic_risk_score(5_000.0, 1_000.0, 2), 89);
        // 5 m/s, fourth route: 50 + 15 + 6
        assert_eq!(basic_risk_score(5_000.0, 1_000.0, 3), 71);
    }

    #[test]
    fn basic_score_zero_duration() {
        assert_eq!(basic_risk_score(5_000.0, 0.0, 0), 35);
        assert_eq!(basic_risk_score(0.0, 0.0, 0), 65);
        assert_eq!(basic_risk_score(0.0, 0.0, 1), 77);
    }

    #[test]
    fn basic_info_message() {
        let info = basic_risk_info(10_000.0, 600.0, 0);
        assert_eq!(
            info.risk_factors,
            vec!["Risk calculated based on route characteristics".to_owned()]
        );
        assert!(info.nearby_hotspots.is_empty());
    }

    #[test]
    fn safest_is_strict_minimum() {
        assert_eq!(select_safest(&[40, 10, 70]), Some(1));
        assert_eq!(select_safest(&[30, 30, 50]), Some(0));
        assert_eq!(select_safest(&[50, 20, 20]), Some(1));
        assert_eq!(select_safest(&[]), None);
    }

    #[test]
    fn fastest_is_strict_minimum() {
        assert_eq!(select_fastest(&[600.0, 540.0, 540.0]), Some(1));
        assert_eq!(select_fastest(&[100.0]), Some(0));
        assert_eq!(select_fastest(&[]), None);
    }
}
