//! Danger zones and navigation step enrichment.
//!
//! Risky hotspots along a route become [`DangerZone`]s with a tiered
//! recommended speed. Each navigation step is then attributed to at most one
//! zone (the nearest within range) or, failing that, given a default speed
//! inferred from its instruction text.

use saferoute_geography::distance_between;
use saferoute_geography_models::LatLng;
use saferoute_hotspot_models::Hotspot;
use saferoute_routing_models::{DangerZone, DangerZoneInfo, NavigationStep};

/// Smallest hotspot that becomes a danger zone.
pub const MIN_ZONE_ACCIDENTS: u32 = 2;

/// Range within which a step is attributed to a danger zone.
pub const DANGER_ZONE_RADIUS_KM: f64 = 2.0;

/// Speed suggested for a step with no better information.
pub const DEFAULT_STEP_SPEED: u32 = 50;

/// Converts nearby hotspots into danger zones, largest first.
///
/// Hotspots with fewer than [`MIN_ZONE_ACCIDENTS`] accidents are skipped.
/// Zones with equal accident counts keep their input order.
#[must_use]
pub fn build_danger_zones(nearby: &[Hotspot]) -> Vec<DangerZone> {
    let mut zones: Vec<DangerZone> = nearby
        .iter()
        .filter(|hotspot| hotspot.total_accidents >= MIN_ZONE_ACCIDENTS)
        .map(danger_zone)
        .collect();
    zones.sort_by(|a, b| b.total_accidents.cmp(&a.total_accidents));
    zones
}

fn danger_zone(hotspot: &Hotspot) -> DangerZone {
    let (recommended_speed, caution_message) = if hotspot.fatal_accidents > 0 {
        (
            30,
            "⚠️ HIGH DANGER ZONE - Fatal accidents reported. Reduce speed significantly!",
        )
    } else if hotspot.serious_accidents > 2 {
        (
            35,
            "⚠️ DANGER ZONE - Multiple serious accidents. Drive with extreme caution!",
        )
    } else if hotspot.total_accidents > 5 {
        (
            40,
            "⚠️ Accident hotspot ahead - Stay alert and maintain safe distance",
        )
    } else {
        (40, "Drive carefully - accident-prone area")
    };

    DangerZone {
        lat: hotspot.lat,
        lng: hotspot.lng,
        city: hotspot.city.clone(),
        total_accidents: hotspot.total_accidents,
        fatal_accidents: hotspot.fatal_accidents,
        serious_accidents: hotspot.serious_accidents,
        recommended_speed,
        caution_message: caution_message.to_owned(),
    }
}

/// Annotates steps using the default [`DANGER_ZONE_RADIUS_KM`].
///
/// `locations[i]` is the location of `steps[i]`; steps without a location
/// get [`DEFAULT_STEP_SPEED`] and no annotation.
#[must_use]
pub fn enrich_steps(
    steps: Vec<NavigationStep>,
    zones: &[DangerZone],
    locations: &[LatLng],
) -> Vec<NavigationStep> {
    enrich_steps_within(steps, zones, locations, DANGER_ZONE_RADIUS_KM)
}

/// Annotates every step with a speed limit and, when a danger zone lies
/// strictly within `radius_km`, the nearest such zone.
#[must_use]
pub fn enrich_steps_within(
    steps: Vec<NavigationStep>,
    zones: &[DangerZone],
    locations: &[LatLng],
    radius_km: f64,
) -> Vec<NavigationStep> {
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| match locations.get(index) {
            Some(&location) => enrich_step(step, zones, location, radius_km),
            None => NavigationStep {
                speed_limit: Some(DEFAULT_STEP_SPEED),
                ..step
            },
        })
        .collect()
}

fn enrich_step(
    step: NavigationStep,
    zones: &[DangerZone],
    location: LatLng,
    radius_km: f64,
) -> NavigationStep {
    let Some((zone, distance)) = nearest_zone(zones, location, radius_km) else {
        let speed = default_speed(&step.instruction);
        return NavigationStep {
            speed_limit: Some(speed),
            ..step
        };
    };

    NavigationStep {
        speed_limit: Some(zone.recommended_speed),
        is_near_danger_zone: true,
        danger_zone_info: Some(DangerZoneInfo {
            city: zone.city.clone(),
            total_accidents: zone.total_accidents,
            fatal_accidents: zone.fatal_accidents,
            distance: (distance * 10.0).round() / 10.0,
        }),
        caution_warning: Some(zone.caution_message.clone()),
        ..step
    }
}

/// Nearest zone strictly within `radius_km`. The earliest zone wins ties.
fn nearest_zone(zones: &[DangerZone], location: LatLng, radius_km: f64) -> Option<(&DangerZone, f64)> {
    let mut nearest: Option<(&DangerZone, f64)> = None;

    for zone in zones {
        let distance = distance_between(location, zone.position());
        let closer = nearest.is_none_or(|(_, best)| distance < best);
        if distance < radius_km && closer {
            nearest = Some((zone, distance));
        }
    }

    nearest
}

/// Suggested speed for a step outside every danger zone, from keywords in
/// its instruction. Highway-class phrases are checked before turn-class
/// phrases.
#[must_use]
pub fn default_speed(instruction: &str) -> u32 {
    let lower = instruction.to_lowercase();

    if contains_any(&lower, &["highway", "expressway", "motorway"]) {
        80
    } else if contains_any(&lower, &["ramp", "roundabout", "rotary"]) {
        30
    } else if contains_any(&lower, &["turn", "fork"]) {
        40
    } else if contains_any(&lower, &["continue", "straight"]) {
        60
    } else {
        DEFAULT_STEP_SPEED
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
