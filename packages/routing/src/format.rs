//! Display formatting for routes and navigation steps.

use saferoute_routing_models::OsrmStep;

/// Formats a distance in metres.
///
/// Distances of a kilometre or more are shown in km with two decimals under
/// 10 km, one decimal under 100 km and none beyond.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        let km = meters / 1000.0;
        if km < 10.0 {
            format!("{km:.2} km")
        } else if km < 100.0 {
            format!("{km:.1} km")
        } else {
            format!("{:.0} km", km.round())
        }
    } else {
        format!("{:.0} m", meters.round())
    }
}

/// Formats a duration in seconds as `1h 5m`, `12 min` or `40 sec`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes} min")
    } else {
        format!("{} sec", (seconds % 60.0).round() as u64)
    }
}

/// Average speed in km/h rounded to one decimal, or `0` for a non-positive
/// duration.
#[must_use]
pub fn average_speed_kmh(distance_meters: f64, duration_seconds: f64) -> f64 {
    if duration_seconds <= 0.0 {
        return 0.0;
    }
    let kmh = (distance_meters / 1000.0) / (duration_seconds / 3600.0);
    (kmh * 10.0).round() / 10.0
}

/// Human-readable instruction for an OSRM step.
#[must_use]
pub fn format_instruction(step: &OsrmStep) -> String {
    let street = if step.name.is_empty() {
        "the road"
    } else {
        step.name.as_str()
    };
    let modifier = step
        .maneuver
        .modifier
        .as_deref()
        .map_or_else(String::new, |modifier| format!("{modifier} "));

    match step.maneuver.kind.as_str() {
        "depart" => format!("Start on {street}"),
        "arrive" => "Arrive at your destination".to_owned(),
        "turn" => format!("Turn {modifier}onto {street}"),
        "merge" => format!("Merge {modifier}onto {street}"),
        "on ramp" => format!("Take the ramp onto {street}"),
        "off ramp" => format!("Take the exit onto {street}"),
        "fork" => format!("Take the {modifier}fork onto {street}"),
        "end of road" => format!("At the end, turn {modifier}onto {street}"),
        "roundabout" => format!("At the roundabout, take the exit onto {street}"),
        "rotary" => format!("At the rotary, take the exit onto {street}"),
        "new name" => format!("Continue onto {street}"),
        _ => format!("Continue on {street}"),
    }
}

/// Icon for a maneuver.
///
/// Looks up `type-modifier` first (spaces folded to hyphens, so `end of
/// road` + `left` becomes `end-of-road-left`), then the bare type, then
/// falls back to a right arrow.
#[must_use]
pub fn maneuver_icon(kind: &str, modifier: Option<&str>) -> &'static str {
    let kind = kind.replace(' ', "-");

    modifier
        .and_then(|modifier| icon(&format!("{kind}-{}", modifier.replace(' ', "-"))))
        .or_else(|| icon(&kind))
        .unwrap_or("➡️")
}

fn icon(key: &str) -> Option<&'static str> {
    Some(match key {
        "depart" => "🚗",
        "arrive" => "🏁",
        "turn-left" | "end-of-road-left" => "⬅️",
        "turn-right" | "end-of-road-right" => "➡️",
        "turn-slight-left" | "fork-left" | "merge-left" | "ramp-left" | "on-ramp-left"
        | "off-ramp-left" => "↖️",
        "turn-slight-right" | "fork-right" | "merge-right" | "ramp-right" | "on-ramp-right"
        | "off-ramp-right" => "↗️",
        "turn-sharp-left" => "↩️",
        "turn-sharp-right" => "↪️",
        "continue" => "⬆️",
        "roundabout" | "rotary" => "🔄",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use saferoute_routing_models::OsrmManeuver;

    use super::*;

    fn osrm_step(kind: &str, modifier: Option<&str>, name: &str) -> OsrmStep {
        OsrmStep {
            distance: 100.0,
            duration: 10.0,
            name: name.to_owned(),
            maneuver: OsrmManeuver {
                kind: kind.to_owned(),
                modifier: modifier.map(ToOwned::to_owned),
                location: [73.85, 18.52],
            },
        }
    }

    #[test]
    fn distances() {
        assert_eq!(format_distance(450.4), "450 m");
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(9_876.0), "9.88 km");
        assert_eq!(format_distance(15_240.0), "15.2 km");
        assert_eq!(format_distance(148_600.0), "149 km");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(42.0), "42 sec");
        assert_eq!(format_duration(125.0), "2 min");
        assert_eq!(format_duration(3_600.0), "1h 0m");
        assert_eq!(format_duration(7_530.0), "2h 5m");
        assert_eq!(format_duration(0.0), "0 sec");
    }

    #[test]
    fn average_speed() {
        assert!((average_speed_kmh(10_000.0, 600.0) - 60.0).abs() < f64::EPSILON);
        assert!((average_speed_kmh(1_000.0, 0.0)).abs() < f64::EPSILON);
        assert!((average_speed_kmh(1_000.0, 70.0) - 51.4).abs() < 1e-9);
    }

    #[test]
    fn instructions() {
        assert_eq!(format_instruction(&osrm_step("depart", None, "FC Road")), "Start on FC Road");
        assert_eq!(
            format_instruction(&osrm_step("turn", Some("left"), "MG Road")),
            "Turn left onto MG Road"
        );
        assert_eq!(
            format_instruction(&osrm_step("turn", None, "MG Road")),
            "Turn onto MG Road"
        );
        assert_eq!(
            format_instruction(&osrm_step("fork", Some("slight right"), "NH48")),
            "Take the slight right fork onto NH48"
        );
        assert_eq!(
            format_instruction(&osrm_step("roundabout", Some("right"), "")),
            "At the roundabout, take the exit onto the road"
        );
        assert_eq!(
            format_instruction(&osrm_step("arrive", None, "FC Road")),
            "Arrive at your destination"
        );
        assert_eq!(
            format_instruction(&osrm_step("use lane", Some("straight"), "Ring Road")),
            "Continue on Ring Road"
        );
    }

    #[test]
    fn icons() {
        assert_eq!(maneuver_icon("depart", None), "🚗");
        assert_eq!(maneuver_icon("turn", Some("left")), "⬅️");
        assert_eq!(maneuver_icon("turn", Some("slight left")), "↖️");
        assert_eq!(maneuver_icon("end of road", Some("right")), "➡️");
        assert_eq!(maneuver_icon("continue", Some("straight")), "⬆️");
        assert_eq!(maneuver_icon("roundabout", Some("left")), "🔄");
        assert_eq!(maneuver_icon("new name", None), "➡️");
    }
}
