//! Proximity and frequency queries over accident reports.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use saferoute_geography::distance_between;
use saferoute_geography_models::{BoundingBox, LatLng};
use saferoute_reports_models::{AccidentReport, LocationFrequency};

/// Default radius for [`reports_near_location`].
pub const NEAR_LOCATION_RADIUS_KM: f64 = 5.0;

/// Default threshold for [`is_near_route`].
pub const NEAR_ROUTE_THRESHOLD_KM: f64 = 0.5;

/// Number of locations kept by [`location_frequency`].
pub const LOCATION_FREQUENCY_LIMIT: usize = 100;

/// Reports within `radius_km` of `center`, in input order.
#[must_use]
pub fn reports_near_location(
    reports: &[AccidentReport],
    center: LatLng,
    radius_km: f64,
) -> Vec<&AccidentReport> {
    reports
        .iter()
        .filter(|report| distance_between(center, report.position()) <= radius_km)
        .collect()
}

/// Reports inside `bounds`, edges included, in input order.
#[must_use]
pub fn reports_in_bounds<'a>(reports: &'a [AccidentReport], bounds: &BoundingBox) -> Vec<&'a AccidentReport> {
    reports
        .iter()
        .filter(|report| bounds.contains(report.position()))
        .collect()
}

/// Groups reports by location text.
///
/// Returns at most [`LOCATION_FREQUENCY_LIMIT`] groups, most reported
/// first. Groups with equal counts keep first-seen order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn location_frequency(reports: &[AccidentReport]) -> Vec<LocationFrequency> {
    struct Group<'a> {
        location: &'a str,
        count: usize,
        lat_sum: f64,
        lng_sum: f64,
        latest: DateTime<Utc>,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for report in reports {
        let location = report.location.as_str();
        if let Some(&slot) = index.get(location) {
            let group = &mut groups[slot];
            group.count += 1;
            group.lat_sum += report.latitude;
            group.lng_sum += report.longitude;
            group.latest = group.latest.max(report.reported_at);
        } else {
            index.insert(location, groups.len());
            groups.push(Group {
                location,
                count: 1,
                lat_sum: report.latitude,
                lng_sum: report.longitude,
                latest: report.reported_at,
            });
        }
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(LOCATION_FREQUENCY_LIMIT);

    groups
        .into_iter()
        .map(|group| LocationFrequency {
            location: group.location.to_owned(),
            count: group.count,
            avg_lat: group.lat_sum / group.count as f64,
            avg_lng: group.lng_sum / group.count as f64,
            latest_report: group.latest,
        })
        .collect()
}

/// Whether `point` lies within `threshold_km` of any route point.
#[must_use]
pub fn is_near_route(point: LatLng, route: &[LatLng], threshold_km: f64) -> bool {
    route
        .iter()
        .any(|&route_point| distance_between(point, route_point) <= threshold_km)
}

/// Reports from the last `recent_hours` (relative to `now`) that lie within
/// `radius_km` of the route.
#[must_use]
pub fn route_alerts<'a>(
    reports: &'a [AccidentReport],
    route: &[LatLng],
    now: DateTime<Utc>,
    recent_hours: u32,
    radius_km: f64,
) -> Vec<&'a AccidentReport> {
    let window = Duration::hours(i64::from(recent_hours));

    reports
        .iter()
        .filter(|report| now.signed_duration_since(report.reported_at) < window)
        .filter(|report| is_near_route(report.position(), route, radius_km))
        .collect()
}

/// Driver-facing alert text for `count` recent accidents near a route, or
/// `None` when there are none.
#[must_use]
pub fn route_alert_message(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 recent accident reported near your route.".to_owned()),
        n => Some(format!("{n} recent accidents reported near your route.")),
    }
}
