//! Great-circle distance.

use saferoute_geography_models::LatLng;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given as separate
/// latitude/longitude components.
///
/// Always returns a finite, non-negative value: identical points yield `0`
/// and antipodal points yield half the Earth's circumference.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + (delta_lng / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // Rounding can push `a` marginally outside [0, 1] near antipodes.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Haversine distance in kilometres between two points.
#[must_use]
pub fn distance_between(a: LatLng, b: LatLng) -> f64 {
    distance_km(a.lat, a.lng, b.lat, b.lng)
}
