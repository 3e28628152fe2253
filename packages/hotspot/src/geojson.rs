//! `GeoJSON` export of hotspots for map layers.

use saferoute_hotspot_models::Hotspot;
use serde_json::Value;

/// Converts hotspots into a `GeoJSON` `FeatureCollection` of point features.
///
/// Each feature carries the hotspot's key, location names, counts and
/// intensity as properties. Backing records are not exported.
#[must_use]
pub fn to_feature_collection(hotspots: &[Hotspot]) -> Value {
    let features: Vec<Value> = hotspots.iter().map(to_feature).collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn to_feature(hotspot: &Hotspot) -> Value {
    serde_json::json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": hotspot.position().to_lng_lat(),
        },
        "properties": {
            "key": hotspot.key,
            "origin": hotspot.origin,
            "city": hotspot.city,
            "state": hotspot.state,
            "intensity": hotspot.intensity,
            "totalAccidents": hotspot.total_accidents,
            "fatalAccidents": hotspot.fatal_accidents,
            "seriousAccidents": hotspot.serious_accidents,
            "minorAccidents": hotspot.minor_accidents,
            "weatherBreakdown": hotspot.weather_breakdown,
            "roadTypeBreakdown": hotspot.road_type_breakdown,
        },
    })
}
