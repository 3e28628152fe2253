//! Map merge of user reports into the hotspot layer.

use std::collections::BTreeMap;

use saferoute_accident_models::{AccidentSeverity, UNKNOWN_LOCATION};
use saferoute_hotspot_models::{Hotspot, HotspotOrigin};
use saferoute_reports_models::AccidentReport;

/// Converts a report into a single-accident pseudo-hotspot.
///
/// City and state are taken from the comma-separated location text and
/// default to `Unknown` when missing.
#[must_use]
pub fn report_to_hotspot(report: &AccidentReport) -> Hotspot {
    let mut parts = report.location.split(',').map(str::trim);
    let city = parts.next().filter(|part| !part.is_empty());
    let state = parts.next().filter(|part| !part.is_empty());
    let severity = AccidentSeverity::from(report.severity);

    Hotspot {
        key: format!("report:{}", report.id),
        origin: HotspotOrigin::UserReport,
        lat: report.latitude,
        lng: report.longitude,
        intensity: report.severity.intensity(),
        city: city.unwrap_or(UNKNOWN_LOCATION).to_owned(),
        state: state.unwrap_or(UNKNOWN_LOCATION).to_owned(),
        total_accidents: 1,
        fatal_accidents: u32::from(severity == AccidentSeverity::Fatal),
        serious_accidents: u32::from(severity == AccidentSeverity::Serious),
        minor_accidents: u32::from(severity == AccidentSeverity::Minor),
        weather_breakdown: single_entry(report.weather.as_deref()),
        road_type_breakdown: single_entry(report.road_type.as_deref()),
        records: Vec::new(),
    }
}

fn single_entry(category: Option<&str>) -> BTreeMap<String, u32> {
    category
        .filter(|category| !category.is_empty())
        .map(|category| BTreeMap::from([(category.to_owned(), 1)]))
        .unwrap_or_default()
}

/// Appends report pseudo-hotspots after the dataset hotspots.
///
/// Reports are never re-aggregated with the dataset; each stays a separate
/// single-accident hotspot.
#[must_use]
pub fn merge_report_hotspots(mut dataset: Vec<Hotspot>, reports: &[AccidentReport]) -> Vec<Hotspot> {
    dataset.reserve(reports.len());
    dataset.extend(reports.iter().map(report_to_hotspot));
    dataset
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use saferoute_reports_models::ReportSeverity;

    use super::*;

    fn report(id: &str, location: &str, severity: ReportSeverity) -> AccidentReport {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        AccidentReport {
            id: id.to_owned(),
            user_id: Some("u1".to_owned()),
            user_email: None,
            latitude: 18.52,
            longitude: 73.85,
            location: location.to_owned(),
            description: None,
            severity,
            accident_type: "Collision".to_owned(),
            weather: Some("Rainy".to_owned()),
            road_type: None,
            reported_at: at,
            created_at: at,
            verified: false,
        }
    }

    #[test]
    fn single_accident_hotspot() {
        let hotspot = report_to_hotspot(&report("a1", "Pune, Maharashtra", ReportSeverity::Serious));
        assert_eq!(hotspot.key, "report:a1");
        assert_eq!(hotspot.origin, HotspotOrigin::UserReport);
        assert_eq!(hotspot.city, "Pune");
        assert_eq!(hotspot.state, "Maharashtra");
        assert_eq!(hotspot.total_accidents, 1);
        assert_eq!(hotspot.serious_accidents, 1);
        assert!(hotspot.counts_consistent());
        assert!((hotspot.intensity - 0.7).abs() < f64::EPSILON);
        assert_eq!(hotspot.weather_breakdown.get("Rainy"), Some(&1));
        assert!(hotspot.road_type_breakdown.is_empty());
    }

    #[test]
    fn severity_lands_in_matching_count() {
        let fatal = report_to_hotspot(&report("f", "Pune, Maharashtra", ReportSeverity::Fatal));
        assert_eq!(
            (fatal.fatal_accidents, fatal.serious_accidents, fatal.minor_accidents),
            (1, 0, 0)
        );

        let minor = report_to_hotspot(&report("m", "Pune, Maharashtra", ReportSeverity::Minor));
        assert_eq!(
            (minor.fatal_accidents, minor.serious_accidents, minor.minor_accidents),
            (0, 0, 1)
        );
        assert!((minor.intensity - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_location_parts_are_unknown() {
        let hotspot = report_to_hotspot(&report("a2", "Near the bridge", ReportSeverity::Fatal));
        assert_eq!(hotspot.city, "Near the bridge");
        assert_eq!(hotspot.state, "Unknown");

        let hotspot = report_to_hotspot(&report("a3", "", ReportSeverity::Minor));
        assert_eq!(hotspot.city, "Unknown");
        assert_eq!(hotspot.state, "Unknown");
    }

    #[test]
    fn merge_appends_reports() {
        let dataset = vec![report_to_hotspot(&report("d", "Pune, Maharashtra", ReportSeverity::Minor))];
        let merged = merge_report_hotspots(
            dataset,
            &[
                report("r1", "Mumbai, Maharashtra", ReportSeverity::Fatal),
                report("r2", "Mumbai, Maharashtra", ReportSeverity::Fatal),
            ],
        );
        let keys: Vec<&str> = merged.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["report:d", "report:r1", "report:r2"]);
        assert!(merged.iter().all(|h| h.total_accidents == 1));
    }
}
