//! Record filtering and filtered re-aggregation.

use saferoute_accident_models::AccidentRecord;
use saferoute_analytics_models::FilterCriteria;
use saferoute_hotspot::HotspotAggregator;
use saferoute_hotspot_models::Hotspot;

/// Returns the records passing `criteria`, in their original order.
#[must_use]
pub fn filter_records(records: &[AccidentRecord], criteria: &FilterCriteria) -> Vec<AccidentRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    let filtered: Vec<AccidentRecord> = records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    log::debug!(
        "Filter kept {} of {} records",
        filtered.len(),
        records.len()
    );

    filtered
}

/// Aggregates the records passing `criteria` into a fresh hotspot set.
#[must_use]
pub fn filtered_hotspots(
    records: &[AccidentRecord],
    criteria: &FilterCriteria,
    aggregator: &HotspotAggregator,
) -> Vec<Hotspot> {
    aggregator.aggregate(&filter_records(records, criteria))
}

#[cfg(test)]
mod tests {
    use saferoute_accident_models::AccidentSeverity;
    use saferoute_hotspot::Jitter;

    use super::*;

    fn record(city: &str, severity: AccidentSeverity, weather: &str) -> AccidentRecord {
        AccidentRecord {
            state: "Karnataka".to_owned(),
            city: city.to_owned(),
            year: 2019,
            month: "July".to_owned(),
            day_of_week: "Sunday".to_owned(),
            time_of_day: "22:40".to_owned(),
            severity,
            vehicles_involved: 2,
            vehicle_type: "Two-Wheeler".to_owned(),
            casualties: 2,
            fatalities: 0,
            weather: weather.to_owned(),
            road_type: "City Road".to_owned(),
            road_condition: "Wet".to_owned(),
            lighting: "Dark".to_owned(),
            traffic_control: "Signal".to_owned(),
            speed_limit: 40,
            driver_age: 23,
            driver_gender: "Male".to_owned(),
            license_status: "Valid".to_owned(),
            alcohol_involved: true,
            location_detail: "Ring road".to_owned(),
        }
    }

    fn records() -> Vec<AccidentRecord> {
        vec![
            record("Bangalore", AccidentSeverity::Fatal, "Rainy"),
            record("Bangalore", AccidentSeverity::Minor, "Clear"),
            record("Bangalore", AccidentSeverity::Serious, "Rainy"),
            record("Mysore", AccidentSeverity::Minor, "Rainy"),
            record("Mysore", AccidentSeverity::Minor, "Clear"),
        ]
    }

    #[test]
    fn no_filters_returns_original_set() {
        let records = records();
        assert_eq!(filter_records(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn filtering_never_grows_the_set() {
        let records = records();
        let criteria = FilterCriteria {
            weather: vec!["Rainy".to_owned()],
            ..FilterCriteria::default()
        };
        let filtered = filter_records(&records, &criteria);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.len() <= records.len());
        assert!(filtered.iter().all(|r| r.weather == "Rainy"));
    }

    #[test]
    fn unmatched_filter_yields_nothing() {
        let criteria = FilterCriteria {
            road_type: vec!["Expressway".to_owned()],
            ..FilterCriteria::default()
        };
        assert!(filter_records(&records(), &criteria).is_empty());
    }

    #[test]
    fn filtered_hotspots_reaggregate() {
        let aggregator = HotspotAggregator::new(2).with_jitter(Jitter::None);
        let records = records();

        let all = filtered_hotspots(&records, &FilterCriteria::default(), &aggregator);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].total_accidents, 3);

        let rainy = FilterCriteria {
            weather: vec!["Rainy".to_owned()],
            ..FilterCriteria::default()
        };
        let hotspots = filtered_hotspots(&records, &rainy, &aggregator);
        // Mysore falls below the threshold once filtered.
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].city, "Bangalore");
        assert_eq!(hotspots[0].total_accidents, 2);
        // Largest qualifying cluster is now this one: count weight 1.
        let severity_weight = (4.0 + 2.5) / 8.0;
        assert!((hotspots[0].intensity - (0.5 * severity_weight + 0.5)).abs() < 1e-9);
    }
}
