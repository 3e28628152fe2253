//! Subcommand implementations.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Args;
use saferoute_accident_models::AccidentSeverity;
use saferoute_analytics::{FilterCriteria, filtered_hotspots, get_statistics};
use saferoute_config::EngineConfig;
use saferoute_geography_models::LatLng;
use saferoute_hotspot::Hotspot;
use saferoute_hotspot::geojson::to_feature_collection;
use saferoute_ingest::{IngestError, load_csv};
use saferoute_reports::{
    AccidentReport, InMemoryReportStore, ReportStore as _, load_reports, merge_report_hotspots,
    route_alert_message, route_alerts,
};
use saferoute_routing::{parse_response, plan_routes};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Record filters shared by the dataset subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Severities to keep, comma-separated (e.g. `Fatal,Serious`)
    #[arg(long, value_delimiter = ',', value_parser = parse_severity)]
    pub severity: Vec<AccidentSeverity>,
    /// Weather categories to keep, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub weather: Vec<String>,
    /// Road types to keep, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub road_type: Vec<String>,
}

fn parse_severity(value: &str) -> Result<AccidentSeverity, String> {
    value
        .parse()
        .map_err(|_| format!("unknown severity '{value}', expected Minor, Serious or Fatal"))
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self {
            severity: args.severity,
            weather: args.weather,
            road_type: args.road_type,
        }
    }
}

fn load_hotspots(
    data: &Path,
    filters: FilterArgs,
    config: &EngineConfig,
) -> Result<Vec<Hotspot>, IngestError> {
    let records = load_csv(data)?;
    let hotspots = filtered_hotspots(&records, &filters.into(), &config.aggregator());
    log::info!(
        "Aggregated {} records into {} hotspots",
        records.len(),
        hotspots.len()
    );
    Ok(hotspots)
}

pub fn hotspots(
    config: &EngineConfig,
    data: &Path,
    filters: FilterArgs,
    geojson: Option<&Path>,
) -> CommandResult {
    let hotspots = load_hotspots(data, filters, config)?;

    if let Some(out) = geojson {
        let collection = to_feature_collection(&hotspots);
        std::fs::write(out, serde_json::to_string_pretty(&collection)?)?;
        log::info!("Wrote {} hotspots to {}", hotspots.len(), out.display());
        return Ok(());
    }

    println!("{} hotspots", hotspots.len());
    for hotspot in &hotspots {
        println!(
            "{:<40} {:>5} accidents ({} fatal)  intensity {:.3}",
            hotspot.key, hotspot.total_accidents, hotspot.fatal_accidents, hotspot.intensity
        );
    }

    Ok(())
}

pub fn stats(config: &EngineConfig, data: &Path, filters: FilterArgs) -> CommandResult {
    let hotspots = load_hotspots(data, filters, config)?;
    let statistics = get_statistics(&hotspots);
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}

pub fn plan(
    config: &EngineConfig,
    routes: &Path,
    data: Option<&Path>,
    reports: Option<&Path>,
) -> CommandResult {
    let body = std::fs::read_to_string(routes)?;
    let candidates = parse_response(&body)?;

    let dataset = match data {
        Some(data) => load_hotspots(data, FilterArgs::default(), config)?,
        None => {
            log::info!("No accident data given, using the basic risk estimate");
            Vec::new()
        }
    };

    let reports = match reports {
        Some(path) => {
            let store = InMemoryReportStore::from_reports(load_reports(path)?);
            store.recent(config.report_feed_limit)?
        }
        None => Vec::new(),
    };

    let hotspots = merge_report_hotspots(dataset, &reports);
    let result = plan_routes(&candidates, &hotspots, config);

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(safest) = result.polylines.get(result.safest_index)
        && let Some(message) = alert_for_route(&reports, &safest.coordinates, Utc::now(), config)
    {
        log::warn!("{message}");
    }

    Ok(())
}

/// Alert text for recent user reports near `route`.
fn alert_for_route(
    reports: &[AccidentReport],
    route: &[LatLng],
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Option<String> {
    let alerts = route_alerts(
        reports,
        route,
        now,
        config.report_recent_hours,
        config.report_alert_radius_km,
    );
    route_alert_message(alerts.len())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone as _};
    use saferoute_reports::{NewAccidentReport, ReportSeverity};

    use super::*;

    fn report(id: &str, lat: f64, lng: f64, reported_at: DateTime<Utc>) -> AccidentReport {
        AccidentReport::from_new(
            id.to_owned(),
            NewAccidentReport {
                user_id: None,
                user_email: None,
                latitude: lat,
                longitude: lng,
                location: "Pune, Maharashtra".to_owned(),
                description: None,
                severity: ReportSeverity::Serious,
                accident_type: "Collision".to_owned(),
                weather: None,
                road_type: None,
                reported_at,
            },
            reported_at,
        )
    }

    #[test]
    fn filter_args_become_criteria() {
        let criteria: FilterCriteria = FilterArgs {
            severity: vec![AccidentSeverity::Fatal],
            weather: vec!["Rainy".to_owned()],
            road_type: Vec::new(),
        }
        .into();
        assert_eq!(criteria.severity, vec![AccidentSeverity::Fatal]);
        assert_eq!(criteria.weather, vec!["Rainy".to_owned()]);
        assert!(criteria.road_type.is_empty());
        assert!(FilterCriteria::from(FilterArgs::default()).is_empty());
    }

    #[test]
    fn alerts_for_recent_reports_on_route() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let route = vec![LatLng::new(18.50, 73.80), LatLng::new(18.55, 73.85)];
        let reports = vec![
            report("a", 18.501, 73.80, now - Duration::hours(1)),
            report("b", 18.551, 73.85, now - Duration::hours(3)),
            report("stale", 18.50, 73.80, now - Duration::hours(48)),
        ];
        let config = EngineConfig::default();

        assert_eq!(
            alert_for_route(&reports, &route, now, &config).as_deref(),
            Some("2 recent accidents reported near your route.")
        );
        assert_eq!(alert_for_route(&[], &route, now, &config), None);
    }
}
