#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line driver for the accident risk engine.
//!
//! Loads the accident dataset, aggregates hotspots, prints statistics and
//! scores candidate routes returned by an OSRM server. Logging goes through
//! `pretty_env_logger`; set `RUST_LOG=info` to see ingestion totals.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use saferoute_config::EngineConfig;

use crate::commands::FilterArgs;

#[derive(Parser)]
#[command(name = "saferoute", about = "Accident hotspots and route risk scoring")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the accident dataset into hotspots
    Hotspots {
        /// Accident dataset (CSV)
        #[arg(long)]
        data: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
        /// Write the hotspots as a `GeoJSON` feature collection instead of
        /// printing them
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Print summary statistics for the (filtered) dataset as JSON
    Stats {
        /// Accident dataset (CSV)
        #[arg(long)]
        data: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Score candidate routes from an OSRM route response
    Plan {
        /// OSRM `route` response body (JSON)
        #[arg(long)]
        routes: PathBuf,
        /// Accident dataset (CSV). Without it routes get the basic estimate.
        #[arg(long)]
        data: Option<PathBuf>,
        /// Stored user accident reports (JSON array)
        #[arg(long)]
        reports: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref())?;
    log::debug!("Engine config: {config:?}");

    match cli.command {
        Commands::Hotspots {
            data,
            filters,
            geojson,
        } => commands::hotspots(&config, &data, filters, geojson.as_deref())?,
        Commands::Stats { data, filters } => commands::stats(&config, &data, filters)?,
        Commands::Plan {
            routes,
            data,
            reports,
        } => commands::plan(&config, &routes, data.as_deref(), reports.as_deref())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use saferoute_accident_models::AccidentSeverity;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filters() {
        let cli = Cli::try_parse_from([
            "saferoute",
            "stats",
            "--data",
            "accidents.csv",
            "--severity",
            "fatal,Serious",
            "--road-type",
            "Highway",
            "--config",
            "engine.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("engine.toml")));
        let Commands::Stats { data, filters } = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(data, PathBuf::from("accidents.csv"));
        assert_eq!(
            filters.severity,
            vec![AccidentSeverity::Fatal, AccidentSeverity::Serious]
        );
        assert_eq!(filters.road_type, vec!["Highway".to_owned()]);
        assert!(filters.weather.is_empty());
    }

    #[test]
    fn plan_data_is_optional() {
        let cli = Cli::try_parse_from(["saferoute", "plan", "--routes", "osrm.json"]).unwrap();
        let Commands::Plan { data, reports, .. } = cli.command else {
            panic!("expected plan");
        };
        assert!(data.is_none());
        assert!(reports.is_none());
    }

    #[test]
    fn rejects_unknown_severity() {
        assert!(
            Cli::try_parse_from([
                "saferoute",
                "hotspots",
                "--data",
                "a.csv",
                "--severity",
                "Moderate"
            ])
            .is_err()
        );
    }
}
