#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! User accident reports.
//!
//! Reports live in a [`ReportStore`] and are queried by proximity, bounds,
//! location frequency and recency along a route. On the map each report is
//! its own single-accident hotspot, appended after the dataset hotspots.

pub mod hotspot;
pub mod queries;
pub mod store;

use thiserror::Error;

pub use hotspot::{merge_report_hotspots, report_to_hotspot};
pub use queries::{
    is_near_route, location_frequency, reports_in_bounds, reports_near_location, route_alert_message,
    route_alerts,
};
pub use saferoute_reports_models::{AccidentReport, NewAccidentReport, ReportSeverity};
pub use store::{InMemoryReportStore, ReportStore, load_reports, read_reports};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report store lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
