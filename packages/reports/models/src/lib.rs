#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! User accident report types.
//!
//! Reports are submitted live by users, independently of the historical
//! dataset. They are shown on the map as single-accident pseudo-hotspots
//! and raise alerts for routes passing close to recent ones.

use chrono::{DateTime, Utc};
use saferoute_accident_models::AccidentSeverity;
use saferoute_geography_models::LatLng;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity as chosen by the reporting user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportSeverity {
    /// No serious injuries.
    Minor,
    /// Serious injuries.
    Serious,
    /// At least one death.
    Fatal,
}

impl ReportSeverity {
    /// Heat-map intensity of a report with this severity.
    #[must_use]
    pub const fn intensity(self) -> f64 {
        match self {
            Self::Fatal => 1.0,
            Self::Serious => 0.7,
            Self::Minor => 0.4,
        }
    }
}

impl From<ReportSeverity> for AccidentSeverity {
    fn from(value: ReportSeverity) -> Self {
        match value {
            ReportSeverity::Minor => Self::Minor,
            ReportSeverity::Serious => Self::Serious,
            ReportSeverity::Fatal => Self::Fatal,
        }
    }
}

/// A report as submitted, before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccidentReport {
    /// Id of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Email of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Latitude of the accident.
    pub latitude: f64,
    /// Longitude of the accident.
    pub longitude: f64,
    /// Free-text location, conventionally `City, State`.
    pub location: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reported severity.
    pub severity: ReportSeverity,
    /// Kind of accident, e.g. `Collision`.
    pub accident_type: String,
    /// Weather at the time of the accident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Type of road.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_type: Option<String>,
    /// When the accident happened, according to the user.
    pub reported_at: DateTime<Utc>,
}

/// A stored accident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentReport {
    /// Unique id assigned on storage.
    pub id: String,
    /// Id of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Email of the reporting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Latitude of the accident.
    pub latitude: f64,
    /// Longitude of the accident.
    pub longitude: f64,
    /// Free-text location, conventionally `City, State`.
    pub location: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reported severity.
    pub severity: ReportSeverity,
    /// Kind of accident.
    pub accident_type: String,
    /// Weather at the time of the accident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Type of road.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_type: Option<String>,
    /// When the accident happened, according to the user.
    pub reported_at: DateTime<Utc>,
    /// When the report was stored.
    pub created_at: DateTime<Utc>,
    /// Whether a moderator has confirmed the report.
    #[serde(default)]
    pub verified: bool,
}

impl AccidentReport {
    /// Stores a new report under `id`, unverified.
    #[must_use]
    pub fn from_new(id: String, report: NewAccidentReport, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: report.user_id,
            user_email: report.user_email,
            latitude: report.latitude,
            longitude: report.longitude,
            location: report.location,
            description: report.description,
            severity: report.severity,
            accident_type: report.accident_type,
            weather: report.weather,
            road_type: report.road_type,
            reported_at: report.reported_at,
            created_at,
            verified: false,
        }
    }

    /// The accident's coordinate.
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Reports grouped by their location text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFrequency {
    /// The shared location text.
    pub location: String,
    /// Number of reports.
    pub count: usize,
    /// Mean latitude of the reports.
    pub avg_lat: f64,
    /// Mean longitude of the reports.
    pub avg_lng: f64,
    /// Most recent `reported_at` among the reports.
    pub latest_report: DateTime<Utc>,
}
