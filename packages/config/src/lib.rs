#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Engine configuration.
//!
//! [`EngineConfig`] holds the tunable radii, thresholds and limits used
//! across the engine. It is read from an optional TOML file in which every
//! field may be omitted, then `SAFEROUTE_*` environment variables are
//! layered on top.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use saferoute_hotspot::{DEFAULT_MIN_ACCIDENTS, HotspotAggregator, Jitter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`EngineConfig::min_accidents`].
pub const ENV_MIN_ACCIDENTS: &str = "SAFEROUTE_MIN_ACCIDENTS";
/// Environment variable overriding [`EngineConfig::scoring_radius_km`].
pub const ENV_SCORING_RADIUS_KM: &str = "SAFEROUTE_SCORING_RADIUS_KM";
/// Environment variable overriding [`EngineConfig::step_radius_km`].
pub const ENV_STEP_RADIUS_KM: &str = "SAFEROUTE_STEP_RADIUS_KM";
/// Environment variable that switches [`EngineConfig::jitter`] to a fixed
/// seed.
pub const ENV_JITTER_SEED: &str = "SAFEROUTE_JITTER_SEED";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`EngineConfig`].
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Description of what is wrong.
        message: String,
    },
}

/// Tunable engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Radius in km within which a hotspot counts as near a route.
    pub scoring_radius_km: f64,
    /// Radius in km within which a navigation step is attributed to a
    /// danger zone.
    pub step_radius_km: f64,
    /// Minimum accidents for a location to become a hotspot.
    pub min_accidents: usize,
    /// Display jitter applied to hotspot coordinates.
    pub jitter: Jitter,
    /// Radius in km within which a recent user report raises a route alert.
    pub report_alert_radius_km: f64,
    /// Age in hours after which a user report no longer raises alerts.
    pub report_recent_hours: u32,
    /// Maximum number of user reports shown in the live feed.
    pub report_feed_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring_radius_km: 5.0,
            step_radius_km: 2.0,
            min_accidents: DEFAULT_MIN_ACCIDENTS,
            jitter: Jitter::Entropy,
            report_alert_radius_km: 1.0,
            report_recent_hours: 24,
            report_feed_limit: 200,
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Parse`] if the document is not valid TOML or has
    ///   unknown fields
    /// * [`ConfigError::Invalid`] if a value is out of range
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the configuration for a run: the file at `path` if given,
    /// defaults otherwise, with environment overrides applied on top.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Read`] if the file cannot be read
    /// * [`ConfigError::Parse`] if the file is not valid TOML
    /// * [`ConfigError::Invalid`] if a value is out of range
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                log::info!("Loading config from {}", path.display());
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        log::debug!("Effective config: {config:?}");

        Ok(config)
    }

    /// Applies `SAFEROUTE_*` environment overrides. Unparseable values are
    /// logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = parse_override(&lookup, ENV_MIN_ACCIDENTS) {
            self.min_accidents = value;
        }
        if let Some(value) = parse_override(&lookup, ENV_SCORING_RADIUS_KM) {
            self.scoring_radius_km = value;
        }
        if let Some(value) = parse_override(&lookup, ENV_STEP_RADIUS_KM) {
            self.step_radius_km = value;
        }
        if let Some(seed) = parse_override(&lookup, ENV_JITTER_SEED) {
            self.jitter = Jitter::Seed(seed);
        }
    }

    /// Checks that every value is within its allowed range.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Invalid`] naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius("scoring_radius_km", self.scoring_radius_km)?;
        check_radius("step_radius_km", self.step_radius_km)?;
        check_radius("report_alert_radius_km", self.report_alert_radius_km)?;

        if self.min_accidents == 0 {
            return Err(ConfigError::Invalid {
                field: "min_accidents",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// A hotspot aggregator using this configuration's threshold and jitter.
    #[must_use]
    pub const fn aggregator(&self) -> HotspotAggregator {
        HotspotAggregator::new(self.min_accidents).with_jitter(self.jitter)
    }
}

fn parse_override<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => {
            log::debug!("Using {name}={raw}");
            Some(value)
        }
        Err(_) => {
            log::warn!("Ignoring invalid value for {name}: {raw:?}");
            None
        }
    }
}

fn check_radius(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("must be a positive number of km, got {value}"),
        })
    }
}
