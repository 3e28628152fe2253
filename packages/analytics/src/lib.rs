#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Attribute filtering and summary statistics.
//!
//! Filtering always re-runs the full hotspot aggregation on the filtered
//! record subset. It never subtracts from an already aggregated hotspot
//! list, because intensity is normalized against the whole qualifying set.

pub mod filter;
pub mod statistics;

pub use filter::{filter_records, filtered_hotspots};
pub use saferoute_analytics_models::{AccidentStatistics, CityTotals, FilterCriteria, StateTotals};
pub use statistics::get_statistics;
