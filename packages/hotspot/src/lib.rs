#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hotspot aggregation.
//!
//! Groups raw [`AccidentRecord`]s into [`Hotspot`]s keyed by location
//! (city, state and road type), computes severity counts, category
//! breakdowns and a normalized intensity, and places each cluster on the map
//! with a small amount of display jitter.
//!
//! Jitter is the only source of nondeterminism in the pipeline. It is
//! injected through [`Jitter`] so tests and reproducible exports can disable
//! or seed it; cluster membership and counts never depend on it.
//!
//! [`AccidentRecord`]: saferoute_accident_models::AccidentRecord

pub mod aggregate;
pub mod geojson;
pub mod jitter;

pub use aggregate::{
    DEFAULT_MIN_ACCIDENTS, HotspotAggregator, LocationKey, aggregate_to_hotspots,
    road_type_offset,
};
pub use jitter::{Jitter, JitterSource};
pub use saferoute_hotspot_models::{Hotspot, HotspotOrigin};
