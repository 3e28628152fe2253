#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial helpers shared by every stage of the engine.
//!
//! [`distance_km`] is the single distance function used for route/hotspot
//! proximity, step annotation and report queries. The [`coordinates`]
//! module holds the read-only city and state reference tables used to place
//! accident records on the map.

pub mod coordinates;
pub mod distance;

pub use distance::{EARTH_RADIUS_KM, distance_between, distance_km};
pub use saferoute_geography_models::{BoundingBox, LatLng};
