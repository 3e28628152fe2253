//! Keyed aggregation of accident records into hotspots.
//!
//! Aggregation runs in two passes. The first pass resolves every record to
//! a [`LocationKey`] and appends it to that key's accumulator, fixing the
//! cluster's display anchor on first insertion. The second pass finds the
//! largest qualifying cluster (needed to normalize intensity) and converts
//! each qualifying accumulator into a [`Hotspot`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use saferoute_accident_models::{AccidentRecord, AccidentSeverity};
use saferoute_geography::coordinates::{self, LocationPrecision};
use saferoute_geography_models::LatLng;
use saferoute_hotspot_models::{Hotspot, HotspotOrigin};

use crate::jitter::{Jitter, JitterSource};

/// Minimum number of accidents a location needs to become a hotspot.
pub const DEFAULT_MIN_ACCIDENTS: usize = 2;

/// Full width, in degrees, of the jitter applied to a cluster anchor.
const CLUSTER_JITTER_SPAN: f64 = 0.008;

/// The grouping identity of a hotspot.
///
/// Records sharing a key are merged into one hotspot regardless of where
/// their individual coordinates would have landed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationKey {
    /// A known city, split by road type so that road types stay visually
    /// separated within the city.
    City {
        /// City name as written in the record.
        city: String,
        /// State name as written in the record.
        state: String,
        /// Road type category.
        road_type: String,
    },
    /// A coarse grid cell (0.01°) around a state centroid, used when the
    /// city is unknown.
    StateGrid {
        /// State name as written in the record.
        state: String,
        /// Latitude of the state centroid in hundredths of a degree.
        lat_cell: i64,
        /// Longitude of the state centroid in hundredths of a degree.
        lng_cell: i64,
    },
}

impl LocationKey {
    #[allow(clippy::cast_possible_truncation)]
    fn state_grid(state: &str, base: LatLng) -> Self {
        Self::StateGrid {
            state: state.to_owned(),
            lat_cell: (base.lat * 100.0).round() as i64,
            lng_cell: (base.lng * 100.0).round() as i64,
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City {
                city,
                state,
                road_type,
            } => write!(f, "{city}|{state}|{road_type}"),
            Self::StateGrid {
                state,
                lat_cell,
                lng_cell,
            } => write!(f, "{state}|{lat_cell}|{lng_cell}"),
        }
    }
}

/// Fixed per-road-type display offset `(d_lat, d_lng)` in degrees, so that
/// clusters for different road types in the same city do not overlap.
#[must_use]
pub fn road_type_offset(road_type: &str) -> (f64, f64) {
    match road_type {
        "Highway" => (0.005, 0.003),
        "City Road" => (-0.003, 0.005),
        "Rural Road" => (0.004, -0.004),
        "Expressway" => (-0.005, -0.003),
        _ => (0.0, 0.0),
    }
}

struct ClusterAccumulator<'a> {
    key: LocationKey,
    anchor: LatLng,
    city: &'a str,
    state: &'a str,
    records: Vec<&'a AccidentRecord>,
}

/// Builds hotspots from accident records.
#[derive(Debug, Clone, Copy)]
pub struct HotspotAggregator {
    min_accidents: usize,
    jitter: Jitter,
}

impl Default for HotspotAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ACCIDENTS)
    }
}

impl HotspotAggregator {
    /// Creates an aggregator that emits clusters with at least
    /// `min_accidents` records, using entropy-seeded jitter.
    #[must_use]
    pub const fn new(min_accidents: usize) -> Self {
        Self {
            min_accidents,
            jitter: Jitter::Entropy,
        }
    }

    /// Replaces the jitter mode.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// The configured cluster threshold.
    #[must_use]
    pub const fn min_accidents(&self) -> usize {
        self.min_accidents
    }

    /// Aggregates `records` into hotspots.
    ///
    /// Records whose city and state both fail to resolve are dropped.
    /// Hotspots are returned in the order their location key was first seen.
    #[must_use]
    pub fn aggregate(&self, records: &[AccidentRecord]) -> Vec<Hotspot> {
        let mut jitter = self.jitter.source();
        let (clusters, unresolved) = group_records(records, &mut jitter);

        let min_accidents = self.min_accidents.max(1);
        let max_cluster = clusters
            .iter()
            .map(|cluster| cluster.records.len())
            .filter(|&len| len >= min_accidents)
            .max()
            .unwrap_or(0)
            .max(1);

        let total_clusters = clusters.len();
        let hotspots: Vec<Hotspot> = clusters
            .into_iter()
            .filter(|cluster| cluster.records.len() >= min_accidents)
            .map(|cluster| build_hotspot(cluster, max_cluster))
            .collect();

        log::debug!(
            "Aggregated {} records into {} hotspots ({} clusters below threshold of {min_accidents}, {unresolved} records unresolved)",
            records.len(),
            hotspots.len(),
            total_clusters - hotspots.len(),
        );

        hotspots
    }
}

/// Aggregates `records` with the given threshold and entropy-seeded jitter.
#[must_use]
pub fn aggregate_to_hotspots(records: &[AccidentRecord], min_accidents: usize) -> Vec<Hotspot> {
    HotspotAggregator::new(min_accidents).aggregate(records)
}

/// First pass: groups records by location key, preserving first-seen order.
///
/// Returns the clusters and the number of records that could not be placed.
fn group_records<'a>(
    records: &'a [AccidentRecord],
    jitter: &mut JitterSource,
) -> (Vec<ClusterAccumulator<'a>>, usize) {
    let mut index: HashMap<LocationKey, usize> = HashMap::new();
    let mut clusters: Vec<ClusterAccumulator<'a>> = Vec::new();
    let mut unresolved = 0usize;

    for record in records {
        let Some(resolved) = coordinates::resolve(&record.city, &record.state) else {
            unresolved += 1;
            continue;
        };

        let key = if record.has_known_city() {
            LocationKey::City {
                city: record.city.clone(),
                state: record.state.clone(),
                road_type: record.road_type.clone(),
            }
        } else {
            LocationKey::state_grid(&record.state, resolved.base)
        };

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let anchor = cluster_anchor(
                    resolved.base,
                    resolved.precision,
                    &record.road_type,
                    jitter,
                );
                clusters.push(ClusterAccumulator {
                    key: key.clone(),
                    anchor,
                    city: &record.city,
                    state: &record.state,
                    records: Vec::new(),
                });
                index.insert(key, clusters.len() - 1);
                clusters.len() - 1
            }
        };

        clusters[slot].records.push(record);
    }

    (clusters, unresolved)
}

/// Places a new cluster: reference coordinate, spread by lookup precision,
/// shifted by road type, then jittered once more at cluster scale.
fn cluster_anchor(
    base: LatLng,
    precision: LocationPrecision,
    road_type: &str,
    jitter: &mut JitterSource,
) -> LatLng {
    let span = precision.jitter_span();
    let located = base.offset(jitter.offset(span), jitter.offset(span));
    let (d_lat, d_lng) = road_type_offset(road_type);
    located.offset(
        d_lat + jitter.offset(CLUSTER_JITTER_SPAN),
        d_lng + jitter.offset(CLUSTER_JITTER_SPAN),
    )
}

/// Second pass: converts one qualifying cluster into a hotspot.
fn build_hotspot(cluster: ClusterAccumulator<'_>, max_cluster: usize) -> Hotspot {
    let mut fatal = 0u32;
    let mut serious = 0u32;
    let mut minor = 0u32;
    let mut weather_breakdown: BTreeMap<String, u32> = BTreeMap::new();
    let mut road_type_breakdown: BTreeMap<String, u32> = BTreeMap::new();

    for record in &cluster.records {
        match record.severity {
            AccidentSeverity::Fatal => fatal += 1,
            AccidentSeverity::Serious => serious += 1,
            AccidentSeverity::Minor => minor += 1,
        }
        *weather_breakdown.entry(record.weather.clone()).or_default() += 1;
        *road_type_breakdown
            .entry(record.road_type.clone())
            .or_default() += 1;
    }

    let total = fatal + serious + minor;

    Hotspot {
        key: cluster.key.to_string(),
        origin: HotspotOrigin::Dataset,
        lat: cluster.anchor.lat,
        lng: cluster.anchor.lng,
        intensity: intensity(fatal, serious, minor, max_cluster),
        city: cluster.city.to_owned(),
        state: cluster.state.to_owned(),
        total_accidents: total,
        fatal_accidents: fatal,
        serious_accidents: serious,
        minor_accidents: minor,
        weather_breakdown,
        road_type_breakdown,
        records: cluster.records.into_iter().cloned().collect(),
    }
}

/// Heat-map intensity: an even blend of average severity (normalized so an
/// all-fatal cluster scores 1) and relative size against the largest
/// qualifying cluster, clamped to `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn intensity(fatal: u32, serious: u32, minor: u32, max_cluster: usize) -> f64 {
    let total = fatal + serious + minor;
    if total == 0 {
        return 0.0;
    }
    let total = f64::from(total);

    let weighted = f64::from(fatal) * AccidentSeverity::Fatal.weight()
        + f64::from(serious) * AccidentSeverity::Serious.weight()
        + f64::from(minor) * AccidentSeverity::Minor.weight();
    let severity_weight = weighted / (total * AccidentSeverity::MAX_WEIGHT);
    let count_weight = total / max_cluster.max(1) as f64;

    0.5f64
        .mul_add(severity_weight, 0.5 * count_weight)
        .clamp(0.0, 1.0)
}
