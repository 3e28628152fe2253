//! Summary statistics over a hotspot set.

use std::collections::HashMap;

use saferoute_accident_models::is_known_location;
use saferoute_analytics_models::{AccidentStatistics, CityTotals, StateTotals};
use saferoute_hotspot_models::Hotspot;

/// Number of entries kept in each ranking.
const TOP_N: usize = 10;

/// Summarizes `hotspots` into totals and top-city/top-state rankings.
///
/// Rankings are sorted by accident count, largest first. Ties keep the order
/// in which hotspots (or, for states, the state's first hotspot) appear.
#[must_use]
pub fn get_statistics(hotspots: &[Hotspot]) -> AccidentStatistics {
    let total_accidents: u32 = hotspots.iter().map(|h| h.total_accidents).sum();
    let total_fatal: u32 = hotspots.iter().map(|h| h.fatal_accidents).sum();
    let total_serious: u32 = hotspots.iter().map(|h| h.serious_accidents).sum();

    AccidentStatistics {
        total_accidents,
        total_fatal,
        total_serious,
        total_minor: total_accidents.saturating_sub(total_fatal + total_serious),
        top_cities: top_cities(hotspots),
        top_states: top_states(hotspots),
        location_count: hotspots.len(),
    }
}

fn top_cities(hotspots: &[Hotspot]) -> Vec<CityTotals> {
    let mut cities: Vec<&Hotspot> = hotspots
        .iter()
        .filter(|h| is_known_location(&h.city))
        .collect();
    cities.sort_by(|a, b| b.total_accidents.cmp(&a.total_accidents));

    cities
        .into_iter()
        .take(TOP_N)
        .map(|h| CityTotals {
            key: h.key.clone(),
            city: h.city.clone(),
            state: h.state.clone(),
            total_accidents: h.total_accidents,
            fatal_accidents: h.fatal_accidents,
            serious_accidents: h.serious_accidents,
            intensity: h.intensity,
        })
        .collect()
}

fn top_states(hotspots: &[Hotspot]) -> Vec<StateTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut states: Vec<StateTotals> = Vec::new();

    for hotspot in hotspots {
        let slot = *index.entry(hotspot.state.as_str()).or_insert_with(|| {
            states.push(StateTotals {
                state: hotspot.state.clone(),
                total: 0,
                fatal: 0,
            });
            states.len() - 1
        });
        states[slot].total += hotspot.total_accidents;
        states[slot].fatal += hotspot.fatal_accidents;
    }

    states.sort_by(|a, b| b.total.cmp(&a.total));
    states.truncate(TOP_N);
    states
}
