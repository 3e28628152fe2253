//! Static coordinate reference tables for Indian cities and states.
//!
//! Accident records only carry a city and state name, so their position is
//! resolved through these tables. The tables are process-wide and read-only:
//! the lookup maps are built on first use and never written afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use saferoute_geography_models::LatLng;

/// City centre coordinates.
pub const CITY_COORDINATES: &[(&str, LatLng)] = &[
    ("Mumbai", LatLng::new(19.0760, 72.8777)),
    ("Delhi", LatLng::new(28.6139, 77.2090)),
    ("Bangalore", LatLng::new(12.9716, 77.5946)),
    ("Hyderabad", LatLng::new(17.3850, 78.4867)),
    ("Chennai", LatLng::new(13.0827, 80.2707)),
    ("Kolkata", LatLng::new(22.5726, 88.3639)),
    ("Pune", LatLng::new(18.5204, 73.8567)),
    ("Ahmedabad", LatLng::new(23.0225, 72.5714)),
    ("Jaipur", LatLng::new(26.9124, 75.7873)),
    ("Lucknow", LatLng::new(26.8467, 80.9462)),
    ("Kanpur", LatLng::new(26.4499, 80.3319)),
    ("Nagpur", LatLng::new(21.1458, 79.0882)),
    ("Indore", LatLng::new(22.7196, 75.8577)),
    ("Thane", LatLng::new(19.2183, 72.9781)),
    ("Bhopal", LatLng::new(23.2599, 77.4126)),
    ("Visakhapatnam", LatLng::new(17.6868, 83.2185)),
    ("Patna", LatLng::new(25.5941, 85.1376)),
    ("Vadodara", LatLng::new(22.3072, 73.1812)),
    ("Ghaziabad", LatLng::new(28.6692, 77.4538)),
    ("Ludhiana", LatLng::new(30.9010, 75.8573)),
    ("Agra", LatLng::new(27.1767, 78.0081)),
    ("Nashik", LatLng::new(19.9975, 73.7898)),
    ("Faridabad", LatLng::new(28.4089, 77.3178)),
    ("Meerut", LatLng::new(28.9845, 77.7064)),
    ("Rajkot", LatLng::new(22.3039, 70.8022)),
    ("Varanasi", LatLng::new(25.3176, 82.9739)),
    ("Srinagar", LatLng::new(34.0837, 74.7973)),
    ("Aurangabad", LatLng::new(19.8762, 75.3433)),
    ("Dhanbad", LatLng::new(23.7957, 86.4304)),
    ("Amritsar", LatLng::new(31.6340, 74.8723)),
    ("Allahabad", LatLng::new(25.4358, 81.8463)),
    ("Ranchi", LatLng::new(23.3441, 85.3096)),
    ("Howrah", LatLng::new(22.5958, 88.2636)),
    ("Coimbatore", LatLng::new(11.0168, 76.9558)),
    ("Jabalpur", LatLng::new(23.1815, 79.9864)),
    ("Gwalior", LatLng::new(26.2183, 78.1828)),
    ("Vijayawada", LatLng::new(16.5062, 80.6480)),
    ("Jodhpur", LatLng::new(26.2389, 73.0243)),
    ("Madurai", LatLng::new(9.9252, 78.1198)),
    ("Raipur", LatLng::new(21.2514, 81.6296)),
    ("Kota", LatLng::new(25.2138, 75.8648)),
    ("Chandigarh", LatLng::new(30.7333, 76.7794)),
    ("Guwahati", LatLng::new(26.1445, 91.7362)),
    ("Solapur", LatLng::new(17.6599, 75.9064)),
    ("Hubli", LatLng::new(15.3647, 75.1240)),
    ("Tiruchirappalli", LatLng::new(10.7905, 78.7047)),
    ("Bareilly", LatLng::new(28.3670, 79.4304)),
    ("Mysore", LatLng::new(12.2958, 76.6394)),
    ("Tirupati", LatLng::new(13.6288, 79.4192)),
    ("Gurgaon", LatLng::new(28.4595, 77.0266)),
    ("Aligarh", LatLng::new(27.8974, 78.0880)),
    ("Jalandhar", LatLng::new(31.3260, 75.5762)),
    ("Bhubaneswar", LatLng::new(20.2961, 85.8245)),
    ("Salem", LatLng::new(11.6643, 78.1460)),
    ("Warangal", LatLng::new(17.9784, 79.5941)),
    ("Guntur", LatLng::new(16.3067, 80.4365)),
    ("Bhiwandi", LatLng::new(19.2813, 73.0633)),
    ("Saharanpur", LatLng::new(29.9680, 77.5510)),
    ("Gorakhpur", LatLng::new(26.7606, 83.3732)),
    ("Bikaner", LatLng::new(28.0229, 73.3119)),
    ("Amravati", LatLng::new(20.9320, 77.7523)),
    ("Noida", LatLng::new(28.5355, 77.3910)),
    ("Jamshedpur", LatLng::new(22.8046, 86.2029)),
    ("Bhilai", LatLng::new(21.2167, 81.4333)),
    ("Cuttack", LatLng::new(20.4625, 85.8830)),
    ("Firozabad", LatLng::new(27.1591, 78.3957)),
    ("Kochi", LatLng::new(9.9312, 76.2673)),
    ("Nellore", LatLng::new(14.4426, 79.9865)),
    ("Bhavnagar", LatLng::new(21.7645, 72.1519)),
    ("Dehradun", LatLng::new(30.3165, 78.0322)),
    ("Durgapur", LatLng::new(23.5204, 87.3119)),
    ("Asansol", LatLng::new(23.6739, 86.9524)),
    ("Nanded", LatLng::new(19.1383, 77.3210)),
    ("Kolhapur", LatLng::new(16.7050, 74.2433)),
    ("Ajmer", LatLng::new(26.4499, 74.6399)),
    ("Gulbarga", LatLng::new(17.3297, 76.8343)),
    ("Jamnagar", LatLng::new(22.4707, 70.0577)),
    ("Ujjain", LatLng::new(23.1765, 75.7885)),
    ("Loni", LatLng::new(28.7524, 77.2917)),
    ("Siliguri", LatLng::new(26.7271, 88.3953)),
    ("Jhansi", LatLng::new(25.4484, 78.5685)),
    ("Ulhasnagar", LatLng::new(19.2215, 73.1645)),
    ("Jammu", LatLng::new(32.7266, 74.8570)),
    ("Sangli", LatLng::new(16.8524, 74.5815)),
    ("Mangalore", LatLng::new(12.9141, 74.8560)),
    ("Erode", LatLng::new(11.3410, 77.7172)),
    ("Belgaum", LatLng::new(15.8497, 74.4977)),
    ("Ambattur", LatLng::new(13.1143, 80.1548)),
    ("Tirunelveli", LatLng::new(8.7139, 77.7567)),
    ("Malegaon", LatLng::new(20.5579, 74.5089)),
    ("Gaya", LatLng::new(24.7914, 85.0002)),
    ("Jalgaon", LatLng::new(21.0077, 75.5626)),
    ("Udaipur", LatLng::new(24.5854, 73.7125)),
    ("Maheshtala", LatLng::new(22.5097, 88.2519)),
    ("Davanagere", LatLng::new(14.4644, 75.9218)),
    ("Kozhikode", LatLng::new(11.2588, 75.7804)),
    ("Akola", LatLng::new(20.7002, 77.0082)),
    ("Kurnool", LatLng::new(15.8281, 78.0373)),
    ("Bokaro", LatLng::new(23.6693, 86.1511)),
    ("Rajahmundry", LatLng::new(16.9891, 81.7841)),
    ("Ballari", LatLng::new(15.1394, 76.9214)),
    ("Agartala", LatLng::new(23.8315, 91.2868)),
    ("Bhagalpur", LatLng::new(25.2425, 87.0169)),
    ("Latur", LatLng::new(18.4088, 76.5604)),
    ("Dhule", LatLng::new(20.9042, 74.7749)),
    ("Rohtak", LatLng::new(28.8955, 76.6066)),
    ("Korba", LatLng::new(22.3595, 82.7501)),
    ("Bhilwara", LatLng::new(25.3407, 74.6313)),
    ("Brahmapur", LatLng::new(19.3150, 84.7941)),
    ("Muzaffarnagar", LatLng::new(29.4727, 77.7085)),
    ("Ahmednagar", LatLng::new(19.0948, 74.7480)),
    ("Mathura", LatLng::new(27.4924, 77.6737)),
    ("Kollam", LatLng::new(8.8932, 76.6141)),
    ("Avadi", LatLng::new(13.1067, 80.1010)),
    ("Kadapa", LatLng::new(14.4674, 78.8241)),
    ("Rajapur", LatLng::new(16.6500, 73.5333)),
    ("Anantapur", LatLng::new(14.6819, 77.6006)),
    ("Kamarhati", LatLng::new(22.6718, 88.3740)),
    ("Sambalpur", LatLng::new(21.4669, 83.9756)),
    ("Bilaspur", LatLng::new(22.0797, 82.1391)),
    ("Shahjahanpur", LatLng::new(27.8803, 79.9108)),
    ("Satara", LatLng::new(17.6805, 74.0183)),
    ("Bijapur", LatLng::new(16.8302, 75.7100)),
    ("Rampur", LatLng::new(28.8089, 79.0250)),
    ("Shivamogga", LatLng::new(13.9299, 75.5681)),
    ("Chandrapur", LatLng::new(19.9615, 79.2961)),
    ("Junagadh", LatLng::new(21.5222, 70.4579)),
    ("Thrissur", LatLng::new(10.5276, 76.2144)),
    ("Alwar", LatLng::new(27.5530, 76.6346)),
    ("Bardhaman", LatLng::new(23.2324, 87.8615)),
    ("Kulti", LatLng::new(23.7333, 86.8500)),
    ("Kakinada", LatLng::new(16.9891, 82.2475)),
    ("Nizamabad", LatLng::new(18.6725, 78.0940)),
    ("Parbhani", LatLng::new(19.2704, 76.7747)),
    ("Tumkur", LatLng::new(13.3409, 77.1010)),
    ("Hisar", LatLng::new(29.1492, 75.7217)),
    ("Ozhukarai", LatLng::new(11.9498, 79.7714)),
    ("Bihar Sharif", LatLng::new(25.1982, 85.5204)),
    ("Panipat", LatLng::new(29.3909, 76.9635)),
    ("Darbhanga", LatLng::new(26.1542, 85.8918)),
    ("Bally", LatLng::new(22.6500, 88.3400)),
    ("Aizawl", LatLng::new(23.7271, 92.7176)),
    ("Dewas", LatLng::new(22.9623, 76.0508)),
    ("Ichalkaranji", LatLng::new(16.6986, 74.4621)),
    ("Tiruppur", LatLng::new(11.1085, 77.3411)),
    ("Karnal", LatLng::new(29.6857, 76.9905)),
    ("Bathinda", LatLng::new(30.2070, 74.9519)),
    ("Jalna", LatLng::new(19.8347, 75.8816)),
    ("Eluru", LatLng::new(16.7107, 81.0952)),
    ("Barasat", LatLng::new(22.7236, 88.4803)),
    ("Kirari Suleman Nagar", LatLng::new(28.7676, 77.0593)),
    ("Purnia", LatLng::new(25.7771, 87.4753)),
    ("Satna", LatLng::new(24.6005, 80.8322)),
    ("Mau", LatLng::new(25.9419, 83.5612)),
    ("Sonipat", LatLng::new(28.9288, 77.0913)),
    ("Imphal", LatLng::new(24.8170, 93.9368)),];

/// State centroid coordinates, used when a city is unknown or missing from
/// [`CITY_COORDINATES`].
pub const STATE_COORDINATES: &[(&str, LatLng)] = &[
    ("Andhra Pradesh", LatLng::new(15.9129, 79.7400)),
    ("Arunachal Pradesh", LatLng::new(28.2180, 94.7278)),
    ("Assam", LatLng::new(26.2006, 92.9376)),
    ("Bihar", LatLng::new(25.0961, 85.3131)),
    ("Chhattisgarh", LatLng::new(21.2787, 81.8661)),
    ("Goa", LatLng::new(15.2993, 74.1240)),
    ("Gujarat", LatLng::new(22.2587, 71.1924)),
    ("Haryana", LatLng::new(29.0588, 76.0856)),
    ("Himachal Pradesh", LatLng::new(31.1048, 77.1734)),
    ("Jharkhand", LatLng::new(23.6102, 85.2799)),
    ("Karnataka", LatLng::new(15.3173, 75.7139)),
    ("Kerala", LatLng::new(10.8505, 76.2711)),
    ("Madhya Pradesh", LatLng::new(22.9734, 78.6569)),
    ("Maharashtra", LatLng::new(19.7515, 75.7139)),
    ("Manipur", LatLng::new(24.6637, 93.9063)),
    ("Meghalaya", LatLng::new(25.4670, 91.3662)),
    ("Mizoram", LatLng::new(23.1645, 92.9376)),
    ("Nagaland", LatLng::new(26.1584, 94.5624)),
    ("Odisha", LatLng::new(20.9517, 85.0985)),
    ("Punjab", LatLng::new(31.1471, 75.3412)),
    ("Rajasthan", LatLng::new(27.0238, 74.2179)),
    ("Sikkim", LatLng::new(27.5330, 88.5122)),
    ("Tamil Nadu", LatLng::new(11.1271, 78.6569)),
    ("Telangana", LatLng::new(18.1124, 79.0193)),
    ("Tripura", LatLng::new(23.9408, 91.9882)),
    ("Uttar Pradesh", LatLng::new(26.8467, 80.9462)),
    ("Uttarakhand", LatLng::new(30.0668, 79.0193)),
    ("West Bengal", LatLng::new(22.9868, 87.8550)),
    ("Jammu and Kashmir", LatLng::new(33.7782, 76.5762)),
    ("Delhi", LatLng::new(28.7041, 77.1025)),];

/// How precisely a record's location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPrecision {
    /// Resolved to a city centre.
    City,
    /// Resolved to a state centroid only.
    State,
}

impl LocationPrecision {
    /// Full width, in degrees, of the random spread applied around a
    /// location resolved at this precision.
    #[must_use]
    pub const fn jitter_span(self) -> f64 {
        match self {
            Self::City => 0.01,
            Self::State => 0.2,
        }
    }
}

/// A base coordinate resolved from a city/state pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    /// Un-jittered reference coordinate.
    pub base: LatLng,
    /// Which table produced the coordinate.
    pub precision: LocationPrecision,
}

struct LookupTable {
    exact: HashMap<&'static str, LatLng>,
    folded: HashMap<String, LatLng>,
}

impl LookupTable {
    fn new(entries: &'static [(&'static str, LatLng)]) -> Self {
        let mut exact = HashMap::with_capacity(entries.len());
        let mut folded = HashMap::with_capacity(entries.len());
        for (name, coords) in entries {
            exact.insert(*name, *coords);
            folded.entry(name.to_lowercase()).or_insert(*coords);
        }
        Self { exact, folded }
    }

    fn get(&self, name: &str) -> Option<LatLng> {
        self.exact
            .get(name)
            .or_else(|| self.folded.get(&name.trim().to_lowercase()))
            .copied()
    }
}

static CITIES: LazyLock<LookupTable> = LazyLock::new(|| LookupTable::new(CITY_COORDINATES));
static STATES: LazyLock<LookupTable> = LazyLock::new(|| LookupTable::new(STATE_COORDINATES));

/// Looks up a city centre, trying an exact match first and then a
/// case-insensitive one.
#[must_use]
pub fn city_coordinates(city: &str) -> Option<LatLng> {
    CITIES.get(city)
}

/// Looks up a state centroid, trying an exact match first and then a
/// case-insensitive one.
#[must_use]
pub fn state_coordinates(state: &str) -> Option<LatLng> {
    STATES.get(state)
}

/// Resolves a city/state pair to a base coordinate.
///
/// The city table wins when `city` is a known name; otherwise the state
/// centroid is used. Returns `None` when neither resolves, in which case the
/// record has no usable position.
#[must_use]
pub fn resolve(city: &str, state: &str) -> Option<ResolvedLocation> {
    let known_city = !city.trim().is_empty() && city.trim() != "Unknown";

    if known_city && let Some(base) = city_coordinates(city) {
        return Some(ResolvedLocation {
            base,
            precision: LocationPrecision::City,
        });
    }

    state_coordinates(state).map(|base| ResolvedLocation {
        base,
        precision: LocationPrecision::State,
    })
}
