//! City catalogue and geolocation suggestions.
//!
//! Deriving a room from coordinates is deliberately kept outside the relay
//! core: this module only turns a position into candidate city identifiers
//! the UI can offer, and lists the circles available per city.

/// Known city centres: identifier, latitude, longitude.
const CITY_CENTERS: &[(&str, f64, f64)] = &[
    ("konigsbrunn", 48.268, 10.889),
    ("munich", 48.137, 11.575),
    ("augsburg", 48.371, 10.898),
    ("new_york", 40.7128, -74.0060),
];

/// Circles offered per city.
const CITY_CIRCLES: &[(&str, &[&str])] = &[
    ("konigsbrunn", &["18-25", "25-35", "35-50", "50+"]),
    ("munich", &["18-30", "30-45", "45-60", "60+"]),
    ("augsburg", &["18-30", "30-45", "45-60"]),
    ("new_york", &["18-25", "25-40", "40+"]),
];

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The `n` known cities closest to the given coordinates, nearest first.
pub fn nearest_cities(lat: f64, lon: f64, n: usize) -> Vec<(&'static str, f64)> {
    let mut distances: Vec<(&'static str, f64)> = CITY_CENTERS
        .iter()
        .map(|(city, city_lat, city_lon)| (*city, haversine_km(lat, lon, *city_lat, *city_lon)))
        .collect();
    distances.sort_by(|a, b| a.1.total_cmp(&b.1));
    distances.truncate(n);
    distances
}

/// All known city identifiers.
pub fn cities() -> Vec<&'static str> {
    CITY_CENTERS.iter().map(|(city, _, _)| *city).collect()
}

/// Circles for a city; empty when the city is unknown.
pub fn circles_for(city: &str) -> &'static [&'static str] {
    CITY_CIRCLES
        .iter()
        .find(|(candidate, _)| *candidate == city)
        .map(|(_, circles)| *circles)
        .unwrap_or(&[])
}
