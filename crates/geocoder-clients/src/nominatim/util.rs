use super::consts::COORDINATE_DECIMALS;

/**
    Normalizes a search query into a cache key:
    surrounding whitespace is trimmed, and the rest lowercased.
*/
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/**
    Rounds a coordinate to 4 decimal places, about 11 meters.
*/
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    // adding zero turns -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

/**
    Creates a cache key for a coordinate pair, so that any two
    coordinates that round to the same values share a key.
*/
pub fn coordinate_key(lat: f64, lng: f64) -> String {
    let lat = round_coordinate(lat);
    let lng = round_coordinate(lng);
    format!("{lat:.4},{lng:.4}")
}
