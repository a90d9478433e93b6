use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use super::string_or_number;

/**
    A single candidate location returned from a place search.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    #[serde(default)]
    pub place_id: Option<u64>,
    pub display_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub lat: String,
    #[serde(deserialize_with = "string_or_number")]
    pub lon: String,
    #[serde(default, rename = "class")]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default)]
    pub address: BTreeMap<String, String>,
    #[serde(default)]
    pub extratags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub boundingbox: Vec<String>,
}

impl LocationResult {
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.lat.trim().parse().ok()
    }

    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.lon.trim().parse().ok()
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude()?, self.longitude()?))
    }

    /**
        Parses a search response body into a list of locations.

        Anything other than a JSON array, including bodies that are not
        JSON at all, is treated as an empty list. Array items that do
        not look like locations are skipped.
    */
    #[must_use]
    pub fn list_from_json(bytes: &[u8]) -> Vec<Self> {
        let items = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                trace!("Search response was not a list, treating as empty");
                return Vec::new();
            }
            Err(e) => {
                trace!("Search response was not valid JSON ({e}), treating as empty");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(location) => Some(location),
                Err(e) => {
                    trace!("Skipping malformed search result: {e}");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISLAMABAD: &str = r#"[
        {
            "place_id": 1234,
            "licence": "Data © OpenStreetMap contributors",
            "osm_type": "relation",
            "lat": "33.6938118",
            "lon": "73.0651511",
            "class": "boundary",
            "type": "administrative",
            "importance": 0.71,
            "display_name": "Islamabad, Islamabad Capital Territory, Pakistan",
            "address": { "city": "Islamabad", "country": "Pakistan", "country_code": "pk" },
            "extratags": { "wikidata": "Q1362" },
            "boundingbox": ["33.4", "33.9", "72.8", "73.4"]
        }
    ]"#;

    #[test]
    fn parses_search_results() {
        let list = LocationResult::list_from_json(ISLAMABAD.as_bytes());
        assert_eq!(list.len(), 1);

        let first = &list[0];
        assert_eq!(first.place_id, Some(1234));
        assert_eq!(first.category.as_deref(), Some("boundary"));
        assert_eq!(first.kind.as_deref(), Some("administrative"));
        assert_eq!(first.address.get("country_code").map(String::as_str), Some("pk"));
        assert_eq!(first.coordinates(), Some((33.693_811_8, 73.065_151_1)));
    }

    #[test]
    fn accepts_numeric_coordinates() {
        let body = r#"[{ "display_name": "X", "lat": 1.5, "lon": -2 }]"#;
        let list = LocationResult::list_from_json(body.as_bytes());
        assert_eq!(list[0].lat, "1.5");
        assert_eq!(list[0].lon, "-2");
        assert_eq!(list[0].coordinates(), Some((1.5, -2.0)));
    }

    #[test]
    fn non_list_bodies_are_empty() {
        let body = br#"{ "error": "something went wrong" }"#;
        assert!(LocationResult::list_from_json(body).is_empty());
        assert!(LocationResult::list_from_json(b"null").is_empty());
    }

    #[test]
    fn malformed_items_are_skipped() {
        let body = r#"[{ "display_name": "ok", "lat": "1", "lon": "2" }, { "lat": "3" }, 7]"#;
        let list = LocationResult::list_from_json(body.as_bytes());
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].display_name, "ok");
    }

    #[test]
    fn invalid_json_is_empty() {
        assert!(LocationResult::list_from_json(b"<html>Service Unavailable</html>").is_empty());
        assert!(LocationResult::list_from_json(b"").is_empty());
    }
}
