use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::string_or_number;

/**
    The resolved address for a coordinate.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseResult {
    pub place_id: Option<u64>,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    pub address: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    place_id: Option<u64>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    lat: String,
    #[serde(default, deserialize_with = "string_or_number")]
    lon: String,
    #[serde(default)]
    address: BTreeMap<String, String>,
    #[serde(default)]
    error: Option<String>,
}

impl ReverseResult {
    /**
        Parses a reverse lookup response body.

        Returns `None` if the provider could not find an address for the
        coordinate, which it reports as a successful response carrying
        an `error` field, or as a response without a display name.
    */
    #[allow(clippy::missing_errors_doc)]
    pub fn try_from_json(bytes: &[u8]) -> Result<Option<Self>, serde_json::Error> {
        let response: ReverseResponse = serde_json::from_slice(bytes)?;
        if response.error.is_some() {
            return Ok(None);
        }

        Ok(response
            .display_name
            .filter(|name| !name.trim().is_empty())
            .map(|display_name| Self {
                place_id: response.place_id,
                display_name,
                lat: response.lat,
                lon: response.lon,
                address: response.address,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address() {
        let body = r#"{
            "place_id": 99,
            "lat": "33.68442",
            "lon": "73.04789",
            "display_name": "Jinnah Avenue, Blue Area, Islamabad, Pakistan",
            "address": { "road": "Jinnah Avenue", "city": "Islamabad" }
        }"#;

        let result = ReverseResult::try_from_json(body.as_bytes()).unwrap().unwrap();
        assert_eq!(result.display_name, "Jinnah Avenue, Blue Area, Islamabad, Pakistan");
        assert_eq!(result.address.get("road").map(String::as_str), Some("Jinnah Avenue"));
        assert_eq!(result.place_id, Some(99));
    }

    #[test]
    fn unable_to_geocode_is_none() {
        let body = br#"{ "error": "Unable to geocode" }"#;
        assert_eq!(ReverseResult::try_from_json(body).unwrap(), None);
    }

    #[test]
    fn empty_display_name_is_none() {
        let body = br#"{ "display_name": "  " }"#;
        assert_eq!(ReverseResult::try_from_json(body).unwrap(), None);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(ReverseResult::try_from_json(b"[").is_err());
    }
}
