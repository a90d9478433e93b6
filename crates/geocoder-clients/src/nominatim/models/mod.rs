use serde::{Deserialize, Deserializer};

mod location;
mod reverse;

pub use self::location::LocationResult;
pub use self::reverse::ReverseResult;

/**
    Nominatim sends coordinates as strings, but some compatible
    servers send plain numbers - accept both and keep the text.
*/
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
