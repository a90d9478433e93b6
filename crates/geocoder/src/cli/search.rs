use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use serde_json::json;

use geocoder_clients::Clients;
use geocoder_clients::nominatim::models::LocationResult;

#[derive(Debug, Clone, Parser)]
pub struct SearchCommand {
    /// Free-text queries - identical queries are only sent once
    #[arg(required = true)]
    pub queries: Vec<String>,
}

impl SearchCommand {
    pub async fn run(self, clients: &Clients, json: bool) -> Result<()> {
        let client = &clients.nominatim;
        let results = join_all(self.queries.iter().map(|query| client.search(query))).await;

        for (query, result) in self.queries.iter().zip(results) {
            let locations = result.with_context(|| format!("failed to search for '{query}'"))?;
            if json {
                let output = json!({ "query": query, "results": locations });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", format_locations(query, &locations));
            }
        }

        Ok(())
    }
}

fn format_locations(query: &str, locations: &[LocationResult]) -> String {
    let mut output = format!("{query}:");
    if locations.is_empty() {
        output.push_str("\n  No results");
    }
    for (index, location) in locations.iter().enumerate() {
        output.push_str(&format!(
            "\n  {}. {} ({}, {})",
            index + 1,
            location.display_name,
            location.lat,
            location.lon
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbered_list() {
        let locations: Vec<LocationResult> = serde_json::from_str(
            r#"[
                { "display_name": "Islamabad, Pakistan", "lat": "33.69", "lon": "73.06" },
                { "display_name": "Islamabad Expressway", "lat": "33.7", "lon": "73.1" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            format_locations("Islamabad", &locations),
            "Islamabad:\n  1. Islamabad, Pakistan (33.69, 73.06)\n  2. Islamabad Expressway (33.7, 73.1)"
        );
    }

    #[test]
    fn formats_empty_results() {
        assert_eq!(format_locations("xy", &[]), "xy:\n  No results");
    }
}
