use anyhow::{Context, Result};
use clap::Parser;

use geocoder_clients::Clients;

#[derive(Debug, Clone, Parser)]
#[command(allow_negative_numbers = true)]
pub struct ReverseCommand {
    pub lat: f64,
    pub lng: f64,
}

impl ReverseCommand {
    pub async fn run(self, clients: &Clients, json: bool) -> Result<()> {
        let (lat, lng) = (self.lat, self.lng);

        if json {
            let result = clients
                .nominatim
                .reverse_lookup(lat, lng)
                .await
                .with_context(|| format!("failed to look up address for ({lat}, {lng})"))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            let address = clients
                .nominatim
                .reverse_geocode(lat, lng)
                .await
                .with_context(|| format!("failed to look up address for ({lat}, {lng})"))?;
            println!("{}", address.as_deref().unwrap_or("No address found"));
        }

        Ok(())
    }
}
