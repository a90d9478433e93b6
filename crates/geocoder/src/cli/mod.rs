use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use geocoder_clients::{Clients, NominatimConfig};

mod reverse;
mod search;

use self::reverse::ReverseCommand;
use self::search::SearchCommand;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Look up places and addresses using Nominatim")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: CliSubcommand,
    #[command(flatten)]
    pub options: ClientOptions,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliSubcommand {
    /// Search for places matching one or more queries
    Search(SearchCommand),
    /// Find the address of a coordinate
    Reverse(ReverseCommand),
}

#[derive(Debug, Clone, Args)]
pub struct ClientOptions {
    #[arg(long, global = true, env = "GEOCODER_BASE_URL")]
    pub base_url: Option<String>,
    #[arg(long, global = true, env = "GEOCODER_USER_AGENT")]
    pub user_agent: Option<String>,
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Print cache statistics to stderr when done
    #[arg(long, global = true)]
    pub stats: bool,
}

impl ClientOptions {
    pub fn config(&self) -> NominatimConfig {
        let mut config = NominatimConfig::default();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.options.config();
        debug!(
            "Parsed arguments\n\tbase url: {}\n\ttimeout: {:?}",
            config.base_url, config.request_timeout
        );

        let clients = Clients::with_nominatim_config(config);

        match self.subcommand {
            CliSubcommand::Search(cmd) => cmd.run(&clients, self.options.json).await?,
            CliSubcommand::Reverse(cmd) => cmd.run(&clients, self.options.json).await?,
        }

        if self.options.stats {
            eprintln!("{}", clients.nominatim.cache_stats());
        }

        Ok(())
    }
}
