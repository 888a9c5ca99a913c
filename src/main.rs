//! hcloud-dyndns server binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hcloud_dyndns::batch::Orchestrator;
use hcloud_dyndns::config::Config;
use hcloud_dyndns::hetzner::HetznerClient;
use hcloud_dyndns::server::{self, AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

//==============================================================================
// Main
//==============================================================================

#[derive(Debug, Parser)]
#[command(name = "hcloud-dyndns")]
#[command(version = VERSION)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config).context("Config load failed")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "hcloud-dyndns {} starting (api: {}, ttl: {}s, concurrency: {})",
        VERSION, config.api_base, config.record_ttl, config.max_concurrency
    );

    let client = HetznerClient::new(&config.api_base, config.timeout)
        .context("Hetzner client failed")?;

    let orchestrator =
        Orchestrator::new(Arc::new(client), config.record_ttl, config.max_concurrency);

    server::serve(config.listen_addr, AppState::new(orchestrator)).await
}
