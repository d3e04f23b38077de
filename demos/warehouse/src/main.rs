//! warehouse — the orchestrator daemon.
//!
//! Loads the seed tables, discovers the storage fences on the platform,
//! connects the push channel, and runs the scheduler loop until the
//! process is stopped.
//!
//! Usage: `warehouse [config.toml]` (defaults to `warehouse.toml` next to
//! the data directory).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use yard_core::{OrchestratorConfig, SimRng};
use yard_hub::{HubClient, Positioning};
use yard_routes::load_tables;
use yard_sim::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/warehouse/warehouse.toml".to_owned())
        .into();
    let config = OrchestratorConfig::from_toml_path(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let tables = load_tables(&config.data_dir)
        .with_context(|| format!("loading seed tables from {}", config.data_dir.display()))?;

    let client = HubClient::new(config.base_url.clone())?;

    // Storage fences are discovered once and frozen into the route table;
    // fence roles stay static for the process lifetime.
    let storage_fences: Vec<_> = client
        .all_fences()
        .await
        .context("querying fences from the platform")?
        .into_iter()
        .filter(|fence| fence.is_storage_place())
        .map(|fence| fence.id)
        .collect();
    info!(count = storage_fences.len(), "discovered storage fences");

    let table = tables.into_table(storage_fences);

    let channel = yard_hub::connect(&config.ws_url)
        .await
        .context("connecting to the platform push channel")?;

    let rng = match config.seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };

    info!(
        ramps = table.ramps.len(),
        products = table.products.len(),
        tick_millis = config.tick_millis,
        "starting scheduler loop"
    );
    let scheduler = Scheduler::new(
        client,
        table,
        channel.fences,
        channel.locations,
        rng,
        Duration::from_millis(config.tick_millis),
    );
    scheduler.run().await;
    Ok(())
}
