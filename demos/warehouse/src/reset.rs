//! reset — bulk-delete every trackable on the platform.
//!
//! Usage: `reset [config.toml]`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use yard_core::OrchestratorConfig;
use yard_hub::HubClient;

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

    let client = HubClient::new(config.base_url.clone())?;
    client
        .delete_all_trackables()
        .await
        .context("deleting trackables")?;

    info!("all trackables deleted");
    Ok(())
}
