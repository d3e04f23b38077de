//! Runtime configuration.
//!
//! Loaded from a TOML file by the application binary and passed into the
//! scheduler.  Everything has a default except the seed-data directory, so
//! a minimal config is just `data_dir = "demos/warehouse/data"`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CoreError, CoreResult};

/// Target tick period of the scheduler loop, in milliseconds.
pub const DEFAULT_TICK_MILLIS: u64 = 100;

/// Top-level orchestrator configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct OrchestratorConfig {
    /// Base URL of the positioning platform's REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// WebSocket URL of the platform's push channel.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// Scheduler tick period in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// RNG seed for order generation.  `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Directory holding the static seed tables (ramps, products, routes).
    pub data_dir: PathBuf,
}

impl OrchestratorConfig {
    /// Load from a TOML file.
    pub fn from_toml_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: OrchestratorConfig = toml::from_str(&text)?;
        if config.tick_millis == 0 {
            return Err(CoreError::Config("tick_millis must be > 0".into()));
        }
        Ok(config)
    }
}

fn default_base_url() -> String {
    "http://localhost:8081/deephub/v1".to_owned()
}

fn default_ws_url() -> String {
    "ws://localhost:8081/deephub/v1/ws/socket".to_owned()
}

fn default_tick_millis() -> u64 {
    DEFAULT_TICK_MILLIS
}
