//! seed — one-shot platform provisioning.
//!
//! Creates the coordinate zone, the warehouse fences, and every location
//! provider, then creates the product trackables (stock-count copies each)
//! and places them at their storage racks.  The platform-assigned zone and
//! fence ids are persisted into the data directory (`zone.json`,
//! `fences.json`) for the orchestrator and the seed-table loader.
//!
//! Usage: `seed [config.toml]`.  Run `reset` first to clear old trackables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use yard_core::OrchestratorConfig;
use yard_hub::{
    Fence, HubClient, LocationOptions, Positioning, Provider, Trackable, TrackableProperties,
    Zone, location_update,
};
use yard_routes::{SeedTables, load_tables};

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

    // ── Zone ──────────────────────────────────────────────────────────────
    let zone = client
        .create_zone(&warehouse_zone())
        .await
        .context("creating the coordinate zone")?;
    std::fs::write(
        config.data_dir.join("zone.json"),
        serde_json::to_string_pretty(&zone)?,
    )?;
    info!(zone = %zone.id, "zone registered");

    // ── Fences ────────────────────────────────────────────────────────────
    let mut created_fences = Vec::new();
    for fence in warehouse_fences() {
        let created = client
            .create_fence(&fence)
            .await
            .with_context(|| format!("creating fence {}", fence.name))?;
        info!(fence = %created.id, name = %created.name, "fence created");
        created_fences.push(created);
    }
    std::fs::write(
        config.data_dir.join("fences.json"),
        serde_json::to_string_pretty(&created_fences)?,
    )?;

    // ── Providers and products (from the seed tables) ─────────────────────
    let tables = load_tables(&config.data_dir)
        .with_context(|| format!("loading seed tables from {}", config.data_dir.display()))?;

    for provider in providers_for(&tables) {
        client
            .create_provider(&provider)
            .await
            .with_context(|| format!("creating provider {}", provider.id))?;
        info!(provider = %provider.id, name = %provider.name, "provider created");
    }

    // Product trackables, racked and ready for picking.  Placement goes
    // over the push channel, like every other movement in the system.
    let channel = yard_hub::connect(&config.ws_url)
        .await
        .context("connecting to the platform push channel")?;

    for product in &tables.products {
        let Some(rack) = product.storage_route.last().copied() else {
            continue;
        };
        for copy in 0..product.stock {
            let trackable = Trackable {
                kind: "omlox".to_owned(),
                radius: Some(0.5),
                location_providers: vec![product.provider_id.clone()],
                properties: TrackableProperties {
                    product: Some(product.name.clone()),
                    barcode: Some(product.barcode.clone()),
                    storage_place: Some(json!(true)),
                    ..TrackableProperties::default()
                },
                ..Trackable::default()
            };
            let created = client.create_trackable(&trackable).await?;
            info!(product = %created.id, barcode = %product.barcode, copy, "product created");
        }
        channel.locations.send(location_update(
            rack,
            product.provider_id.clone(),
            &LocationOptions::local_zone(&tables.zone_id),
        ));
    }

    // Give the writer task a moment to flush the placements.
    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    info!("seeding complete");
    Ok(())
}

/// The UWB zone: ground-control points mapping the local 100 m × 200 m
/// hall grid onto WGS-84.
fn warehouse_zone() -> Zone {
    Zone {
        id: String::new(),
        ground_control_points: vec![
            [8.674605503102864, 49.41712227384992],
            [0.0, 0.0],
            [8.675984252227366, 49.41712614613228],
            [100.0, 0.0],
            [8.675972405760728, 49.41892510943864],
            [100.0, 200.0],
            [8.674593606239739, 49.4189212369118],
            [0.0, 200.0],
        ],
        kind: "uwb".to_owned(),
        floor: 0,
        need_transformation: true,
        name: "Warehouse Hall UWB".to_owned(),
        extra: serde_json::Map::new(),
    }
}

/// The warehouse fences, in the index order `ramps.json` relies on:
/// 0 = loading ramp, 1 = production area, 2 = shipping ramp, 3 = storage.
fn warehouse_fences() -> Vec<Fence> {
    let polygon = |coordinates: serde_json::Value| {
        Some(json!({"type": "Polygon", "coordinates": [coordinates]}))
    };

    vec![
        Fence {
            name: "Loading Ramp 1".to_owned(),
            region: polygon(json!([
                [8.675219484517527, 49.41717852643718, 0],
                [8.675259202879204, 49.41717881225491, 0],
                [8.675259538155615, 49.41712402501173, 0],
                [8.675219652155704, 49.417123915955166, 0],
                [8.675219484517527, 49.41717852643718, 0]
            ])),
            crs: Some("EPSG:4326".to_owned()),
            elevation_ref: Some("floor".to_owned()),
            ..Fence::default()
        },
        Fence {
            name: "Finished Products".to_owned(),
            region: polygon(json!([
                [8.675234403469858, 49.41812130527984, 0],
                [8.675899910072332, 49.41812531393424, 0],
                [8.675902991121347, 49.41804113212086, 0],
                [8.675231322420842, 49.41804514078239, 0],
                [8.675234403469858, 49.41812130527984, 0]
            ])),
            properties: Some(json!({"isProductionArea": true})),
            crs: Some("EPSG:4326".to_owned()),
            elevation_ref: Some("floor".to_owned()),
            ..Fence::default()
        },
        Fence {
            name: "Shipping Ramp 1".to_owned(),
            region: polygon(json!([
                [8.675055963013817, 49.41735035221655, 0],
                [8.675095681375494, 49.41735063803428, 0],
                [8.675096016651905, 49.4172958507911, 0],
                [8.675056130651994, 49.41729574173454, 0],
                [8.675055963013817, 49.41735035221655, 0]
            ])),
            crs: Some("EPSG:4326".to_owned()),
            elevation_ref: Some("floor".to_owned()),
            ..Fence::default()
        },
        Fence {
            name: "Storage Place 1".to_owned(),
            region: polygon(json!([
                [8.675311176776886, 49.41862119573682, 0],
                [8.675713305349954, 49.41862361916911, 0],
                [8.675715167732531, 49.41857273248113, 0],
                [8.675313039159464, 49.41857030904884, 0],
                [8.675311176776886, 49.41862119573682, 0]
            ])),
            properties: Some(json!({"storage_place": true})),
            crs: Some("EPSG:4326".to_owned()),
            elevation_ref: Some("floor".to_owned()),
            ..Fence::default()
        },
    ]
}

/// Every location provider the tables reference: the trucks (GPS), both
/// forklift groups, and the product tags (UWB).
fn providers_for(tables: &SeedTables) -> Vec<Provider> {
    let mut providers = Vec::new();

    for ramp in &tables.ramps {
        providers.push(Provider {
            id: ramp.provider_id.clone(),
            kind: "gps".to_owned(),
            name: format!("Truck {}", ramp.truck_id),
        });
        providers.push(Provider {
            id: ramp.loading_forklift.clone(),
            kind: "uwb".to_owned(),
            name: format!("Loading Forklift ({})", ramp.truck_id),
        });
    }
    for (index, forklift) in tables.pick_forklifts.iter().enumerate() {
        providers.push(Provider {
            id: forklift.clone(),
            kind: "uwb".to_owned(),
            name: format!("Pick Forklift {}", index + 1),
        });
    }
    for product in &tables.products {
        providers.push(Provider {
            id: product.provider_id.clone(),
            kind: "uwb".to_owned(),
            name: product.name.clone(),
        });
    }

    providers
}
