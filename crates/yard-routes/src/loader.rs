//! JSON seed-file loader.
//!
//! # Data directory layout
//!
//! | File             | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | `ramps.json`     | ramp records; route fields name coordinate files  |
//! | `products.json`  | product catalog; `route` names a coordinate file  |
//! | `forklifts.json` | provider ids of the shared pick-forklift pool     |
//! | `fences.json`    | platform fence docs (written by the seed binary)  |
//! | `zone.json`      | the coordinate zone (written by the seed binary)  |
//! | `*.json` routes  | bare arrays of `[x, y]` coordinate pairs          |
//!
//! Route files are referenced by name and resolved relative to the data
//! directory.  Fence ids are assigned by the platform when the seed binary
//! creates the fences, so `ramps.json` references fences by INDEX into
//! `fences.json` rather than by id.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use yard_core::{Barcode, Coord, FenceId, ProviderId};

use crate::error::{RouteError, RouteResult};
use crate::table::{ProductSpec, RampConfig, RouteTable};

// ── Seed records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RampRecord {
    truck_id: String,
    provider_id: ProviderId,
    outbound_route: String,
    return_route: String,
    /// Index into `fences.json`.
    loading_ramp: usize,
    /// Index into `fences.json`.
    shipping_ramp: usize,
    product_routes: HashMap<Barcode, String>,
    loading_forklift: ProviderId,
    staging_point: Coord,
}

/// The slice of a platform fence document the loader needs.
#[derive(Deserialize)]
struct FenceRecord {
    id: FenceId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    provider_id: ProviderId,
    name: String,
    barcode: Barcode,
    route: String,
    #[serde(default = "default_stock")]
    count: u32,
}

fn default_stock() -> u32 {
    1
}

#[derive(Deserialize)]
struct ZoneRecord {
    id: String,
}

/// The seed tables as loaded from disk, before the platform-discovered
/// storage fences are folded in.
#[derive(Debug)]
pub struct SeedTables {
    pub ramps: Vec<RampConfig>,
    pub products: Vec<ProductSpec>,
    pub pick_forklifts: Vec<ProviderId>,
    pub zone_id: String,
}

impl SeedTables {
    /// Freeze into a [`RouteTable`] together with the storage fences
    /// discovered on the platform at startup.
    pub fn into_table(self, storage_fences: Vec<FenceId>) -> RouteTable {
        RouteTable {
            ramps: self.ramps,
            products: self.products,
            pick_forklifts: self.pick_forklifts,
            storage_fences,
            zone_id: self.zone_id,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load all seed tables from `dir`.
pub fn load_tables(dir: &Path) -> RouteResult<SeedTables> {
    let ramp_records: Vec<RampRecord> = load_json(&dir.join("ramps.json"))?;
    let product_records: Vec<ProductRecord> = load_json(&dir.join("products.json"))?;
    let pick_forklifts: Vec<ProviderId> = load_json(&dir.join("forklifts.json"))?;
    let fences: Vec<FenceRecord> = load_json(&dir.join("fences.json"))?;
    let zone: ZoneRecord = load_json(&dir.join("zone.json"))?;

    let fence_id = |truck_id: &str, index: usize| -> RouteResult<FenceId> {
        fences
            .get(index)
            .map(|f| f.id.clone())
            .ok_or_else(|| RouteError::FenceIndex {
                truck_id: truck_id.to_owned(),
                index,
                count: fences.len(),
            })
    };

    let mut ramps = Vec::with_capacity(ramp_records.len());
    for record in ramp_records {
        let mut product_routes = HashMap::with_capacity(record.product_routes.len());
        for (barcode, file) in record.product_routes {
            product_routes.insert(barcode, load_route(dir, &file)?);
        }
        ramps.push(RampConfig {
            loading_ramp: fence_id(&record.truck_id, record.loading_ramp)?,
            shipping_ramp: fence_id(&record.truck_id, record.shipping_ramp)?,
            truck_id: record.truck_id,
            provider_id: record.provider_id,
            outbound_route: load_route(dir, &record.outbound_route)?,
            return_route: load_route(dir, &record.return_route)?,
            product_routes,
            loading_forklift: record.loading_forklift,
            staging_point: record.staging_point,
        });
    }

    let mut products = Vec::with_capacity(product_records.len());
    for record in product_records {
        products.push(ProductSpec {
            provider_id: record.provider_id,
            name: record.name,
            barcode: record.barcode,
            storage_route: load_route(dir, &record.route)?,
            stock: record.count,
        });
    }

    Ok(SeedTables {
        ramps,
        products,
        pick_forklifts,
        zone_id: zone.id,
    })
}

/// A route file: a bare JSON array of coordinate pairs.
fn load_route(dir: &Path, file: &str) -> RouteResult<Vec<Coord>> {
    load_json(&dir.join(file))
}

fn load_json<T: DeserializeOwned>(path: &Path) -> RouteResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| RouteError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| RouteError::Json {
        path: path.to_owned(),
        source,
    })
}
