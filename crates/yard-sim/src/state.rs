//! The mutable world state owned by the scheduler.
//!
//! Every collection that the original deployment kept in script-global
//! arrays lives here as an explicitly owned field.  Nothing outside the
//! scheduler holds a reference across ticks; agents are always looked up
//! through their owning collection.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::info;

use yard_agent::TruckMachine;
use yard_core::{Barcode, ProviderId, SimRng, TrackableId};
use yard_hub::Trackable;
use yard_match::{ActiveDeliveryJob, ActivePickJob, PendingPickJob};
use yard_routes::{RampConfig, RouteTable};

/// Smallest and largest randomized order size, inclusive.
pub const ORDER_SIZE: std::ops::RangeInclusive<usize> = 4..=6;

// ── ActiveTruck ───────────────────────────────────────────────────────────────

/// A truck currently driving or waiting at its ramp.
#[derive(Debug)]
pub struct ActiveTruck {
    /// The dock this truck serves — carries both route legs and fence ids.
    pub ramp: RampConfig,

    /// Barcodes requested for this trip.
    pub requested: Vec<Barcode>,

    pub machine: TruckMachine,

    /// Derived from the order trackable by the transiting-product poll;
    /// unblocks the RETURN phase.
    pub fully_loaded: bool,

    /// The virtual order trackable, created on facility entry and deleted
    /// on departure.
    pub order: Option<Trackable>,
}

// ── WarehouseState ────────────────────────────────────────────────────────────

/// All mutable queues and pools, keyed by the ids of their members.
pub struct WarehouseState {
    /// Inactive trucks, ready for (re-)admission.
    pub idle_trucks: VecDeque<RampConfig>,

    /// Trucks on route or waiting to be loaded.
    pub trucks: Vec<ActiveTruck>,

    /// Product trackables last seen entering a loading ramp; their deletion
    /// is the "loaded onto the truck" confirmation.
    pub transiting: Vec<TrackableId>,

    /// Pick jobs waiting for a forklift, FIFO.
    pub pending_jobs: VecDeque<PendingPickJob>,

    /// Picks in progress.
    pub picks: Vec<ActivePickJob>,

    /// Idle pick forklifts, FIFO.
    pub idle_forklifts: VecDeque<ProviderId>,

    /// Idle per-ramp loading forklifts.
    pub idle_loaders: FxHashSet<ProviderId>,

    /// Snapshot of unreserved products currently in storage.  Possibly
    /// stale; refreshed on storage-entry events and reservation conflicts.
    pub store: Vec<Trackable>,

    /// Order trackables of trucks waiting to be loaded.
    pub waiting_trucks: Vec<Trackable>,

    /// Product trackables staged at a shipping ramp.
    pub waiting_products: Vec<Trackable>,

    /// Truck-loading runs in progress.
    pub deliveries: Vec<ActiveDeliveryJob>,
}

impl WarehouseState {
    /// Fresh state: every truck inactive, every forklift idle, all queues
    /// empty.
    pub fn new(table: &RouteTable) -> Self {
        Self {
            idle_trucks: table.ramps.iter().cloned().collect(),
            trucks: Vec::new(),
            transiting: Vec::new(),
            pending_jobs: VecDeque::new(),
            picks: Vec::new(),
            idle_forklifts: table.pick_forklifts.iter().cloned().collect(),
            idle_loaders: table.ramps.iter().map(|r| r.loading_forklift.clone()).collect(),
            store: Vec::new(),
            waiting_trucks: Vec::new(),
            waiting_products: Vec::new(),
            deliveries: Vec::new(),
        }
    }

    /// Admit every inactive truck with a fresh randomized order.
    pub fn admit_trucks(&mut self, catalog: &[Barcode], rng: &mut SimRng) {
        while let Some(ramp) = self.idle_trucks.pop_front() {
            let requested = random_order(catalog, rng);
            info!(
                truck = %ramp.truck_id,
                order_size = requested.len(),
                "truck departing for the facility"
            );
            self.trucks.push(ActiveTruck {
                ramp,
                requested,
                machine: TruckMachine::new(),
                fully_loaded: false,
                order: None,
            });
        }
    }
}

/// A randomized requested-product list: 4–6 barcodes drawn uniformly (with
/// repetition) from the catalog.
pub fn random_order(catalog: &[Barcode], rng: &mut SimRng) -> Vec<Barcode> {
    let size = rng.gen_range(ORDER_SIZE);
    (0..size).filter_map(|_| rng.choose(catalog).cloned()).collect()
}
