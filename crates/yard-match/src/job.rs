//! Tagged job records, one per protocol step.
//!
//! Each record carries only the fields its protocol step needs; job state
//! never lives in ad-hoc property bags.  A job's forklift provider id is
//! owned by exactly one record (or the idle pool) at any time.

use yard_agent::ForkliftMachine;
use yard_core::{Barcode, Coord, ProviderId};
use yard_hub::Trackable;

/// A recorded need for a forklift to fetch one product for one order.
///
/// Created when a truck's order trackable arrives at a loading ramp (one
/// job per requested barcode with a known storage route); consumed when a
/// pick forklift becomes available.
#[derive(Clone, Debug)]
pub struct PendingPickJob {
    /// The truck's virtual order trackable (snapshot from arrival time).
    pub order: Trackable,

    pub barcode: Barcode,

    /// Storage route for this barcode at the order's loading ramp.
    pub route: Vec<Coord>,
}

/// A pick in progress: an assigned forklift fetching a product from
/// storage and bringing it to the shipping area.
#[derive(Debug)]
pub struct ActivePickJob {
    pub job: PendingPickJob,

    /// The reserved product (refreshed after each write-back).
    pub product: Trackable,

    pub forklift: ProviderId,

    pub machine: ForkliftMachine,
}

/// A truck-loading run in progress: the ramp's loading forklift carrying a
/// waiting product from the shipping area to the waiting truck.
///
/// Destroyed once the product is recorded in the order's `loadedProducts`
/// and its trackable deleted.
#[derive(Debug)]
pub struct ActiveDeliveryJob {
    /// The truck's order trackable (refreshed when the job was created).
    pub truck: Trackable,

    pub product: Trackable,

    pub forklift: ProviderId,

    /// Sampled hand-off route from the forklift staging point to the
    /// product's storage-route origin.
    pub route: Vec<Coord>,

    pub machine: ForkliftMachine,
}
