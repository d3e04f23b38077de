//! Candidate selection and hand-off route sampling.
//!
//! First match wins, no backtracking: jobs are fungible within a barcode
//! class, so the system needs liveness (every pending job eventually
//! matched) and safety (no double reservation), not optimal assignment.

use std::collections::VecDeque;

use yard_core::{Barcode, Coord};
use yard_hub::Trackable;

use crate::job::PendingPickJob;

/// Number of equal-length segments a hand-off route is sampled into
/// (producing `HANDOFF_STEPS + 1` coordinates).
pub const HANDOFF_STEPS: usize = 8;

// ── Pick matching ─────────────────────────────────────────────────────────────

/// First in-store, unreserved product with `barcode`.
///
/// The snapshot may be stale — the caller must confirm with a re-read
/// before reserving.
pub fn find_unreserved<'a>(store: &'a [Trackable], barcode: &Barcode) -> Option<&'a Trackable> {
    store.iter().find(|product| {
        product.properties.reserve.is_none() && product.properties.barcode.as_ref() == Some(barcode)
    })
}

/// Scan pending jobs in FIFO order; return the first `(job index, product)`
/// pair for which the store snapshot has an unreserved product.
pub fn pick_candidate<'a>(
    pending: &VecDeque<PendingPickJob>,
    store: &'a [Trackable],
) -> Option<(usize, &'a Trackable)> {
    pending
        .iter()
        .enumerate()
        .find_map(|(index, job)| find_unreserved(store, &job.barcode).map(|p| (index, p)))
}

// ── Delivery matching ─────────────────────────────────────────────────────────

/// Scan waiting trucks × waiting products in truck-then-product order;
/// return the first `(truck index, product index)` where the product's
/// reservation names the truck's order AND the product's barcode is among
/// the truck's requested products.
pub fn delivery_candidate(trucks: &[Trackable], products: &[Trackable]) -> Option<(usize, usize)> {
    for (truck_index, truck) in trucks.iter().enumerate() {
        let Some(order_number) = truck.properties.order_number.as_deref() else {
            continue;
        };
        let Some(requested) = truck.properties.requested_products.as_ref() else {
            continue;
        };

        for (product_index, product) in products.iter().enumerate() {
            let reserved_for = product
                .properties
                .reserve
                .as_ref()
                .map(|r| r.order_number.as_str());
            let barcode_requested = product
                .properties
                .barcode
                .as_ref()
                .is_some_and(|b| requested.contains(b));

            if reserved_for == Some(order_number) && barcode_requested {
                return Some((truck_index, product_index));
            }
        }
    }
    None
}

// ── Hand-off route ────────────────────────────────────────────────────────────

/// Straight-line route from the forklift staging point to the product's
/// storage-route origin, sampled into [`HANDOFF_STEPS`] equal-length steps
/// (9 coordinates, endpoints included).
pub fn handoff_route(staging: Coord, dest: Coord) -> Vec<Coord> {
    (0..=HANDOFF_STEPS)
        .map(|i| staging.lerp(dest, i as f64 / HANDOFF_STEPS as f64))
        .collect()
}
