//! The effectful halves of the two matching procedures.
//!
//! `yard-match` selects candidates from snapshots; this module runs the
//! platform protocol around them — the confirming re-read, the reservation
//! write, the queue surgery.  Both functions assign AT MOST one job per
//! invocation so each tick's mutation volume stays bounded.

use tracing::{info, warn};

use yard_agent::ForkliftMachine;
use yard_hub::{Positioning, Reservation};
use yard_match::{ActiveDeliveryJob, ActivePickJob, delivery_candidate, find_unreserved, handoff_route};
use yard_routes::RouteTable;

use crate::error::SimResult;
use crate::events::refresh_store;
use crate::state::WarehouseState;

// ── Pick matching ─────────────────────────────────────────────────────────────

/// Try to assign one idle pick forklift to one pending job.
///
/// Scans pending jobs FIFO.  The store snapshot may be stale, so every
/// candidate is re-read before reserving; a conflict refreshes the snapshot
/// and the scan moves on to the next job.  Returns `true` if a job was
/// started.
pub async fn try_start_pick<P: Positioning>(
    client: &P,
    table: &RouteTable,
    state: &mut WarehouseState,
) -> SimResult<bool> {
    if state.idle_forklifts.is_empty() {
        return Ok(false);
    }

    let mut job_index = 0;
    while job_index < state.pending_jobs.len() {
        let barcode = state.pending_jobs[job_index].barcode.clone();
        let Some(candidate) = find_unreserved(&state.store, &barcode).cloned() else {
            job_index += 1; // nothing in stock for this job; try the next
            continue;
        };

        // Confirm against the platform: the snapshot read may have raced a
        // concurrent reservation write.
        let Some(product) = client.get_trackable(&candidate.id).await? else {
            state.store.retain(|p| p.id != candidate.id); // vanished; rescan
            continue;
        };
        if product.properties.reserve.is_some() {
            refresh_store(client, table, state).await?;
            job_index += 1;
            continue;
        }

        let Some(forklift) = state.idle_forklifts.pop_front() else {
            return Ok(false);
        };

        // Reserve the product for this forklift and order (full replace).
        let order = &state.pending_jobs[job_index].order;
        let mut reserved = product;
        reserved.properties.reserve = Some(Reservation {
            forklift_provider_id: forklift.clone(),
            order_number: order.properties.order_number.clone().unwrap_or_default(),
            shipping_ramp_id: order.properties.shipping_ramp_id.clone(),
            loading_ramp_id: order.properties.loading_ramp_id.clone(),
        });
        let reserved = match client.update_trackable(&reserved).await {
            Ok(updated) => updated,
            Err(err) => {
                state.idle_forklifts.push_front(forklift); // nothing assigned
                return Err(err.into());
            }
        };

        let Some(job) = state.pending_jobs.remove(job_index) else {
            return Ok(false); // unreachable: index is bounded by the loop
        };
        state.store.retain(|p| p.id != reserved.id);

        info!(
            forklift = %forklift,
            barcode = %job.barcode,
            product = %reserved.id,
            "forklift assigned to pick job"
        );
        state.picks.push(ActivePickJob {
            job,
            product: reserved,
            forklift,
            machine: ForkliftMachine::new(),
        });
        return Ok(true);
    }

    Ok(false)
}

// ── Delivery matching ─────────────────────────────────────────────────────────

/// Try to match one waiting truck with one waiting product and start the
/// ramp's loading forklift on the hand-off run.  Returns `true` if a job
/// was started.
pub async fn try_start_delivery<P: Positioning>(
    client: &P,
    table: &RouteTable,
    state: &mut WarehouseState,
) -> SimResult<bool> {
    let Some((truck_index, product_index)) =
        delivery_candidate(&state.waiting_trucks, &state.waiting_products)
    else {
        return Ok(false);
    };

    let truck = &state.waiting_trucks[truck_index];
    let Some(loading_ramp) = truck.properties.loading_ramp_id.clone() else {
        return Ok(false);
    };
    let Some(ramp) = table.ramp_for_loading(&loading_ramp) else {
        warn!(fence = %loading_ramp, "waiting truck references an unknown loading ramp");
        return Ok(false);
    };
    // The ramp's forklift handles one load at a time.
    if !state.idle_loaders.contains(&ramp.loading_forklift) {
        return Ok(false);
    }

    let product = &state.waiting_products[product_index];
    let Some(origin) = product
        .properties
        .barcode
        .as_ref()
        .and_then(|barcode| ramp.product_routes.get(barcode))
        .and_then(|route| route.first())
    else {
        warn!(product = %product.id, "matched product has no storage route at this ramp");
        return Ok(false);
    };
    let route = handoff_route(ramp.staging_point, *origin);

    // Refresh the order so the job starts from its current loading status.
    let truck_id = truck.id.clone();
    let Some(refreshed) = client.get_trackable(&truck_id).await? else {
        // The order vanished (truck departed); drop it from the queue.
        state.waiting_trucks.remove(truck_index);
        return Ok(false);
    };

    let forklift = ramp.loading_forklift.clone();
    state.idle_loaders.remove(&forklift);
    let product = state.waiting_products.remove(product_index);
    state.waiting_trucks.remove(truck_index);

    info!(
        forklift = %forklift,
        truck = %refreshed.id,
        product = %product.id,
        "loading forklift assigned to delivery"
    );
    state.deliveries.push(ActiveDeliveryJob {
        truck: refreshed,
        product,
        forklift,
        route,
        machine: ForkliftMachine::new(),
    });
    Ok(true)
}
