//! Per-agent advancement and the post-barrier apply phase.
//!
//! Trucks advance synchronously (their steps only emit movement commands).
//! Forklift jobs advance concurrently — their terminal steps call the
//! platform — and the scheduler awaits all of them before touching any
//! shared queue.  Queue mutations derived from the outcomes (job
//! completion, forklift release, truck recycling) are applied sequentially
//! afterwards, so no two in-flight advances ever mutate the same list.

use futures_util::future::join_all;
use tracing::{info, warn};

use yard_agent::{ForkliftStep, TruckPhase, TruckStep};
use yard_hub::{LoadedProduct, LocationFeed, LocationOptions, Positioning, Trackable, location_update};
use yard_match::{ActiveDeliveryJob, ActivePickJob};

use crate::error::SimResult;
use crate::state::WarehouseState;

/// Outcome of one forklift-job advance.
enum JobOutcome {
    Active,
    Completed,
}

/// Outcome of one delivery advance; completion carries the re-written
/// order document so the apply phase can decide on re-queueing.
enum DeliveryOutcome {
    Active,
    Completed(Trackable),
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Advance every active agent exactly once, await the barrier, and apply
/// the collected outcomes.
///
/// `pick_count` and `delivery_count` are the job-list lengths captured
/// BEFORE this tick's matching ran: a job created this tick sits past
/// those bounds and is first advanced on the next tick.
pub async fn advance_all<P: Positioning>(
    client: &P,
    state: &mut WarehouseState,
    locations: &LocationFeed,
    zone_id: &str,
    pick_count: usize,
    delivery_count: usize,
) {
    // ── Trucks (synchronous) ──────────────────────────────────────────────
    for truck in &mut state.trucks {
        let step = truck.machine.advance(
            &truck.ramp.outbound_route,
            &truck.ramp.return_route,
            truck.fully_loaded,
        );
        match step {
            TruckStep::Move(coord) => locations.send(location_update(
                coord,
                truck.ramp.provider_id.clone(),
                &LocationOptions::gps(),
            )),
            TruckStep::Arrived => {
                info!(truck = %truck.ramp.truck_id, "truck reached the facility")
            }
            TruckStep::Hold | TruckStep::Finished => {}
        }
    }

    // Recycle finished trucks into the inactive pool, exactly once each.
    let mut index = 0;
    while index < state.trucks.len() {
        if state.trucks[index].machine.phase() == TruckPhase::Done {
            let truck = state.trucks.remove(index);
            info!(truck = %truck.ramp.truck_id, "truck completed its route; back in the pool");
            state.idle_trucks.push_back(truck.ramp);
        } else {
            index += 1;
        }
    }

    // ── Forklift jobs (concurrent, barrier) ───────────────────────────────
    let picks = join_all(
        state
            .picks
            .iter_mut()
            .take(pick_count)
            .map(|job| advance_pick(job, client, locations, zone_id)),
    );
    let deliveries = join_all(
        state
            .deliveries
            .iter_mut()
            .take(delivery_count)
            .map(|job| advance_delivery(job, client, locations, zone_id)),
    );
    let (pick_outcomes, delivery_outcomes) = tokio::join!(picks, deliveries);

    // ── Apply phase (sequential) ──────────────────────────────────────────
    for (index, outcome) in pick_outcomes.into_iter().enumerate().rev() {
        if matches!(outcome, JobOutcome::Completed) {
            let job = state.picks.remove(index);
            info!(forklift = %job.forklift, "pick delivered to shipping; forklift idle");
            state.idle_forklifts.push_back(job.forklift);
        }
    }

    for (index, outcome) in delivery_outcomes.into_iter().enumerate().rev() {
        if let DeliveryOutcome::Completed(order) = outcome {
            let job = state.deliveries.remove(index);
            info!(
                forklift = %job.forklift,
                truck = %order.id,
                "product loaded onto truck; loader idle"
            );
            state.idle_loaders.insert(job.forklift);
            // Still missing products?  Back into the waiting queue.
            if !order.is_fully_loaded() {
                state.waiting_trucks.push(order);
            }
        }
    }
}

// ── Pick jobs ─────────────────────────────────────────────────────────────────

async fn advance_pick<P: Positioning>(
    job: &mut ActivePickJob,
    client: &P,
    locations: &LocationFeed,
    zone_id: &str,
) -> JobOutcome {
    match step_pick(job, client, locations, zone_id).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(forklift = %job.forklift, %err, "pick step failed; retrying next tick");
            JobOutcome::Active
        }
    }
}

async fn step_pick<P: Positioning>(
    job: &mut ActivePickJob,
    client: &P,
    locations: &LocationFeed,
    zone_id: &str,
) -> SimResult<JobOutcome> {
    match job.machine.advance(&job.job.route) {
        ForkliftStep::Move(coord) => {
            locations.send(location_update(
                coord,
                job.forklift.clone(),
                &LocationOptions::local_zone(zone_id),
            ));
            Ok(JobOutcome::Active)
        }

        // At the rack.  Pick up only once the storage process has actually
        // racked the product; until then, wait in place.
        ForkliftStep::AtPickup => {
            let Some(product) = client.get_trackable(&job.product.id).await? else {
                return Ok(JobOutcome::Active);
            };
            if !product.properties.is_stored() {
                return Ok(JobOutcome::Active);
            }

            let mut carried = product;
            carried.location_providers = vec![job.forklift.clone()];
            carried.properties.move_to_load = true;
            let updated = client.update_trackable(&carried).await?;

            let route_len = job.job.route.len();
            job.product = updated;
            job.machine.begin_dropoff(route_len);
            Ok(JobOutcome::Active)
        }

        // Back at the shipping area: set the product down and flag it ready.
        ForkliftStep::AtDropoff => {
            let mut released = job.product.clone();
            released.location_providers = Vec::new();
            released.properties.ready_to_load = true;
            job.product = client.update_trackable(&released).await?;
            Ok(JobOutcome::Completed)
        }
    }
}

// ── Delivery jobs ─────────────────────────────────────────────────────────────

async fn advance_delivery<P: Positioning>(
    job: &mut ActiveDeliveryJob,
    client: &P,
    locations: &LocationFeed,
    zone_id: &str,
) -> DeliveryOutcome {
    match step_delivery(job, client, locations, zone_id).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(forklift = %job.forklift, %err, "delivery step failed; retrying next tick");
            DeliveryOutcome::Active
        }
    }
}

async fn step_delivery<P: Positioning>(
    job: &mut ActiveDeliveryJob,
    client: &P,
    locations: &LocationFeed,
    zone_id: &str,
) -> SimResult<DeliveryOutcome> {
    match job.machine.advance(&job.route) {
        ForkliftStep::Move(coord) => {
            locations.send(location_update(
                coord,
                job.forklift.clone(),
                &LocationOptions::local_zone(zone_id),
            ));
            Ok(DeliveryOutcome::Active)
        }

        // At the staged product.  Load it only once the pick forklift has
        // set it down and flagged it ready.
        ForkliftStep::AtPickup => {
            let Some(product) = client.get_trackable(&job.product.id).await? else {
                return Ok(DeliveryOutcome::Active);
            };
            if !product.properties.ready_to_load {
                return Ok(DeliveryOutcome::Active);
            }

            let mut carried = product;
            carried.location_providers = vec![job.forklift.clone()];
            carried.properties.move_to_shipping = true;
            let updated = client.update_trackable(&carried).await?;

            let route_len = job.route.len();
            job.product = updated;
            job.machine.begin_dropoff(route_len);
            Ok(DeliveryOutcome::Active)
        }

        // At the truck: record the product as loaded on the order, then
        // delete its trackable — the deletion is the loaded confirmation
        // the transiting-product poll watches for.
        ForkliftStep::AtDropoff => {
            let mut order = job.truck.clone();
            let mut loaded = order.properties.loaded_products.take().unwrap_or_default();
            loaded.push(LoadedProduct {
                trackable_id: job.product.id.clone(),
                barcode: job.product.properties.barcode.clone().unwrap_or_default(),
            });
            order.properties.loaded_products = Some(loaded);
            let updated = client.update_trackable(&order).await?;

            if let Err(err) = client.delete_trackable(&job.product.id).await {
                warn!(product = %job.product.id, %err, "failed to delete loaded product trackable");
            }
            Ok(DeliveryOutcome::Completed(updated))
        }
    }
}
