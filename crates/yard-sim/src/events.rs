//! Application of routed fence actions against the world state.
//!
//! Each action is applied independently; a failure aborts only that action
//! (the scheduler logs it and moves on to the next one).

use futures_util::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use yard_core::{FenceId, ProviderId, TrackableId};
use yard_events::FenceAction;
use yard_hub::{Positioning, Trackable, TrackableProperties};
use yard_match::PendingPickJob;
use yard_routes::RouteTable;

use crate::error::SimResult;
use crate::state::WarehouseState;

/// Apply one routed fence action.
pub async fn apply_action<P: Positioning>(
    action: FenceAction,
    client: &P,
    table: &RouteTable,
    state: &mut WarehouseState,
) -> SimResult<()> {
    match action {
        FenceAction::RefreshStore => refresh_store(client, table, state).await,
        FenceAction::TruckArrived { provider } => truck_arrived(&provider, client, state).await,
        FenceAction::TruckDeparted { provider } => truck_departed(&provider, client, state).await,
        FenceAction::CarriedIntoLoading { trackable, fence } => {
            carried_into_loading(trackable, &fence, client, table, state).await
        }
        FenceAction::ProductAtShipping { trackable } => {
            product_at_shipping(&trackable, client, state).await
        }
    }
}

// ── Storage snapshot ──────────────────────────────────────────────────────────

/// Re-query every storage fence and rebuild the unreserved-product snapshot.
///
/// The queries run concurrently; the snapshot is replaced wholesale.  A
/// concurrent reservation write can still race this read — the matching
/// protocol re-confirms each candidate before reserving it.
pub async fn refresh_store<P: Positioning>(
    client: &P,
    table: &RouteTable,
    state: &mut WarehouseState,
) -> SimResult<()> {
    let queries = table.storage_fences.iter().map(|fence| client.trackables_in_fence(fence));

    let mut store = Vec::new();
    for result in join_all(queries).await {
        store.extend(
            result?
                .into_iter()
                .filter(|product| product.properties.reserve.is_none()),
        );
    }
    state.store = store;
    Ok(())
}

// ── Truck arrival / departure ─────────────────────────────────────────────────

/// Create the virtual order trackable for a truck that just entered its
/// loading ramp.  The trackable rides on the truck's provider and is the
/// durable handle every other component uses to track loading progress.
async fn truck_arrived<P: Positioning>(
    provider: &ProviderId,
    client: &P,
    state: &mut WarehouseState,
) -> SimResult<()> {
    let Some(truck) = state.trucks.iter_mut().find(|t| &t.ramp.provider_id == provider) else {
        return Ok(()); // crossing from a truck we are not driving
    };
    if truck.order.is_some() {
        return Ok(()); // duplicate entry event; the order already exists
    }

    let order = Trackable {
        kind: "virtual".to_owned(),
        radius: Some(0.5),
        location_providers: vec![provider.clone()],
        properties: TrackableProperties {
            truck_id: Some(truck.ramp.truck_id.clone()),
            order_number: Some(Uuid::new_v4().to_string()),
            requested_products: Some(truck.requested.clone()),
            loaded_products: Some(Vec::new()),
            shipping_ramp_id: Some(truck.ramp.shipping_ramp.clone()),
            loading_ramp_id: Some(truck.ramp.loading_ramp.clone()),
            ..TrackableProperties::default()
        },
        ..Trackable::default()
    };

    let created = client.create_trackable(&order).await?;
    info!(truck = %truck.ramp.truck_id, order = %created.id, "truck entered the facility");
    truck.order = Some(created);
    Ok(())
}

/// Delete the order trackable of a truck leaving its loading ramp.
async fn truck_departed<P: Positioning>(
    provider: &ProviderId,
    client: &P,
    state: &mut WarehouseState,
) -> SimResult<()> {
    let Some(truck) = state.trucks.iter_mut().find(|t| &t.ramp.provider_id == provider) else {
        return Ok(());
    };
    let Some(order) = truck.order.take() else {
        return Ok(()); // already departed (or never arrived)
    };

    info!(truck = %truck.ramp.truck_id, order = %order.id, "truck left the facility");
    client.delete_trackable(&order.id).await?;
    Ok(())
}

// ── Carried trackables ────────────────────────────────────────────────────────

/// A trackable crossed into a loading ramp: dispatch on its identity.
async fn carried_into_loading<P: Positioning>(
    trackable: TrackableId,
    fence: &FenceId,
    client: &P,
    table: &RouteTable,
    state: &mut WarehouseState,
) -> SimResult<()> {
    let Some(doc) = client.get_trackable(&trackable).await? else {
        return Ok(()); // gone before we looked
    };

    if doc.is_truck() {
        enqueue_pick_jobs(&doc, fence, table, state);
        if !state.waiting_trucks.iter().any(|t| t.id == doc.id) {
            state.waiting_trucks.push(doc);
        }
    } else if doc.is_product() && !state.transiting.contains(&trackable) {
        // Loaded confirmation comes later, as a not-found read.
        state.transiting.push(trackable);
    }
    Ok(())
}

/// One pending pick job per requested barcode with a known storage route.
fn enqueue_pick_jobs(
    order: &Trackable,
    fence: &FenceId,
    table: &RouteTable,
    state: &mut WarehouseState,
) {
    let Some(requested) = order.properties.requested_products.as_ref() else {
        return;
    };

    for barcode in requested {
        match table.route_for(fence, barcode) {
            Some(route) => {
                state.pending_jobs.push_back(PendingPickJob {
                    order: order.clone(),
                    barcode: barcode.clone(),
                    route: route.to_vec(),
                });
            }
            None => warn!(%barcode, %fence, "requested product has no storage route; skipping"),
        }
    }
    info!(
        order = %order.id,
        pending = state.pending_jobs.len(),
        "enqueued pick jobs for arriving truck"
    );
}

/// A trackable crossed into a shipping ramp: it is a staged product waiting
/// to be loaded.
async fn product_at_shipping<P: Positioning>(
    trackable: &TrackableId,
    client: &P,
    state: &mut WarehouseState,
) -> SimResult<()> {
    let Some(doc) = client.get_trackable(trackable).await? else {
        return Ok(());
    };
    if !state.waiting_products.iter().any(|p| p.id == doc.id) {
        info!(product = %doc.id, "product staged at shipping ramp");
        state.waiting_products.push(doc);
    }
    Ok(())
}
