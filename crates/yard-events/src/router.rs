//! Classification of fence crossings by fence role and crossing identity.

use yard_core::{FenceId, ProviderId, TrackableId};
use yard_hub::{CrossingKind, FenceEvent};
use yard_routes::{FenceRole, RouteTable};

/// What a fence crossing means for the warehouse, before any I/O happens.
///
/// Trackable lookups are deferred to the handler — the router cannot know
/// whether a carried trackable is a truck's order marker or a product
/// without asking the platform.
#[derive(Clone, Debug, PartialEq)]
pub enum FenceAction {
    /// A product entered a storage area: the in-store snapshot is stale.
    RefreshStore,

    /// A known truck's provider entered its own loading ramp: create the
    /// virtual order trackable.
    TruckArrived { provider: ProviderId },

    /// That provider left the loading ramp: detach and delete the order
    /// trackable, if one is still attached.
    TruckDeparted { provider: ProviderId },

    /// A carried trackable entered a loading ramp.  The handler looks it
    /// up: truck identity enqueues pending pick jobs and joins the waiting
    /// list, product identity joins the transiting watch list.
    CarriedIntoLoading { trackable: TrackableId, fence: FenceId },

    /// A carried trackable entered a shipping ramp: fetch it and enqueue
    /// to the waiting-products list.
    ProductAtShipping { trackable: TrackableId },
}

/// Route one batch of notifications, in array order.
///
/// Crossings of fences the table doesn't know produce nothing.
pub fn route_events(batch: &[FenceEvent], table: &RouteTable) -> Vec<FenceAction> {
    let mut actions = Vec::new();

    for event in batch {
        let Some(role) = table.fence_role(&event.fence_id) else {
            continue;
        };

        match (role, event.event_type) {
            (FenceRole::Storage, CrossingKind::RegionEntry) => {
                actions.push(FenceAction::RefreshStore);
            }
            (FenceRole::Storage, CrossingKind::RegionExit) => {}

            (FenceRole::LoadingRamp, CrossingKind::RegionEntry) => {
                if let Some(trackable) = &event.trackable_id {
                    actions.push(FenceAction::CarriedIntoLoading {
                        trackable: trackable.clone(),
                        fence: event.fence_id.clone(),
                    });
                }
                if let Some(provider) = known_truck_at_ramp(event, table) {
                    actions.push(FenceAction::TruckArrived { provider });
                }
            }
            (FenceRole::LoadingRamp, CrossingKind::RegionExit) => {
                if let Some(provider) = known_truck_at_ramp(event, table) {
                    actions.push(FenceAction::TruckDeparted { provider });
                }
            }

            (FenceRole::ShippingRamp, CrossingKind::RegionEntry) => {
                if let Some(trackable) = &event.trackable_id {
                    actions.push(FenceAction::ProductAtShipping {
                        trackable: trackable.clone(),
                    });
                }
            }
            (FenceRole::ShippingRamp, CrossingKind::RegionExit) => {}
        }
    }

    actions
}

/// The crossing provider, if it is a known truck's provider crossing its
/// OWN loading ramp (a truck passing another dock's fence is not an
/// arrival there).
fn known_truck_at_ramp(event: &FenceEvent, table: &RouteTable) -> Option<ProviderId> {
    let provider = event.provider_id.as_ref()?;
    let ramp = table.ramp_for_provider(provider)?;
    (ramp.loading_ramp == event.fence_id).then(|| provider.clone())
}
