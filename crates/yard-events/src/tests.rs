//! Router classification tests.

use std::collections::HashMap;

use yard_core::{Coord, FenceId, ProviderId};
use yard_hub::{CrossingKind, FenceEvent};
use yard_routes::{ProductSpec, RampConfig, RouteTable};

use crate::router::{FenceAction, route_events};

// ── Fixture ───────────────────────────────────────────────────────────────────

fn table() -> RouteTable {
    RouteTable {
        ramps: vec![RampConfig {
            truck_id: "T-1".to_owned(),
            provider_id: ProviderId::from("truck-p"),
            outbound_route: vec![],
            return_route: vec![],
            loading_ramp: FenceId::from("f-load"),
            shipping_ramp: FenceId::from("f-ship"),
            product_routes: HashMap::new(),
            loading_forklift: ProviderId::from("loader-p"),
            staging_point: Coord::new(0.0, 0.0),
        }],
        products: vec![ProductSpec {
            provider_id: ProviderId::from("prod-p"),
            name: "Product A".to_owned(),
            barcode: "P-a".into(),
            storage_route: vec![],
            stock: 1,
        }],
        pick_forklifts: vec![],
        storage_fences: vec![FenceId::from("f-store")],
        zone_id: "zone-1".to_owned(),
    }
}

fn entry(fence: &str, trackable: Option<&str>, provider: Option<&str>) -> FenceEvent {
    FenceEvent {
        fence_id: fence.into(),
        event_type: CrossingKind::RegionEntry,
        trackable_id: trackable.map(Into::into),
        provider_id: provider.map(Into::into),
    }
}

fn exit(fence: &str, provider: Option<&str>) -> FenceEvent {
    FenceEvent {
        fence_id: fence.into(),
        event_type: CrossingKind::RegionExit,
        trackable_id: None,
        provider_id: provider.map(Into::into),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn storage_entry_refreshes_the_snapshot() {
    let actions = route_events(&[entry("f-store", Some("t-1"), None)], &table());
    assert_eq!(actions, vec![FenceAction::RefreshStore]);
}

#[test]
fn storage_exit_is_ignored() {
    assert!(route_events(&[exit("f-store", None)], &table()).is_empty());
}

#[test]
fn truck_provider_entering_its_ramp_arrives() {
    let actions = route_events(&[entry("f-load", None, Some("truck-p"))], &table());
    assert_eq!(
        actions,
        vec![FenceAction::TruckArrived {
            provider: "truck-p".into()
        }]
    );
}

#[test]
fn crossing_with_trackable_and_truck_provider_yields_both_actions() {
    let actions = route_events(&[entry("f-load", Some("order-1"), Some("truck-p"))], &table());
    assert_eq!(
        actions,
        vec![
            FenceAction::CarriedIntoLoading {
                trackable: "order-1".into(),
                fence: "f-load".into()
            },
            FenceAction::TruckArrived {
                provider: "truck-p".into()
            },
        ]
    );
}

#[test]
fn unknown_provider_at_loading_ramp_is_just_a_carried_crossing() {
    let actions = route_events(&[entry("f-load", Some("t-9"), Some("someone-else"))], &table());
    assert_eq!(
        actions,
        vec![FenceAction::CarriedIntoLoading {
            trackable: "t-9".into(),
            fence: "f-load".into()
        }]
    );
}

#[test]
fn truck_provider_exit_departs() {
    let actions = route_events(&[exit("f-load", Some("truck-p"))], &table());
    assert_eq!(
        actions,
        vec![FenceAction::TruckDeparted {
            provider: "truck-p".into()
        }]
    );
}

#[test]
fn shipping_entry_needs_a_trackable() {
    let with = route_events(&[entry("f-ship", Some("t-5"), None)], &table());
    assert_eq!(
        with,
        vec![FenceAction::ProductAtShipping {
            trackable: "t-5".into()
        }]
    );

    let without = route_events(&[entry("f-ship", None, Some("prod-p"))], &table());
    assert!(without.is_empty());
}

#[test]
fn unknown_fences_produce_nothing() {
    assert!(route_events(&[entry("f-elsewhere", Some("t-1"), None)], &table()).is_empty());
}

#[test]
fn batch_order_is_preserved() {
    let batch = [
        entry("f-ship", Some("t-1"), None),
        entry("f-store", None, None),
        exit("f-load", Some("truck-p")),
    ];
    let actions = route_events(&batch, &table());
    assert_eq!(actions.len(), 3);
    assert!(matches!(actions[0], FenceAction::ProductAtShipping { .. }));
    assert_eq!(actions[1], FenceAction::RefreshStore);
    assert!(matches!(actions[2], FenceAction::TruckDeparted { .. }));
}
