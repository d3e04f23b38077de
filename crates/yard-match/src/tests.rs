//! Unit tests for candidate selection and route sampling.

use std::collections::VecDeque;

use serde_json::json;

use yard_core::Coord;
use yard_hub::Trackable;

use crate::job::PendingPickJob;
use crate::matcher::{delivery_candidate, find_unreserved, handoff_route, pick_candidate};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn product(id: &str, barcode: &str, reserved_for: Option<&str>) -> Trackable {
    let mut properties = json!({
        "product": format!("Product {barcode}"),
        "barcode": barcode,
    });
    if let Some(order) = reserved_for {
        properties["reserve"] = json!({
            "forkliftProviderId": "fk-x",
            "orderNumber": order,
        });
    }
    serde_json::from_value(json!({"id": id, "properties": properties})).unwrap()
}

fn order(id: &str, order_number: &str, requested: &[&str]) -> Trackable {
    serde_json::from_value(json!({
        "id": id,
        "properties": {
            "truckId": "T-1",
            "orderNumber": order_number,
            "requestedProducts": requested,
            "loadedProducts": [],
        }
    }))
    .unwrap()
}

fn pending(barcode: &str) -> PendingPickJob {
    PendingPickJob {
        order: order("order-1", "ord-1", &[barcode]),
        barcode: barcode.into(),
        route: vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)],
    }
}

// ── Pick matching ─────────────────────────────────────────────────────────────

mod pick_tests {
    use super::*;

    #[test]
    fn reserved_products_are_skipped() {
        let store = vec![
            product("p1", "P-a", Some("ord-9")),
            product("p2", "P-a", None),
        ];
        let found = find_unreserved(&store, &"P-a".into()).unwrap();
        assert_eq!(found.id.as_str(), "p2");
    }

    #[test]
    fn candidate_respects_fifo_job_order() {
        let pending: VecDeque<_> = [pending("P-a"), pending("P-b")].into();
        let store = vec![product("p1", "P-b", None), product("p2", "P-a", None)];

        // Job 0 ("P-a") is first in FIFO order even though the store lists
        // "P-b" first.
        let (job_index, found) = pick_candidate(&pending, &store).unwrap();
        assert_eq!(job_index, 0);
        assert_eq!(found.id.as_str(), "p2");
    }

    #[test]
    fn job_without_stock_is_passed_over() {
        let pending: VecDeque<_> = [pending("P-a"), pending("P-b")].into();
        let store = vec![product("p1", "P-b", None)];

        let (job_index, _) = pick_candidate(&pending, &store).unwrap();
        assert_eq!(job_index, 1);
    }

    #[test]
    fn selection_is_pure_and_repeatable() {
        let pending: VecDeque<_> = [pending("P-a")].into();
        let store = vec![product("p1", "P-a", None)];

        let first = pick_candidate(&pending, &store).map(|(i, p)| (i, p.id.clone()));
        let second = pick_candidate(&pending, &store).map(|(i, p)| (i, p.id.clone()));
        assert_eq!(first, second);

        assert!(pick_candidate(&pending, &[]).is_none());
    }
}

// ── Delivery matching ─────────────────────────────────────────────────────────

mod delivery_tests {
    use super::*;

    #[test]
    fn matches_on_order_number_and_membership() {
        let trucks = vec![order("o1", "ord-1", &["P-a", "P-b"])];
        let products = vec![
            product("p1", "P-a", Some("ord-2")), // wrong order
            product("p2", "P-c", Some("ord-1")), // not requested
            product("p3", "P-b", Some("ord-1")), // match
        ];
        assert_eq!(delivery_candidate(&trucks, &products), Some((0, 2)));
    }

    #[test]
    fn truck_then_product_scan_order() {
        let trucks = vec![
            order("o1", "ord-1", &["P-a"]),
            order("o2", "ord-2", &["P-a"]),
        ];
        let products = vec![
            product("p1", "P-a", Some("ord-2")),
            product("p2", "P-a", Some("ord-1")),
        ];
        // Truck 0 wins even though its product appears second.
        assert_eq!(delivery_candidate(&trucks, &products), Some((0, 1)));
    }

    #[test]
    fn unreserved_products_never_match() {
        let trucks = vec![order("o1", "ord-1", &["P-a"])];
        let products = vec![product("p1", "P-a", None)];
        assert_eq!(delivery_candidate(&trucks, &products), None);
    }

    #[test]
    fn empty_lists_yield_no_match() {
        assert_eq!(delivery_candidate(&[], &[]), None);
    }
}

// ── Hand-off route ────────────────────────────────────────────────────────────

mod route_tests {
    use super::*;

    #[test]
    fn nine_points_with_exact_endpoints() {
        let staging = Coord::new(0.0, 0.0);
        let dest = Coord::new(8.0, 4.0);
        let route = handoff_route(staging, dest);

        assert_eq!(route.len(), 9);
        assert_eq!(route[0], staging);
        assert_eq!(route[8], dest);
        // Equal-length steps on a straight segment.
        assert_eq!(route[4], Coord::new(4.0, 2.0));
    }

    #[test]
    fn degenerate_segment_repeats_the_point() {
        let p = Coord::new(3.0, 3.0);
        let route = handoff_route(p, p);
        assert_eq!(route.len(), 9);
        assert!(route.iter().all(|&c| c == p));
    }
}
