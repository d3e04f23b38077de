//! Tests for table lookups and the seed loader.

use std::collections::HashMap;

use yard_core::{Barcode, Coord, FenceId, ProviderId};

use crate::table::{FenceRole, ProductSpec, RampConfig, RouteTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample_table() -> RouteTable {
    let mut product_routes = HashMap::new();
    product_routes.insert(
        Barcode::from("P-a"),
        vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)],
    );

    RouteTable {
        ramps: vec![RampConfig {
            truck_id: "T-1".to_owned(),
            provider_id: ProviderId::from("truck-p"),
            outbound_route: vec![Coord::new(0.0, 0.0)],
            return_route: vec![Coord::new(1.0, 1.0)],
            loading_ramp: FenceId::from("f-load"),
            shipping_ramp: FenceId::from("f-ship"),
            product_routes,
            loading_forklift: ProviderId::from("loader-p"),
            staging_point: Coord::new(5.0, 5.0),
        }],
        products: vec![ProductSpec {
            provider_id: ProviderId::from("prod-p"),
            name: "Product A".to_owned(),
            barcode: Barcode::from("P-a"),
            storage_route: vec![Coord::new(2.0, 2.0)],
            stock: 2,
        }],
        pick_forklifts: vec![ProviderId::from("fork-1")],
        storage_fences: vec![FenceId::from("f-store")],
        zone_id: "zone-1".to_owned(),
    }
}

// ── Lookups ───────────────────────────────────────────────────────────────────

mod table_tests {
    use super::*;

    #[test]
    fn fence_roles_come_from_membership() {
        let table = sample_table();
        assert_eq!(table.fence_role(&"f-load".into()), Some(FenceRole::LoadingRamp));
        assert_eq!(table.fence_role(&"f-ship".into()), Some(FenceRole::ShippingRamp));
        assert_eq!(table.fence_role(&"f-store".into()), Some(FenceRole::Storage));
        assert_eq!(table.fence_role(&"f-unknown".into()), None);
    }

    #[test]
    fn ramp_lookups() {
        let table = sample_table();
        assert!(table.ramp_for_loading(&"f-load".into()).is_some());
        assert!(table.ramp_for_loading(&"f-ship".into()).is_none());
        assert_eq!(
            table
                .ramp_for_provider(&"truck-p".into())
                .map(|r| r.truck_id.as_str()),
            Some("T-1")
        );
    }

    #[test]
    fn route_for_unknown_barcode_is_none() {
        let table = sample_table();
        assert!(table.route_for(&"f-load".into(), &"P-a".into()).is_some());
        assert!(table.route_for(&"f-load".into(), &"P-z".into()).is_none());
        assert!(table.route_for(&"f-other".into(), &"P-a".into()).is_none());
    }

    #[test]
    fn catalog_lists_all_barcodes() {
        assert_eq!(sample_table().catalog(), vec![Barcode::from("P-a")]);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

mod loader_tests {
    use super::*;
    use crate::loader::load_tables;

    fn write(dir: &std::path::Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn seed_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path();

        write(path, "truck-out.json", "[[0.0, 0.0], [1.0, 0.5]]");
        write(path, "truck-back.json", "[[1.0, 0.5], [0.0, 0.0]]");
        write(path, "store-a.json", "[[2.0, 2.0], [3.0, 2.0]]");
        write(
            path,
            "ramps.json",
            r#"[{
                "truckId": "T-1",
                "providerId": "truck-p",
                "outboundRoute": "truck-out.json",
                "returnRoute": "truck-back.json",
                "loadingRamp": 0,
                "shippingRamp": 1,
                "productRoutes": {"P-a": "store-a.json"},
                "loadingForklift": "loader-p",
                "stagingPoint": [5.0, 5.0]
            }]"#,
        );
        write(
            path,
            "fences.json",
            r#"[
                {"id": "f-load", "name": "Loading Ramp 1"},
                {"id": "f-ship", "name": "Shipping Ramp 1"}
            ]"#,
        );
        write(
            path,
            "products.json",
            r#"[{
                "providerId": "prod-p",
                "name": "Product A",
                "barcode": "P-a",
                "route": "store-a.json",
                "count": 2
            }]"#,
        );
        write(path, "forklifts.json", r#"["fork-1", "fork-2"]"#);
        write(path, "zone.json", r#"{"id": "zone-1", "name": "Warehouse UWB"}"#);

        dir
    }

    #[test]
    fn loads_and_resolves_route_files() {
        let dir = seed_dir();
        let tables = load_tables(dir.path()).unwrap();

        assert_eq!(tables.zone_id, "zone-1");
        assert_eq!(tables.pick_forklifts.len(), 2);
        assert_eq!(tables.products[0].stock, 2);

        let ramp = &tables.ramps[0];
        assert_eq!(ramp.outbound_route.len(), 2);
        assert_eq!(ramp.outbound_route[1], Coord::new(1.0, 0.5));
        assert_eq!(ramp.product_routes[&Barcode::from("P-a")].len(), 2);
        assert_eq!(ramp.staging_point, Coord::new(5.0, 5.0));

        // Fence indices resolved against fences.json.
        assert_eq!(ramp.loading_ramp, FenceId::from("f-load"));
        assert_eq!(ramp.shipping_ramp, FenceId::from("f-ship"));
    }

    #[test]
    fn out_of_range_fence_index_is_an_error() {
        let dir = seed_dir();
        write(dir.path(), "fences.json", r#"[{"id": "f-load"}]"#);

        let err = load_tables(dir.path()).unwrap_err();
        assert!(err.to_string().contains("fence index 1"));
    }

    #[test]
    fn missing_route_file_reports_its_path() {
        let dir = seed_dir();
        std::fs::remove_file(dir.path().join("store-a.json")).unwrap();

        let err = load_tables(dir.path()).unwrap_err();
        assert!(err.to_string().contains("store-a.json"));
    }

    #[test]
    fn into_table_freezes_storage_fences() {
        let dir = seed_dir();
        let table = load_tables(dir.path())
            .unwrap()
            .into_table(vec![FenceId::from("f-store")]);
        assert_eq!(table.fence_role(&"f-store".into()), Some(FenceRole::Storage));
    }
}
