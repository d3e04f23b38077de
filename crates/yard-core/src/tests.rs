//! Unit tests for yard-core.

use crate::{Barcode, Coord, ProviderId, SimRng, TrackableId};

// ── Ids ───────────────────────────────────────────────────────────────────────

mod id_tests {
    use super::*;

    #[test]
    fn ids_serialize_transparently() {
        let id = ProviderId::from("ac:de:23:67:10:46");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ac:de:23:67:10:46\"");

        let back: ProviderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn default_id_is_empty_placeholder() {
        let id = TrackableId::default();
        assert!(id.is_empty());
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn ids_of_different_kinds_are_distinct_types() {
        // Compile-time property; just exercise Display.
        let b = Barcode::from("P-454567654");
        assert_eq!(b.to_string(), "P-454567654");
    }
}

// ── Coord ─────────────────────────────────────────────────────────────────────

mod coord_tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Coord::new(0.0, 10.0);
        let b = Coord::new(4.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(2.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), Coord::new(1.0, 2.0));
    }

    #[test]
    fn coord_serializes_as_bare_array() {
        let c = Coord::new(8.675, 49.417);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[8.675,49.417]");

        let back: Coord = serde_json::from_str("[1.0,2.0]").unwrap();
        assert_eq!(back, Coord::new(1.0, 2.0));
    }
}

// ── Rng ───────────────────────────────────────────────────────────────────────

mod rng_tests {
    use super::*;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = SimRng::seeded(7);
        let mut b = SimRng::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn choose_on_empty_slice_is_none() {
        let mut rng = SimRng::seeded(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

mod config_tests {
    use crate::OrchestratorConfig;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: OrchestratorConfig = toml::from_str("data_dir = \"data\"").unwrap();
        assert_eq!(config.tick_millis, 100);
        assert!(config.base_url.starts_with("http://"));
        assert!(config.ws_url.starts_with("ws://"));
        assert!(config.seed.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let text = r#"
            base_url = "http://hub:9000/v1"
            ws_url = "ws://hub:9000/v1/ws/socket"
            tick_millis = 250
            seed = 42
            data_dir = "seed"
        "#;
        let config: OrchestratorConfig = toml::from_str(text).unwrap();
        assert_eq!(config.base_url, "http://hub:9000/v1");
        assert_eq!(config.tick_millis, 250);
        assert_eq!(config.seed, Some(42));
    }
}
