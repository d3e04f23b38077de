//! The in-memory seed tables and their lookups.

use std::collections::HashMap;

use yard_core::{Barcode, Coord, FenceId, ProviderId};

/// Role of a geofenced region, decided purely by membership in the static
/// tables — never by anything on the fence document itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenceRole {
    LoadingRamp,
    ShippingRamp,
    Storage,
}

// ── Ramp / product records ────────────────────────────────────────────────────

/// Everything tied to one dock: the truck that serves it, its two route
/// legs, the fences around it, and the loading forklift stationed there.
#[derive(Clone, Debug)]
pub struct RampConfig {
    pub truck_id: String,

    /// The truck's location provider.
    pub provider_id: ProviderId,

    /// Route leg driven towards the facility.
    pub outbound_route: Vec<Coord>,

    /// Route leg driven home after loading.
    pub return_route: Vec<Coord>,

    pub loading_ramp: FenceId,
    pub shipping_ramp: FenceId,

    /// Storage routes by product barcode — the path a pick forklift drives
    /// from the shipping area to that product's rack.
    pub product_routes: HashMap<Barcode, Vec<Coord>>,

    /// Provider of the forklift that loads products onto trucks at this ramp.
    pub loading_forklift: ProviderId,

    /// Where that forklift stages between jobs; hand-off routes start here.
    pub staging_point: Coord,
}

/// One catalog product.
#[derive(Clone, Debug)]
pub struct ProductSpec {
    pub provider_id: ProviderId,
    pub name: String,
    pub barcode: Barcode,

    /// Route from the production area to this product's storage rack.
    pub storage_route: Vec<Coord>,

    /// How many trackables of this product the seeding step creates.
    pub stock: u32,
}

// ── RouteTable ────────────────────────────────────────────────────────────────

/// The complete immutable lookup: built once at startup from the seed files
/// plus the storage fences discovered on the platform.
#[derive(Clone, Debug)]
pub struct RouteTable {
    pub ramps: Vec<RampConfig>,
    pub products: Vec<ProductSpec>,

    /// Providers of the shared pick-forklift pool.
    pub pick_forklifts: Vec<ProviderId>,

    /// Fences marking storage areas (frozen at startup).
    pub storage_fences: Vec<FenceId>,

    /// Coordinate zone used for local-CRS location updates.
    pub zone_id: String,
}

impl RouteTable {
    /// Classify a fence.  `None` for fences the orchestrator doesn't manage.
    pub fn fence_role(&self, fence: &FenceId) -> Option<FenceRole> {
        if self.ramps.iter().any(|r| &r.loading_ramp == fence) {
            return Some(FenceRole::LoadingRamp);
        }
        if self.ramps.iter().any(|r| &r.shipping_ramp == fence) {
            return Some(FenceRole::ShippingRamp);
        }
        if self.storage_fences.contains(fence) {
            return Some(FenceRole::Storage);
        }
        None
    }

    /// The ramp whose loading fence is `fence`.
    pub fn ramp_for_loading(&self, fence: &FenceId) -> Option<&RampConfig> {
        self.ramps.iter().find(|r| &r.loading_ramp == fence)
    }

    /// The ramp served by the truck with provider `provider`.
    pub fn ramp_for_provider(&self, provider: &ProviderId) -> Option<&RampConfig> {
        self.ramps.iter().find(|r| &r.provider_id == provider)
    }

    /// Storage route for `barcode` at the ramp behind `loading_fence`.
    pub fn route_for(&self, loading_fence: &FenceId, barcode: &Barcode) -> Option<&[Coord]> {
        self.ramp_for_loading(loading_fence)?
            .product_routes
            .get(barcode)
            .map(Vec::as_slice)
    }

    pub fn product_by_barcode(&self, barcode: &Barcode) -> Option<&ProductSpec> {
        self.products.iter().find(|p| &p.barcode == barcode)
    }

    /// Barcodes of the full catalog, for randomized order generation.
    pub fn catalog(&self) -> Vec<Barcode> {
        self.products.iter().map(|p| p.barcode.clone()).collect()
    }
}
