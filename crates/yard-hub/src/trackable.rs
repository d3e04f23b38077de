//! Platform document types: trackables, fences, providers, zones.
//!
//! Wire casing follows the platform exactly: domain properties are
//! camelCase (`requestedProducts`, `readyToLoad`, …) while platform-level
//! keys are snake_case (`location_providers`, `storage_place`).  Every
//! document carries a flattened passthrough map so unknown fields survive
//! the full-document replace that `update_trackable` performs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use yard_core::{Barcode, FenceId, ProviderId, TrackableId};

// ── Trackable ─────────────────────────────────────────────────────────────────

/// A platform-managed entity with a location and a mutable properties bag.
///
/// Three shapes flow through the orchestrator: the virtual order marker
/// attached to a truck's provider, the product trackables forklifts carry,
/// and plain summaries from fence queries.  All share this document type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trackable {
    /// Platform-assigned id; empty until the document has been created.
    #[serde(default, skip_serializing_if = "TrackableId::is_empty")]
    pub id: TrackableId,

    /// Platform trackable type, e.g. `"omlox"` or `"virtual"`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    /// Providers currently feeding this trackable's position.  Serialized
    /// even when empty: an empty list on a replace DETACHES the trackable.
    #[serde(default)]
    pub location_providers: Vec<ProviderId>,

    #[serde(default)]
    pub properties: TrackableProperties,

    /// Unmodeled platform fields, preserved verbatim for replace round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trackable {
    /// `true` if this document carries truck identity (a virtual order
    /// marker), as opposed to a product.
    pub fn is_truck(&self) -> bool {
        self.properties.truck_id.is_some()
    }

    /// `true` if this document is a product trackable.
    pub fn is_product(&self) -> bool {
        self.properties.product.is_some() || self.properties.barcode.is_some()
    }

    /// `true` once every requested product has been recorded as loaded.
    ///
    /// Requires both lists to be present, mirroring the platform contract:
    /// a summary without properties never reads as fully loaded.
    pub fn is_fully_loaded(&self) -> bool {
        match (&self.properties.requested_products, &self.properties.loaded_products) {
            (Some(requested), Some(loaded)) => requested.len() == loaded.len(),
            _ => false,
        }
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

/// The typed slice of a trackable's properties bag.
///
/// All fields are optional; absent fields are omitted from serialization so
/// a product document never grows truck keys and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackableProperties {
    #[serde(rename = "truckId", default, skip_serializing_if = "Option::is_none")]
    pub truck_id: Option<String>,

    #[serde(rename = "orderNumber", default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(rename = "requestedProducts", default, skip_serializing_if = "Option::is_none")]
    pub requested_products: Option<Vec<Barcode>>,

    #[serde(rename = "loadedProducts", default, skip_serializing_if = "Option::is_none")]
    pub loaded_products: Option<Vec<LoadedProduct>>,

    #[serde(rename = "shippingRampId", default, skip_serializing_if = "Option::is_none")]
    pub shipping_ramp_id: Option<FenceId>,

    #[serde(rename = "loadingRampId", default, skip_serializing_if = "Option::is_none")]
    pub loading_ramp_id: Option<FenceId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<Reservation>,

    /// Product display name; presence marks the document as a product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,

    /// Set by the warehouse storage process once the product is racked.
    /// The platform writes arbitrary truthy values here (place ids, `true`),
    /// so it is kept as raw JSON; use [`TrackableProperties::is_stored`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_place: Option<Value>,

    #[serde(rename = "readyToLoad", default, skip_serializing_if = "is_false")]
    pub ready_to_load: bool,

    #[serde(rename = "moveToLoad", default, skip_serializing_if = "is_false")]
    pub move_to_load: bool,

    #[serde(rename = "moveToShipping", default, skip_serializing_if = "is_false")]
    pub move_to_shipping: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackableProperties {
    /// `true` once the storage process has racked this product.
    pub fn is_stored(&self) -> bool {
        match &self.storage_place {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(_) => true,
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One entry of a truck order's `loadedProducts` list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadedProduct {
    #[serde(rename = "trackableId")]
    pub trackable_id: TrackableId,
    pub barcode: Barcode,
}

/// Reservation metadata written onto a product when a pick job is assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "forkliftProviderId")]
    pub forklift_provider_id: ProviderId,

    #[serde(rename = "orderNumber")]
    pub order_number: String,

    #[serde(rename = "shippingRampId", default, skip_serializing_if = "Option::is_none")]
    pub shipping_ramp_id: Option<FenceId>,

    #[serde(rename = "loadingRampId", default, skip_serializing_if = "Option::is_none")]
    pub loading_ramp_id: Option<FenceId>,
}

// ── Fence ─────────────────────────────────────────────────────────────────────

/// A geofenced region.  The orchestrator never inspects geometry; roles come
/// from static configuration, and only the `storage_place` marker is read
/// (once, at startup, to discover the storage fences).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    #[serde(default, skip_serializing_if = "FenceId::is_empty")]
    pub id: FenceId,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_ref: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fence {
    /// `true` for fences marking a storage area (`properties.storage_place`).
    pub fn is_storage_place(&self) -> bool {
        match self.properties.as_ref().and_then(|p| p.get("storage_place")) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(_) => true,
        }
    }
}

// ── Provider / Zone ───────────────────────────────────────────────────────────

/// A location source (GPS truck tracker, UWB forklift or product tag).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,

    /// Positioning technology, e.g. `"gps"` or `"uwb"`.
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,
}

/// A coordinate zone: the transform between the local warehouse grid and
/// WGS-84, registered once and referenced by id in location updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Alternating WGS-84 / local coordinate pairs.
    pub ground_control_points: Vec<[f64; 2]>,

    #[serde(rename = "type")]
    pub kind: String,

    pub floor: i32,

    pub need_transformation: bool,

    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
