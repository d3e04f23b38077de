//! Push-channel wire format.
//!
//! The platform's WebSocket speaks one envelope shape in both directions:
//! `{event, topic, payload}`.  Inbound, `topic: "fence_events"` carries an
//! array of crossing notifications.  Outbound, the same envelope with
//! `topic: "location_updates"` is the command that moves an agent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use yard_core::{Coord, FenceId, ProviderId, TrackableId};

pub const TOPIC_FENCE_EVENTS: &str = "fence_events";
pub const TOPIC_LOCATION_UPDATES: &str = "location_updates";

/// Source id used for location updates when no zone is configured.
pub const FALLBACK_ZONE_SOURCE: &str = "34567ojkhvcbnmloikj3mew";
pub const DEFAULT_CRS: &str = "EPSG:4326";
pub const DEFAULT_PROVIDER_TYPE: &str = "uwb";

// ── Envelope ──────────────────────────────────────────────────────────────────

/// The `{event, topic, payload}` frame used in both directions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    pub topic: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl Envelope {
    /// Subscription request for `topic`.
    pub fn subscribe(topic: &str) -> Self {
        Self {
            event: "subscribe".to_owned(),
            topic: topic.to_owned(),
            payload: Value::Null,
        }
    }

    /// Outbound location-update command carrying `updates`.
    pub fn location_message(updates: &[LocationUpdate]) -> Self {
        Self {
            event: "message".to_owned(),
            topic: TOPIC_LOCATION_UPDATES.to_owned(),
            // LocationUpdate serialization is infallible (plain fields).
            payload: serde_json::to_value(updates).unwrap_or(Value::Null),
        }
    }

    /// `true` for a data frame on `topic` (as opposed to acks and errors).
    pub fn is_message_for(&self, topic: &str) -> bool {
        self.event == "message" && self.topic == topic
    }

    /// Decode the payload as a fence-event batch.
    pub fn fence_events(&self) -> Result<Vec<FenceEvent>, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

// ── Location updates ──────────────────────────────────────────────────────────

/// GeoJSON-style point position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Always `"Point"`.
    #[serde(rename = "type")]
    pub kind: String,

    pub coordinates: Coord,
}

/// One position sample for one provider — both the inbound notification
/// shape and the outbound movement command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub position: Position,

    /// Zone id the coordinates are expressed in.
    pub source: String,

    pub provider_type: String,

    pub crs: String,

    pub provider_id: ProviderId,
}

/// Optional overrides for [`location_update`]; unset fields fall back to the
/// platform defaults (`uwb`, WGS-84, placeholder zone source).
#[derive(Clone, Debug, Default)]
pub struct LocationOptions {
    pub zone_id: Option<String>,
    pub provider_type: Option<String>,
    pub crs: Option<String>,
}

impl LocationOptions {
    /// Truck movement: GPS provider in WGS-84.
    pub fn gps() -> Self {
        Self {
            provider_type: Some("gps".to_owned()),
            ..Self::default()
        }
    }

    /// Forklift movement: local-grid coordinates in the warehouse zone.
    pub fn local_zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_owned()),
            crs: Some("local".to_owned()),
            ..Self::default()
        }
    }
}

/// Build a location-update command for `provider_id` at `coordinates`.
pub fn location_update(
    coordinates: Coord,
    provider_id: ProviderId,
    options: &LocationOptions,
) -> LocationUpdate {
    LocationUpdate {
        position: Position {
            kind: "Point".to_owned(),
            coordinates,
        },
        source: options
            .zone_id
            .clone()
            .unwrap_or_else(|| FALLBACK_ZONE_SOURCE.to_owned()),
        provider_type: options
            .provider_type
            .clone()
            .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE.to_owned()),
        crs: options.crs.clone().unwrap_or_else(|| DEFAULT_CRS.to_owned()),
        provider_id,
    }
}

// ── Fence events ──────────────────────────────────────────────────────────────

/// Direction of a geofence crossing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingKind {
    RegionEntry,
    RegionExit,
}

/// One crossing notification from the `fence_events` topic.
///
/// `trackable_id` is present when a trackable crossed; `provider_id` names
/// the location source that triggered the crossing.  Either may be absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FenceEvent {
    pub fence_id: FenceId,

    pub event_type: CrossingKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trackable_id: Option<TrackableId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ProviderId>,
}
