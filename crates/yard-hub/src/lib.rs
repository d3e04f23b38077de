//! `yard-hub` — typed wrapper around the external positioning platform.
//!
//! The platform (an omlox-style hub) is the source of truth for every
//! trackable, fence, and provider; this crate only gives those HTTP/JSON and
//! WebSocket surfaces a typed, `Result`-shaped face.  No scheduling or
//! matching logic lives here.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`trackable`] | `Trackable`, `TrackableProperties`, `Fence`, `Zone`, … |
//! | [`wire`]      | push-channel envelopes, `LocationUpdate`, `FenceEvent` |
//! | [`client`]    | `Positioning` trait + `HubClient` (reqwest)            |
//! | [`stream`]    | `connect` → fence-event receiver + `LocationFeed`      |
//! | [`error`]     | `HubError`, `HubResult`                                |
//!
//! # Staleness contract
//!
//! Every property read through this crate is possibly stale — the platform
//! mutates trackables concurrently.  Every write is a full-document replace
//! (`PUT`), never a patch, which is why the document types carry flattened
//! passthrough maps: a read-modify-write cycle must not drop fields this
//! crate doesn't model.

pub mod client;
pub mod error;
pub mod stream;
pub mod trackable;
pub mod wire;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use client::{HubClient, Positioning};
pub use error::{HubError, HubResult};
pub use stream::{EventChannel, LocationFeed, connect};
pub use trackable::{Fence, LoadedProduct, Provider, Reservation, Trackable, TrackableProperties, Zone};
pub use wire::{
    CrossingKind, Envelope, FenceEvent, LocationOptions, LocationUpdate, Position,
    TOPIC_FENCE_EVENTS, TOPIC_LOCATION_UPDATES, location_update,
};
