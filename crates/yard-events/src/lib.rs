//! `yard-events` — turns raw fence-crossing notifications into actions.
//!
//! The router is pure: it classifies each notification against the static
//! [`RouteTable`] and returns tagged [`FenceAction`]s for the scheduler to
//! apply.  Notifications are independent; the output preserves input array
//! order and one notification may yield more than one action (a crossing
//! can carry both a trackable and a known truck provider).

pub mod router;

#[cfg(test)]
mod tests;

pub use router::{FenceAction, route_events};
