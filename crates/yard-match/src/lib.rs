//! `yard-match` — job records and the matching rules that create them.
//!
//! Matching is deliberately pure: the functions here scan immutable
//! snapshots and return *candidates* (indices into the caller's queues).
//! The effectful half of an assignment — the confirming re-read of the
//! product, the reservation write, queue surgery — stays in the scheduler,
//! which owns the queues and the platform client.  Both procedures produce
//! at most one match per invocation to keep the per-tick mutation rate
//! bounded and predictable.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`job`]     | `PendingPickJob`, `ActivePickJob`, `ActiveDeliveryJob`|
//! | [`matcher`] | candidate selection + hand-off route sampling         |

pub mod job;
pub mod matcher;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use job::{ActiveDeliveryJob, ActivePickJob, PendingPickJob};
pub use matcher::{HANDOFF_STEPS, delivery_candidate, find_unreserved, handoff_route, pick_candidate};
