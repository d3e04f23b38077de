//! `yard-agent` — per-agent stepping state machines.
//!
//! A machine owns nothing but its phase and step index.  Each call to
//! `advance` consumes at most one route step and returns a tagged step
//! telling the caller what to do — emit a movement command, hold, or run a
//! terminal action.  All I/O (location commands, trackable reads/writes)
//! happens in the caller; that split is what makes route replay exactly
//! testable: N coordinates in, N movement steps out, in order.
//!
//! | Module       | Contents                                   |
//! |--------------|--------------------------------------------|
//! | [`truck`]    | `TruckMachine` (outbound / wait / return)  |
//! | [`forklift`] | `ForkliftMachine` (to-pickup / to-dropoff) |

pub mod forklift;
pub mod truck;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use forklift::{ForkliftMachine, ForkliftPhase, ForkliftStep};
pub use truck::{TruckMachine, TruckPhase, TruckStep};
