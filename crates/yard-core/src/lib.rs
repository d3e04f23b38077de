//! `yard-core` — foundational types for the yard warehouse orchestrator.
//!
//! This crate is a dependency of every other `yard-*` crate.  It intentionally
//! has no `yard-*` dependencies and minimal external ones (`serde`, `rand`,
//! `thiserror`, `toml`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `ProviderId`, `TrackableId`, `FenceId`, `Barcode`     |
//! | [`geo`]     | `Coord`, linear interpolation                         |
//! | [`rng`]     | `SimRng` (seedable randomness for order generation)   |
//! | [`config`]  | `OrchestratorConfig` (TOML-loaded runtime settings)   |
//! | [`error`]   | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::OrchestratorConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Coord;
pub use ids::{Barcode, FenceId, ProviderId, TrackableId};
pub use rng::SimRng;
