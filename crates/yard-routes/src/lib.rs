//! `yard-routes` — the static seed tables of the warehouse.
//!
//! Routes are pre-computed coordinate sequences replayed verbatim; ramps,
//! products, and forklift pools are fixed per deployment.  Everything here
//! is loaded once before the scheduler starts and is immutable for the
//! process lifetime.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`table`]  | `RouteTable`, `RampConfig`, `ProductSpec`, `FenceRole`|
//! | [`loader`] | JSON seed-file loading (`load_tables`)                |
//! | [`error`]  | `RouteError`, `RouteResult`                           |

pub mod error;
pub mod loader;
pub mod table;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RouteError, RouteResult};
pub use loader::{SeedTables, load_tables};
pub use table::{FenceRole, ProductSpec, RampConfig, RouteTable};
