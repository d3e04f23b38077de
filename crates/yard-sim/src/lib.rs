//! `yard-sim` — the fixed-period scheduler loop.
//!
//! # Tick anatomy
//!
//! ```text
//! every period (default 100 ms):
//!   ① Events   — drain buffered fence-crossing batches; apply routed
//!                actions in array order (create/delete order trackables,
//!                enqueue jobs, refresh the store snapshot, …).
//!   ② Admit    — move newly available trucks from the inactive pool onto
//!                their outbound routes with fresh randomized orders.
//!   ③ Poll     — if products are transiting, check for deletions (a
//!                deleted trackable means "loaded") and re-derive each
//!                truck's fully-loaded flag.
//!   ④ Match    — at most one new pick assignment and one new delivery
//!                assignment, only when both sides are available.
//!   ⑤ Advance  — step every active agent once; forklift steps run
//!                concurrently and the loop awaits them all (barrier),
//!                then applies queue mutations sequentially from the
//!                collected outcomes.
//! ```
//!
//! Matching always runs before advancement, so a job created in tick N is
//! first advanced in tick N+1.  All queues are owned by [`WarehouseState`]
//! and mutated only between barriers or in the sequential apply phase —
//! never by two in-flight advances.
//!
//! A failed remote call inside one agent's advance rejects only that
//! agent's step: it is logged, nothing is committed, and the unchanged
//! state retries the step on the next tick.
//!
//! | Module        | Contents                                      |
//! |---------------|-----------------------------------------------|
//! | [`state`]     | `WarehouseState`, `ActiveTruck`, admission    |
//! | [`events`]    | fence-action application                      |
//! | [`jobs`]      | the effectful matching protocol               |
//! | [`advance`]   | per-agent stepping + outcome application      |
//! | [`scheduler`] | the `Scheduler` tick driver                   |

pub mod advance;
pub mod error;
pub mod events;
pub mod jobs;
pub mod scheduler;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use scheduler::Scheduler;
pub use state::{ActiveTruck, WarehouseState};
