//! `apiary-core` — foundational types for the apiary foraging simulation.
//!
//! This crate is a dependency of every other `apiary-*` crate.  It
//! intentionally has no `apiary-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`ids`]     | `BeeId`, `HiveId`, `PatchId`                    |
//! | [`point`]   | `Point2`, planar distance                       |
//! | [`time`]    | `Tick`, `SimClock`, `RunConfig`                 |
//! | [`rng`]     | `AgentRng` (per-bee), `SimRng` (world-level)    |
//! | [`error`]   | `ApiaryError`, `ApiaryResult`                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ApiaryError, ApiaryResult};
pub use ids::{BeeId, HiveId, PatchId};
pub use point::Point2;
pub use rng::{AgentRng, SimRng};
pub use time::{RunConfig, SimClock, Tick};
