//! `apiary-sim` — the world container and its step loop.
//!
//! # Four-phase step
//!
//! ```text
//! for tick in 0..run.total_steps:
//!   ① Patches  — each live patch, freshly shuffled order:
//!                  replenish, refresh radius, self-remove on depletion.
//!   ② Hives    — each live hive, freshly shuffled order:
//!                  feed hungry residents, maybe mature a young forager,
//!                  optionally collapse on starvation.
//!   ③ Bees     — each live bee, freshly shuffled order:
//!                  state-machine activity, then death checks.
//!   ④ Weather  — advance the storm process.
//! ```
//!
//! Execution is strictly single-threaded and sequential: every agent's step
//! runs to completion before the next begins, and its writes (a deposit, a
//! drained patch) are immediately visible to agents processed later in the
//! same tick.  The only randomness is explicit — per-phase shuffles and
//! weather draws from the world's `SimRng`, behavioural draws from each
//! bee's own `AgentRng` — so a `(seed, config)` pair pins the entire run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`world`]     | `World` — owns every store, drives the step loop      |
//! | [`builder`]   | `WorldBuilder` — validated construction               |
//! | [`weather`]   | `Weather`, `WeatherParams` — the storm process        |
//! | [`placement`] | `PatchPlacement` — random / fixed-distance / clustered|
//! | [`metrics`]   | read-only reporting accessors, `StateCensus`          |
//! | [`observer`]  | `SimObserver` trait, `NoopObserver`                   |
//! | [`error`]     | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use apiary_core::RunConfig;
//! use apiary_sim::{NoopObserver, PatchPlacement, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(RunConfig::default())
//!     .bees_per_hive(200)
//!     .placement(PatchPlacement::Random { count: 8 })
//!     .build()?;
//! world.run(&mut NoopObserver)?;
//! println!("{} bees left", world.live_bee_count());
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod placement;
pub mod weather;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use metrics::StateCensus;
pub use observer::{NoopObserver, SimObserver};
pub use placement::PatchPlacement;
pub use weather::{Weather, WeatherParams};
pub use world::World;
