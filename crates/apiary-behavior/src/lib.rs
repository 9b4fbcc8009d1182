//! `apiary-behavior` — the forager state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`context`] | `BeeCtx<'_>` — explicit world view passed to every handler |
//! | [`machine`] | `step_bee` and the per-state transition functions          |
//! | [`scent`]   | scent field and the Metropolis-style biased walk           |
//! | [`death`]   | post-activity death checks, in priority order              |
//!
//! # Design notes
//!
//! Each state has its own transition function dispatched over the `BeeState`
//! enum — no per-state trait objects, so the whole automaton is auditable in
//! one file and each transition is testable in isolation.  Handlers receive
//! the world as an explicit [`BeeCtx`] rather than reading ambient state,
//! and the bee's own RNG separately, so a step is a pure function of
//! `(store row, world view, RNG stream)`.
//!
//! Writes land immediately: a bee that deposits nectar or drains a patch is
//! visible to every bee processed after it in the same scheduler step.  That
//! intra-step visibility is part of the model, not an accident.

pub mod context;
pub mod death;
pub mod machine;
pub mod scent;

#[cfg(test)]
mod tests;

pub use context::BeeCtx;
pub use machine::step_bee;
pub use scent::{acceptance_probability, scent_at};
