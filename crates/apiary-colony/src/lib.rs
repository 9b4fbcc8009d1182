//! `apiary-colony` — the entities of the foraging world.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`bees`]   | `BeeState`, `BeeStore` (SoA columns), `BeeRngs`            |
//! | [`hive`]   | `Hive` — nectar stock, feeding, forager maturation         |
//! | [`patch`]  | `Patch`, `PatchStore` — depletable resource registry       |
//! | [`params`] | `BeeParams`, `HiveParams`, `PatchParams`                   |
//!
//! Entities never hold references to each other or to the world — only
//! typed IDs resolved through the owning registry, with an existence check
//! at every dereference.  All behaviour lives in `apiary-behavior`; this
//! crate is state plus the small mutations (`deposit`, `extract`, `feed`)
//! whose arithmetic belongs next to the fields they guard.

pub mod bees;
pub mod hive;
pub mod params;
pub mod patch;


pub use bees::{BeeRngs, BeeState, BeeStore};
pub use hive::Hive;
pub use params::{BeeParams, HiveParams, PatchParams};
pub use patch::{Patch, PatchStepOutcome, PatchStore};
