//! `apiary-field` — the bounded 2-D plane the colony forages over.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`bounds`] | `Bounds` — world extent, clamping/wrapping, distance      |
//! | [`index`]  | `SiteIndex` — R-tree over fixed sites (resource patches)  |
//! | [`error`]  | `FieldError`, `FieldResult<T>`                            |
//!
//! Mobile agents (bees) are *not* indexed here: their positions change every
//! step and their neighbour queries are answered by a brute-force scan over
//! the live population, which is both exact and cheap at colony scale.  The
//! index covers only sites whose position is fixed for their lifetime.

pub mod bounds;
pub mod error;
pub mod index;


pub use bounds::Bounds;
pub use error::{FieldError, FieldResult};
pub use index::SiteIndex;
