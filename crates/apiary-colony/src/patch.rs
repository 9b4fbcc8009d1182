//! Resource patches and their registry.
//!
//! A patch is a fixed point with a depletable nectar quantity.  Its
//! interaction radius shrinks with the square root of the remaining
//! fraction, so a nearly-drained patch is also nearly invisible:
//!
//!   radius = sqrt(quantity / base_quantity) * base_radius
//!
//! Persistent patches model an inexhaustible source: extraction hands out
//! the requested amount without touching the quantity.
//!
//! `PatchStore` is a slot registry.  Slots are freed on depletion but never
//! reused, so a `PatchId` held by a bee (its dance destination) stays
//! unambiguous for the whole run — a freed slot simply answers `None` and
//! the bee falls back to searching.

use apiary_core::{PatchId, Point2};

use crate::params::PatchParams;

// ── Patch ─────────────────────────────────────────────────────────────────────

/// What a patch's step decided about its own fate.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PatchStepOutcome {
    Alive,
    /// Quantity hit zero on a non-persistent patch; the world must free the
    /// registry slot and drop the spatial-index entry.
    Depleted,
}

/// A nectar source in the field.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    pub id: PatchId,
    /// Fixed position, set once at placement.
    pub pos: Point2,
    /// Remaining nectar mass; never negative.
    pub quantity: f32,
    /// Reference quantity for the radius formula.
    pub base_quantity: f32,
    /// Radius at `base_quantity`.
    pub base_radius: f32,
    /// Current interaction radius, derived from `quantity`.
    pub radius: f32,
    /// `true` = inexhaustible.
    pub persistent: bool,
    /// Regrowth per second (non-persistent patches only).
    pub replenish_rate: f32,
    /// Cumulative nectar handed out over the patch's lifetime (a reporting
    /// counter; persistent patches accumulate it too).
    pub extracted_total: f32,
}

impl Patch {
    pub fn new(id: PatchId, pos: Point2, quantity: f32, params: &PatchParams) -> Self {
        let mut patch = Self {
            id,
            pos,
            quantity,
            base_quantity: params.base_quantity,
            base_radius: params.base_radius,
            radius: 0.0,
            persistent: params.persistent,
            replenish_rate: params.replenish_rate,
            extracted_total: 0.0,
        };
        patch.recompute_radius();
        patch
    }

    fn recompute_radius(&mut self) {
        self.radius = (self.quantity.max(0.0) / self.base_quantity).sqrt() * self.base_radius;
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        !self.persistent && self.quantity <= 0.0
    }

    /// One scheduler step: regrow, refresh the radius, report depletion.
    pub fn step(&mut self, dt: f32) -> PatchStepOutcome {
        if !self.persistent && self.replenish_rate > 0.0 {
            self.quantity += self.replenish_rate * dt;
        }
        self.recompute_radius();
        if self.is_depleted() {
            PatchStepOutcome::Depleted
        } else {
            PatchStepOutcome::Alive
        }
    }

    /// Take up to `amount` nectar.  Returns the mass actually extracted.
    ///
    /// Persistent patches always hand out the full `amount`.  Non-persistent
    /// patches hand out `min(quantity, amount)` — the last forager at a
    /// nearly-empty patch flies home with a partial load, and the quantity
    /// never goes negative.
    pub fn extract(&mut self, amount: f32) -> f32 {
        debug_assert!(amount >= 0.0, "negative extraction request");
        if self.persistent {
            self.extracted_total += amount;
            return amount;
        }
        let taken = self.quantity.min(amount);
        self.quantity -= taken;
        self.extracted_total += taken;
        self.recompute_radius();
        taken
    }
}

// ── PatchStore ────────────────────────────────────────────────────────────────

/// Slot registry of all patches ever placed.  `PatchId` = slot index.
#[derive(Default)]
pub struct PatchStore {
    slots: Vec<Option<Patch>>,
    live_count: usize,
}

impl PatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new patch and return its ID.
    pub fn insert(&mut self, pos: Point2, quantity: f32, params: &PatchParams) -> PatchId {
        let id = PatchId(self.slots.len() as u32);
        self.slots.push(Some(Patch::new(id, pos, quantity, params)));
        self.live_count += 1;
        id
    }

    /// Existence-checked lookup — `None` for freed slots and foreign IDs.
    #[inline]
    pub fn get(&self, id: PatchId) -> Option<&Patch> {
        self.slots.get(id.index()).and_then(|s| s.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: PatchId) -> Option<&mut Patch> {
        self.slots.get_mut(id.index()).and_then(|s| s.as_mut())
    }

    #[inline]
    pub fn contains(&self, id: PatchId) -> bool {
        self.get(id).is_some()
    }

    /// Free a slot, returning the removed patch (e.g. for its final
    /// position and counters).
    pub fn remove(&mut self, id: PatchId) -> Option<Patch> {
        let removed = self.slots.get_mut(id.index()).and_then(|s| s.take());
        if removed.is_some() {
            self.live_count -= 1;
        }
        removed
    }

    /// Number of live patches.
    pub fn len(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// IDs of all live patches in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PatchId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| PatchId(i as u32))
    }

    /// All live patches.
    pub fn iter(&self) -> impl Iterator<Item = &Patch> + '_ {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Cumulative nectar extracted from the patches still alive.  The world
    /// adds a removed patch's counter to its own retired total when it
    /// frees the slot, so the run-wide metric is `retired + live`.
    pub fn extracted_live_total(&self) -> f32 {
        self.iter().map(|p| p.extracted_total).sum()
    }
}
