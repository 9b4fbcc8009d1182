//! The hive: a fixed site holding the colony's nectar stock.
//!
//! The hive's step is two operations in order: feed the hungry bees inside
//! the hive area, then maybe mature one young bee into a new forager.  Both
//! receive their collaborators as explicit arguments — the hive holds no
//! back-reference to the world.

use apiary_core::{BeeId, HiveId, Point2};
use apiary_field::Bounds;

use crate::bees::BeeStore;
use crate::params::HiveParams;

/// A colony's home site and nectar store.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hive {
    pub id: HiveId,
    /// Fixed position, set once at world construction.
    pub pos: Point2,
    /// Radius of the hive area.
    pub radius: f32,
    /// Hard cap on `nectar`.
    pub capacity: f32,
    /// Current stock, always in `[0, capacity]`.
    pub nectar: f32,
    /// Young bees not yet foraging; the maturation pool.
    pub young_bees: u32,
    /// Set when the colony has collapsed (starvation variant); a dead hive
    /// is skipped by every scheduler phase.
    pub dead: bool,
}

impl Hive {
    pub fn new(id: HiveId, pos: Point2, params: &HiveParams) -> Self {
        Self {
            id,
            pos,
            radius: params.radius,
            capacity: params.capacity,
            nectar: params.initial_nectar,
            young_bees: params.initial_young,
            dead: false,
        }
    }

    /// `true` if `pos` lies within the hive area.
    #[inline]
    pub fn is_inside(&self, bounds: &Bounds, pos: Point2) -> bool {
        bounds.distance(self.pos, pos) <= self.radius
    }

    /// Add `amount` to the stock, capped at capacity.  Returns the part
    /// actually stored; overflow is discarded.
    pub fn deposit(&mut self, amount: f32) -> f32 {
        let stored = amount.min(self.capacity - self.nectar).max(0.0);
        self.nectar = (self.nectar + stored).min(self.capacity);
        stored
    }

    /// Feed every hungry resident.
    ///
    /// Visits own-colony bees inside the hive area in ascending `BeeId`
    /// order and tops each one up by at most `feed_rate * dt`, stopping
    /// early when the stock runs dry.  The stock never goes negative.
    pub fn feed_bees(&mut self, bees: &mut BeeStore, bounds: &Bounds, feed_rate: f32, fed_max: f32, dt: f32) {
        let ration = feed_rate * dt;
        if ration <= 0.0 {
            return;
        }
        let residents: Vec<BeeId> = bees
            .live_ids()
            .filter(|&b| {
                bees.home[b.index()] == self.id
                    && bees.fed[b.index()] < fed_max
                    && self.is_inside(bounds, bees.pos[b.index()])
            })
            .collect();

        for bee in residents {
            if self.nectar <= 0.0 {
                break;
            }
            let i = bee.index();
            let transfer = ration.min(fed_max - bees.fed[i]).min(self.nectar);
            bees.fed[i] += transfer;
            self.nectar -= transfer;
        }
        // Guard against f32 drift from repeated subtraction.
        self.nectar = self.nectar.max(0.0);
    }

    /// Attempt to mature one young bee into an adult forager this step.
    ///
    /// Succeeds with probability `p_birth * dt` when a young bee exists and
    /// the stock covers the maturation cost.  Returns `true` on success;
    /// the caller appends the new adult to the store (births go through the
    /// world so RNG streams and registries stay in lock-step).
    pub fn try_mature(&mut self, params: &HiveParams, dt: f32, draw: f64) -> bool {
        if self.young_bees == 0 || self.nectar < params.maturation_cost {
            return false;
        }
        if draw >= (params.p_birth * dt as f64).clamp(0.0, 1.0) {
            return false;
        }
        self.young_bees -= 1;
        self.nectar = (self.nectar - params.maturation_cost).max(0.0);
        true
    }
}
