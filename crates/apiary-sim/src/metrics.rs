//! Read-only reporting accessors.
//!
//! The data-collection boundary of the core: external reporters read these
//! after each step; no file I/O happens here.

use apiary_colony::BeeState;
use apiary_core::HiveId;

use crate::World;

/// Live-population counts per state, in [`BeeState::ALL`] order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StateCensus {
    pub counts: [usize; 6],
}

impl StateCensus {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn count(&self, state: BeeState) -> usize {
        let slot = BeeState::ALL.iter().position(|&s| s == state).unwrap();
        self.counts[slot]
    }

    /// Share of the live population in `state`; 0 for an empty colony.
    pub fn proportion(&self, state: BeeState) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(state) as f64 / total as f64
    }

    /// All six proportions in [`BeeState::ALL`] order.
    pub fn proportions(&self) -> [f64; 6] {
        let total = self.total();
        if total == 0 {
            return [0.0; 6];
        }
        self.counts.map(|c| c as f64 / total as f64)
    }
}

impl World {
    /// Steps completed so far.
    pub fn step_count(&self) -> u64 {
        self.clock.current_tick.0
    }

    pub fn live_bee_count(&self) -> usize {
        self.bees.live_count()
    }

    pub fn live_patch_count(&self) -> usize {
        self.patches.len()
    }

    pub fn state_census(&self) -> StateCensus {
        StateCensus { counts: self.bees.census() }
    }

    /// Mean of every live bee's private nectar estimate; 0 for an empty
    /// colony.
    pub fn mean_perceived_nectar(&self) -> f32 {
        let n = self.bees.live_count();
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.bees.live_ids().map(|b| self.bees.perceived_nectar[b.index()]).sum();
        sum / n as f32
    }

    /// Mean hunger level across the live population; 0 for an empty colony.
    pub fn mean_fed(&self) -> f32 {
        let n = self.bees.live_count();
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.bees.live_ids().map(|b| self.bees.fed[b.index()]).sum();
        sum / n as f32
    }

    /// Stock of one hive, or `None` for an unknown ID.
    pub fn hive_nectar(&self, hive: HiveId) -> Option<f32> {
        self.hives.get(hive.index()).map(|h| h.nectar)
    }

    /// Combined stock of all live hives.
    pub fn total_nectar(&self) -> f32 {
        self.hives.iter().filter(|h| !h.dead).map(|h| h.nectar).sum()
    }

    /// Cumulative nectar extracted from all patches over the run, including
    /// patches that have since been destroyed.
    pub fn extracted_total(&self) -> f32 {
        self.extracted_retired + self.patches.extracted_live_total()
    }

    pub fn is_storm(&self) -> bool {
        self.weather.is_storm()
    }

    /// Bees ever created, founding population included.
    pub fn total_born(&self) -> u64 {
        self.total_born
    }

    /// Bees removed by death rules or colony collapse.
    pub fn total_died(&self) -> u64 {
        self.total_died
    }
}
