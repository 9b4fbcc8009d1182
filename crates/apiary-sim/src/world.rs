//! The `World` struct and its step loop.

use apiary_behavior::BeeCtx;
use apiary_colony::{BeeParams, BeeRngs, BeeState, BeeStore, Hive, HiveParams, PatchParams, PatchStepOutcome, PatchStore};
use apiary_core::{BeeId, HiveId, PatchId, Point2, RunConfig, SimClock, SimRng, Tick};
use apiary_field::{Bounds, SiteIndex};

use crate::weather::Weather;
use crate::{SimObserver, SimResult};

/// The simulation world: every store, the clock, the weather, and the root
/// RNG, advanced one four-phase step at a time.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].  Fields are `pub` where
/// external drivers legitimately reach in (reporting, visualization);
/// mutation should go through [`step`](Self::step) only.
pub struct World {
    /// Run-level configuration (step count, seed, dt, snapshot interval).
    pub run: RunConfig,

    /// Step counter and dt bookkeeping.
    pub clock: SimClock,

    /// The foraging plane.
    pub bounds: Bounds,

    // ── Parameter tables (immutable after construction) ───────────────────
    pub bee_params: BeeParams,
    pub hive_params: HiveParams,
    pub patch_params: PatchParams,

    // ── Agent stores ──────────────────────────────────────────────────────
    pub bees: BeeStore,
    pub rngs: BeeRngs,
    /// All hives, indexed by `HiveId`.  Collapsed hives stay as tombstones.
    pub hives: Vec<Hive>,
    pub patches: PatchStore,
    /// Spatial index over patch positions, kept in sync with `patches`.
    pub sites: SiteIndex,

    /// The storm process.
    pub weather: Weather,

    /// World-level RNG: phase shuffles, weather draws, maturation draws.
    pub(crate) rng: SimRng,

    /// Extraction counters inherited from destroyed patches.
    pub(crate) extracted_retired: f32,
    /// Bees ever created (founders included).
    pub(crate) total_born: u64,
    /// Bees removed by any death rule or colony collapse.
    pub(crate) total_died: u64,
}

impl World {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step to `run.end_tick()`, with observer hooks
    /// at every step boundary.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let now = self.clock.current_tick;
            if now >= self.run.end_tick() {
                break;
            }
            observer.on_step_start(now);
            self.step();
            observer.on_step_end(now, self);
            if self.run.snapshot_interval_steps > 0
                && now.0.is_multiple_of(self.run.snapshot_interval_steps)
            {
                observer.on_snapshot(now, self);
            }
        }
        observer.on_run_end(self.clock.current_tick, self);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_step_start(now);
            self.step();
            observer.on_step_end(now, self);
            if self.run.snapshot_interval_steps > 0
                && now.0.is_multiple_of(self.run.snapshot_interval_steps)
            {
                observer.on_snapshot(now, self);
            }
        }
        Ok(())
    }

    /// One step: patches, hives, bees — each in a freshly shuffled order —
    /// then the weather, then the counter.
    pub fn step(&mut self) {
        let dt = self.clock.dt_secs;
        let now = self.clock.current_tick;

        self.step_patches(dt, now);
        self.step_hives(dt);
        self.step_bees(dt);
        self.weather.step(dt, &mut self.rng, now);

        self.clock.advance();
    }

    // ── Phase 1: patches ──────────────────────────────────────────────────

    fn step_patches(&mut self, dt: f32, now: Tick) {
        let mut order: Vec<PatchId> = self.patches.ids().collect();
        self.rng.shuffle(&mut order);
        for id in order {
            let Some(patch) = self.patches.get_mut(id) else {
                continue;
            };
            if patch.step(dt) == PatchStepOutcome::Depleted {
                self.remove_patch(id, now);
            }
        }
    }

    fn remove_patch(&mut self, id: PatchId, now: Tick) {
        if let Some(patch) = self.patches.remove(id) {
            self.sites.remove(id, patch.pos);
            self.extracted_retired += patch.extracted_total;
            tracing::debug!(tick = %now, patch = %id, "patch exhausted and removed");
        }
    }

    // ── Phase 2: hives ────────────────────────────────────────────────────

    fn step_hives(&mut self, dt: f32) {
        let mut order: Vec<usize> = (0..self.hives.len()).collect();
        self.rng.shuffle(&mut order);

        for h in order {
            if self.hives[h].dead {
                continue;
            }

            self.hives[h].feed_bees(
                &mut self.bees,
                &self.bounds,
                self.hive_params.feed_rate,
                self.bee_params.fed_max,
                dt,
            );

            let draw: f64 = self.rng.gen_range(0.0..1.0);
            let matured = self.hives[h].try_mature(&self.hive_params, dt, draw);
            if matured {
                let (id, pos) = (self.hives[h].id, self.hives[h].pos);
                self.spawn_bee(id, pos);
            }

            if self.hive_params.collapse_on_starvation && self.hives[h].nectar <= 0.0 {
                self.collapse_hive(h);
            }
        }
    }

    /// Append a new adult bee at `pos` belonging to `hive`, with its birth
    /// draws (scent-bias trait, first nectar estimate) taken from its own
    /// fresh RNG stream.
    pub(crate) fn spawn_bee(&mut self, hive: HiveId, pos: Point2) -> BeeId {
        let id = self.bees.push(hive, pos, self.bee_params.fed_max, 0.0);
        let rng_id = self.rngs.push();
        debug_assert_eq!(id, rng_id, "bee store and RNG store out of lock-step");

        let rng = self.rngs.get_mut(id);
        let bias = rng.gen_clipped_gaussian(
            self.bee_params.scent_bias_mean,
            self.bee_params.scent_bias_sd,
            0.0,
        );
        let noise: f32 = rng.gen_range(-1.0..1.0);
        self.bees.scent_bias[id.index()] = bias;
        self.bees.perceived_nectar[id.index()] =
            (self.hives[hive.index()].nectar + noise).max(0.0);

        self.total_born += 1;
        id
    }

    /// Starvation-collapse variant: the hive dies and takes every resident
    /// with it.
    fn collapse_hive(&mut self, h: usize) {
        let hive_id = self.hives[h].id;
        self.hives[h].dead = true;

        let residents: Vec<BeeId> = self
            .bees
            .live_ids()
            .filter(|&b| self.bees.home[b.index()] == hive_id)
            .collect();
        let lost = residents.len();
        for bee in residents {
            self.bees.kill(bee);
            self.total_died += 1;
        }
        tracing::warn!(hive = %hive_id, lost, "colony collapsed from starvation");
    }

    // ── Phase 3: bees ─────────────────────────────────────────────────────

    fn step_bees(&mut self, dt: f32) {
        let mut order: Vec<BeeId> = self.bees.live_ids().collect();
        self.rng.shuffle(&mut order);

        let storm = self.weather.is_storm();
        // Upper bound for the R-tree contact query; patch radii only shrink
        // during the bee phase, so this stays valid for the whole phase.
        let max_patch_radius = self.patches.iter().map(|p| p.radius).fold(0.0, f32::max);

        for bee in order {
            if !self.bees.is_alive(bee) {
                continue;
            }
            let mut ctx = BeeCtx {
                bounds: &self.bounds,
                bees: &mut self.bees,
                hives: &mut self.hives,
                patches: &mut self.patches,
                sites: &mut self.sites,
                storm,
                dt,
                params: &self.bee_params,
                max_patch_radius,
                extracted_retired: &mut self.extracted_retired,
            };
            apiary_behavior::step_bee(bee, &mut ctx, self.rngs.get_mut(bee));

            if !self.bees.is_alive(bee) {
                self.total_died += 1;
            }
        }
    }

    // ── Invariant audit ───────────────────────────────────────────────────

    /// Verify the whole-world invariant set; used by tests after every step
    /// and available to paranoid drivers.  A violation is a wiring bug.
    pub fn check_invariants(&self) -> Result<(), String> {
        for hive in &self.hives {
            if !(hive.nectar >= 0.0 && hive.nectar <= hive.capacity) {
                return Err(format!(
                    "hive {} stock {} outside [0, {}]",
                    hive.id, hive.nectar, hive.capacity
                ));
            }
        }
        for patch in self.patches.iter() {
            if patch.quantity < 0.0 {
                return Err(format!("patch {} quantity {} negative", patch.id, patch.quantity));
            }
        }
        for bee in self.bees.live_ids() {
            let i = bee.index();
            let state = self.bees.state[i];
            if state != BeeState::Carrying && self.bees.load[i] != 0.0 {
                return Err(format!("{bee} carries {} in state {state}", self.bees.load[i]));
            }
            let may_remember = matches!(
                state,
                BeeState::Carrying | BeeState::Dancing | BeeState::Following
            );
            if !may_remember && self.bees.destination[i] != PatchId::INVALID {
                return Err(format!("{bee} remembers a patch in state {state}"));
            }
            if state == BeeState::Resting {
                let hive = &self.hives[self.bees.home[i].index()];
                let dist = self.bounds.distance(hive.pos, self.bees.pos[i]);
                if dist > hive.radius + 1e-3 {
                    return Err(format!("{bee} rests {dist} from hive {} centre", hive.id));
                }
            }
            let fed = self.bees.fed[i];
            if !(0.0..=self.bee_params.fed_max).contains(&fed) {
                return Err(format!("{bee} fed level {fed} out of range"));
            }
        }
        Ok(())
    }
}
