//! Unit tests for the forager state machine.

use apiary_core::{BeeId, HiveId, PatchId, Point2};
use apiary_colony::{BeeParams, BeeRngs, BeeState, BeeStore, Hive, HiveParams, PatchParams, PatchStore};
use apiary_field::{Bounds, SiteIndex};

use crate::{BeeCtx, acceptance_probability, scent_at, step_bee};

// ── Fixture ───────────────────────────────────────────────────────────────────

const HIVE_POS: Point2 = Point2 { x: 100.0, y: 100.0 };

/// A one-hive world with every stochastic rate zeroed; individual tests
/// switch on exactly the behaviour they probe.
struct Fixture {
    bounds: Bounds,
    bees: BeeStore,
    rngs: BeeRngs,
    hives: Vec<Hive>,
    patches: PatchStore,
    sites: SiteIndex,
    params: BeeParams,
    storm: bool,
    retired: f32,
}

impl Fixture {
    fn new() -> Self {
        let hive_params = HiveParams {
            radius: 5.0,
            capacity: 20.0,
            initial_nectar: 5.0,
            ..HiveParams::default()
        };
        Self {
            bounds: Bounds::square(200.0).unwrap(),
            bees: BeeStore::new(),
            rngs: BeeRngs::new(0, 42),
            hives: vec![Hive::new(HiveId(0), HIVE_POS, &hive_params)],
            patches: PatchStore::new(),
            sites: SiteIndex::new(),
            params: BeeParams {
                p_inspect: 0.0,
                p_communicate: 0.0,
                p_abort: 0.0,
                p_death_by_storm: 0.0,
                p_death_by_outside_risk: 0.0,
                ..BeeParams::default()
            },
            storm: false,
            retired: 0.0,
        }
    }

    fn add_bee(&mut self, pos: Point2) -> BeeId {
        let id = self.bees.push(HiveId(0), pos, 1.0, 9.0);
        let rng_id = self.rngs.push();
        assert_eq!(id, rng_id);
        id
    }

    fn add_patch(&mut self, pos: Point2, quantity: f32, params: &PatchParams) -> PatchId {
        let id = self.patches.insert(pos, quantity, params);
        self.sites.insert(id, pos);
        id
    }

    fn step(&mut self, bee: BeeId) {
        let max_patch_radius = self.patches.iter().map(|p| p.radius).fold(0.0, f32::max);
        let mut ctx = BeeCtx {
            bounds: &self.bounds,
            bees: &mut self.bees,
            hives: &mut self.hives,
            patches: &mut self.patches,
            sites: &mut self.sites,
            storm: self.storm,
            dt: 1.0,
            params: &self.params,
            max_patch_radius,
            extracted_retired: &mut self.retired,
        };
        step_bee(bee, &mut ctx, self.rngs.get_mut(bee));
    }
}

// ── Scent field ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod scent_field {
    use super::*;

    #[test]
    fn scent_falls_off_with_distance() {
        let mut fx = Fixture::new();
        fx.add_patch(Point2::new(50.0, 50.0), 100.0, &PatchParams::default());
        let near = scent_at(&fx.patches, &fx.bounds, Point2::new(52.0, 50.0));
        let far = scent_at(&fx.patches, &fx.bounds, Point2::new(80.0, 50.0));
        assert!(near > far, "near {near} vs far {far}");
    }

    #[test]
    fn scent_sums_over_patches() {
        let mut fx = Fixture::new();
        let probe = Point2::new(50.0, 50.0);
        fx.add_patch(Point2::new(40.0, 50.0), 100.0, &PatchParams::default());
        let one = scent_at(&fx.patches, &fx.bounds, probe);
        fx.add_patch(Point2::new(60.0, 50.0), 100.0, &PatchParams::default());
        let two = scent_at(&fx.patches, &fx.bounds, probe);
        assert!((two - 2.0 * one).abs() < one * 1e-6, "symmetric patches double the scent");
    }

    #[test]
    fn improving_candidate_always_accepted() {
        // Deterministic regardless of the draw: probability is exactly 1.
        for bias in [0.0_f32, 1.0, 9.0, 100.0] {
            assert_eq!(acceptance_probability(0.5, 0.5, bias), 1.0);
            assert_eq!(acceptance_probability(0.5, 0.7, bias), 1.0);
        }
    }

    #[test]
    fn losing_candidate_penalized_by_bias() {
        let lax = acceptance_probability(1.0, 0.5, 0.0);
        let strict = acceptance_probability(1.0, 0.5, 9.0);
        assert!((lax - 0.5).abs() < 1e-12);
        assert!((strict - 0.05).abs() < 1e-12);
        assert!(strict < lax);
    }
}

// ── Resting ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resting {
    use super::*;

    #[test]
    fn empty_stores_send_a_rested_bee_out() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(HIVE_POS);
        // perceived_nectar starts at 0 → urge = exp(0) = 1.
        fx.step(bee);
        assert_eq!(fx.bees.state[bee.index()], BeeState::Exploring);
    }

    #[test]
    fn cooldown_keeps_the_bee_home() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.rest_timer[bee.index()] = 10.0;
        fx.step(bee);
        assert_eq!(fx.bees.state[bee.index()], BeeState::Resting);
        assert!((fx.bees.rest_timer[bee.index()] - 9.0).abs() < 1e-6);
    }

    #[test]
    fn a_full_hive_holds_the_bee_back() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.perceived_nectar[bee.index()] = 1_000.0; // urge ≈ exp(-500) ≈ 0
        for _ in 0..200 {
            fx.step(bee);
            assert_eq!(fx.bees.state[bee.index()], BeeState::Resting);
        }
    }

    #[test]
    fn mill_stays_within_hive_radius() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.perceived_nectar[bee.index()] = 1_000.0;
        for _ in 0..500 {
            fx.step(bee);
            let d = fx.bounds.distance(HIVE_POS, fx.bees.pos[bee.index()]);
            assert!(d <= 5.0 + 1e-3, "resting bee drifted {d} from the hive");
        }
    }

    #[test]
    fn inspection_tracks_true_stock_with_bounded_noise() {
        let mut fx = Fixture::new();
        fx.params.p_inspect = 1.0;
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.perceived_nectar[bee.index()] = 1_000.0;
        fx.step(bee);
        let perceived = fx.bees.perceived_nectar[bee.index()];
        assert!(
            (perceived - 5.0).abs() <= 1.0,
            "sample {perceived} not within ±1 of true stock 5.0"
        );
    }

    #[test]
    fn gossip_copies_estimate_to_one_neighbor() {
        let mut fx = Fixture::new();
        fx.params.p_communicate = 1.0;
        let talker = fx.add_bee(HIVE_POS);
        let listener = fx.add_bee(Point2::new(100.3, 100.0));
        fx.bees.perceived_nectar[talker.index()] = 7.5;
        fx.bees.perceived_nectar[listener.index()] = 1_000.0;
        fx.bees.rest_timer[talker.index()] = 10.0; // keep the talker home
        fx.step(talker);
        assert_eq!(fx.bees.perceived_nectar[listener.index()], 7.5);
    }
}

// ── Foraging round trip ───────────────────────────────────────────────────────

#[cfg(test)]
mod foraging {
    use super::*;

    #[test]
    fn explorer_harvests_on_contact() {
        let mut fx = Fixture::new();
        let patch = fx.add_patch(Point2::new(50.0, 50.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(50.0, 50.0));
        fx.bees.state[bee.index()] = BeeState::Exploring;

        fx.step(bee);
        let i = bee.index();
        assert_eq!(fx.bees.state[i], BeeState::Carrying);
        assert_eq!(fx.bees.load[i], fx.params.carrying_capacity);
        assert_eq!(fx.bees.destination[i], patch);
        let remaining = fx.patches.get(patch).unwrap().quantity;
        assert!((remaining - (100.0 - fx.params.carrying_capacity)).abs() < 1e-4);
    }

    #[test]
    fn carrier_flies_home_and_deposits() {
        let mut fx = Fixture::new();
        let patch = fx.add_patch(Point2::new(120.0, 100.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(110.0, 100.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Carrying;
        fx.bees.load[i] = 0.005;
        fx.bees.destination[i] = patch;

        let before = fx.hives[0].nectar;
        // 10 units to cover at 5 units/step, hive radius 5: arrival on step 1,
        // deposit on step 2's entry check.
        for _ in 0..3 {
            fx.step(bee);
            if fx.bees.state[i] == BeeState::Dancing {
                break;
            }
        }
        assert_eq!(fx.bees.state[i], BeeState::Dancing);
        assert_eq!(fx.bees.load[i], 0.0);
        assert!((fx.hives[0].nectar - (before + 0.005)).abs() < 1e-5);
    }

    #[test]
    fn deposit_is_capped_at_hive_capacity() {
        let mut fx = Fixture::new();
        fx.hives[0].nectar = 19.999;
        let patch = fx.add_patch(Point2::new(120.0, 100.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(HIVE_POS);
        let i = bee.index();
        fx.bees.state[i] = BeeState::Carrying;
        fx.bees.load[i] = 0.005;
        fx.bees.destination[i] = patch;

        fx.step(bee);
        assert_eq!(fx.bees.state[i], BeeState::Dancing);
        assert!(fx.hives[0].nectar <= 20.0, "stock must not exceed capacity");
        assert!((fx.hives[0].nectar - 20.0).abs() < 1e-4);
    }

    #[test]
    fn returning_bee_arrives_and_rests() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(Point2::new(112.0, 100.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Returning;
        fx.bees.perceived_nectar[i] = 1_000.0; // don't immediately re-launch

        for _ in 0..4 {
            fx.step(bee);
        }
        assert_eq!(fx.bees.state[i], BeeState::Resting);
        assert_eq!(fx.bees.rest_timer[i], fx.params.resting_period_secs - 1.0);
        assert!(fx.bounds.distance(HIVE_POS, fx.bees.pos[i]) <= 5.0 + 1e-3);
    }
}

// ── Recruitment ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod recruitment {
    use super::*;

    #[test]
    fn dancer_recruits_rested_audience() {
        let mut fx = Fixture::new();
        fx.params.p_follow_dance = 1.0;
        let patch = fx.add_patch(Point2::new(150.0, 100.0), 100.0, &PatchParams::default());
        let dancer = fx.add_bee(HIVE_POS);
        let rested = fx.add_bee(Point2::new(100.5, 100.0));
        let tired = fx.add_bee(Point2::new(100.0, 100.5));
        fx.bees.state[dancer.index()] = BeeState::Dancing;
        fx.bees.destination[dancer.index()] = patch;
        fx.bees.rest_timer[tired.index()] = 10.0;

        fx.step(dancer);
        assert_eq!(fx.bees.state[rested.index()], BeeState::Following);
        assert_eq!(fx.bees.destination[rested.index()], patch);
        assert_eq!(fx.bees.state[tired.index()], BeeState::Resting, "cooldown blocks recruitment");

        // One cycle and the dance is over.
        let d = dancer.index();
        assert_eq!(fx.bees.state[d], BeeState::Resting);
        assert_eq!(fx.bees.destination[d], PatchId::INVALID);
        assert_eq!(fx.bees.rest_timer[d], fx.params.resting_period_secs);
    }

    #[test]
    fn dance_for_a_vanished_patch_recruits_no_one() {
        let mut fx = Fixture::new();
        fx.params.p_follow_dance = 1.0;
        let patch = fx.add_patch(Point2::new(150.0, 100.0), 100.0, &PatchParams::default());
        let dancer = fx.add_bee(HIVE_POS);
        let rested = fx.add_bee(Point2::new(100.5, 100.0));
        fx.bees.state[dancer.index()] = BeeState::Dancing;
        fx.bees.destination[dancer.index()] = patch;

        fx.patches.remove(patch);
        fx.step(dancer);
        assert_eq!(fx.bees.state[rested.index()], BeeState::Resting);
        assert_eq!(fx.bees.state[dancer.index()], BeeState::Resting);
    }

    #[test]
    fn follower_reaches_patch_and_harvests() {
        let mut fx = Fixture::new();
        let patch = fx.add_patch(Point2::new(60.0, 50.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(50.0, 50.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Following;
        fx.bees.destination[i] = patch;

        // 10 units away, radius 5, speed 5: in contact range after one step.
        fx.step(bee);
        assert_eq!(fx.bees.state[i], BeeState::Following);
        fx.step(bee);
        assert_eq!(fx.bees.state[i], BeeState::Carrying);
        assert_eq!(fx.bees.load[i], fx.params.carrying_capacity);
    }

    #[test]
    fn follower_reroutes_to_exploring_when_patch_vanishes() {
        let mut fx = Fixture::new();
        let patch = fx.add_patch(Point2::new(60.0, 50.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(50.0, 50.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Following;
        fx.bees.destination[i] = patch;

        fx.patches.remove(patch);
        fx.step(bee);
        assert_eq!(fx.bees.state[i], BeeState::Exploring);
        assert_eq!(fx.bees.destination[i], PatchId::INVALID);
    }

    #[test]
    fn follower_aborts_under_certain_storm_odds() {
        let mut fx = Fixture::new();
        fx.params.p_abort = 0.2;
        fx.params.storm_abort_factor = 5.0; // 0.2 × 5 × dt = certainty
        fx.storm = true;
        let patch = fx.add_patch(Point2::new(60.0, 50.0), 100.0, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(50.0, 50.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Following;
        fx.bees.destination[i] = patch;

        fx.step(bee);
        assert_eq!(fx.bees.state[i], BeeState::Returning);
        assert_eq!(fx.bees.destination[i], PatchId::INVALID);
    }

    #[test]
    fn final_drain_destroys_the_patch() {
        let mut fx = Fixture::new();
        let patch = fx.add_patch(Point2::new(50.0, 50.0), 0.004, &PatchParams::default());
        let bee = fx.add_bee(Point2::new(50.0, 50.0));
        let i = bee.index();
        fx.bees.state[i] = BeeState::Following;
        fx.bees.destination[i] = patch;

        fx.step(bee);
        // Partial load: the patch held less than one carrying capacity.
        assert_eq!(fx.bees.state[i], BeeState::Carrying);
        assert!((fx.bees.load[i] - 0.004).abs() < 1e-6);
        assert!(fx.patches.get(patch).is_none(), "drained patch must be destroyed");
        assert!(fx.sites.is_empty(), "index entry must go with it");
        assert!((fx.retired - 0.004).abs() < 1e-6, "counter survives removal");
    }
}

// ── Death ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod death {
    use super::*;

    #[test]
    fn starvation_kills() {
        let mut fx = Fixture::new();
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.fed[bee.index()] = 1e-9; // drained by this step's hunger
        fx.bees.perceived_nectar[bee.index()] = 1_000.0;
        fx.step(bee);
        assert!(!fx.bees.is_alive(bee));
    }

    #[test]
    fn old_age_kills() {
        let mut fx = Fixture::new();
        fx.params.max_age_secs = 100.0;
        let bee = fx.add_bee(HIVE_POS);
        fx.bees.age_secs[bee.index()] = 99.5;
        fx.bees.perceived_nectar[bee.index()] = 1_000.0;
        fx.step(bee);
        assert!(!fx.bees.is_alive(bee));
    }

    #[test]
    fn storm_kills_only_outside_the_hive() {
        let mut fx = Fixture::new();
        fx.params.p_death_by_storm = 1.0;
        fx.storm = true;

        let inside = fx.add_bee(HIVE_POS);
        fx.bees.perceived_nectar[inside.index()] = 1_000.0;
        fx.step(inside);
        assert!(fx.bees.is_alive(inside), "hive shelters from the storm");

        let outside = fx.add_bee(Point2::new(20.0, 20.0));
        fx.bees.state[outside.index()] = BeeState::Returning;
        fx.step(outside);
        assert!(!fx.bees.is_alive(outside));
    }

    #[test]
    fn outside_risk_applies_in_fair_weather() {
        let mut fx = Fixture::new();
        fx.params.p_death_by_outside_risk = 1.0;
        let bee = fx.add_bee(Point2::new(20.0, 20.0));
        fx.bees.state[bee.index()] = BeeState::Exploring;
        fx.step(bee);
        assert!(!fx.bees.is_alive(bee));
    }
}
