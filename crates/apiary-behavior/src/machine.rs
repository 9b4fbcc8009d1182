//! `step_bee` and the six per-state transition functions.
//!
//! Transition map (death excluded — see [`crate::death`]):
//!
//! ```text
//! Resting   ─(urge ∝ exp(-perceived/incentive))→ Exploring
//! Exploring ─(extract)→ Carrying   ─(abort·storm)→ Returning
//! Carrying  ─(reach hive, deposit)→ Dancing
//! Dancing   ─(one cycle, recruit audience)→ Resting
//! Following ─(reach patch, extract)→ Carrying
//!           ─(abort·storm)→ Returning
//!           ─(patch vanished)→ Exploring
//! Returning ─(reach hive)→ Resting
//! ```

use apiary_core::{AgentRng, BeeId, PatchId};
use apiary_colony::BeeState;

use crate::{BeeCtx, death, scent};

/// Advance one bee by one step: bookkeeping, the state handler, then the
/// death checks.  The bee may be tombstoned when this returns.
pub fn step_bee(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    debug_assert!(ctx.bees.is_alive(bee), "stepping dead bee {bee}");
    let i = bee.index();

    // Continuous bookkeeping: hunger, ageing, rest cool-down.
    ctx.bees.fed[i] = (ctx.bees.fed[i] - ctx.params.hunger_rate * ctx.dt).max(0.0);
    ctx.bees.age_secs[i] += ctx.dt;
    ctx.bees.rest_timer[i] = (ctx.bees.rest_timer[i] - ctx.dt).max(0.0);

    match ctx.bees.state[i] {
        BeeState::Resting => resting(bee, ctx, rng),
        BeeState::Returning => returning(bee, ctx),
        BeeState::Exploring => exploring(bee, ctx, rng),
        BeeState::Carrying => carrying(bee, ctx),
        BeeState::Dancing => dancing(bee, ctx, rng),
        BeeState::Following => following(bee, ctx, rng),
    }

    death::check(bee, ctx, rng);

    #[cfg(debug_assertions)]
    assert_bee_invariants(bee, ctx);
}

// ── Resting ───────────────────────────────────────────────────────────────────

/// Mill about the hive, keep the nectar estimate fresh, gossip, and weigh
/// the urge to go looking for food.
fn resting(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();
    let (hive_pos, hive_radius, hive_nectar) = {
        let hive = ctx.home_hive(bee);
        (hive.pos, hive.radius, hive.nectar)
    };

    // Random mill confined to the hive area.  A handful of proposals is
    // enough in practice; a bee that drew only outward headings stays put
    // for one step rather than looping forever.
    let step_len = ctx.params.speed_in_hive * ctx.dt;
    for _ in 0..8 {
        let candidate = ctx.bounds.normalize(ctx.bees.pos[i].offset_by(rng.gen_angle(), step_len));
        if ctx.bounds.distance(hive_pos, candidate) <= hive_radius {
            ctx.bees.pos[i] = candidate;
            break;
        }
    }

    let dt = ctx.dt as f64;
    if rng.gen_bool(ctx.params.p_inspect * dt) {
        // Inspect the stores: a noisy sample around the true stock.
        ctx.bees.perceived_nectar[i] = (hive_nectar + rng.gen_range(-1.0..1.0)).max(0.0);
    } else if rng.gen_bool(ctx.params.p_communicate * dt) {
        // Pass the current estimate on to one nest-mate in view.
        let pos = ctx.bees.pos[i];
        let neighbors = ctx.bees.neighbors_within(ctx.bounds, pos, ctx.params.fov, bee);
        if let Some(&other) = rng.choose(&neighbors) {
            ctx.bees.perceived_nectar[other.index()] = ctx.bees.perceived_nectar[i];
        }
    }

    // The urge to explore rises as the perceived stock falls: survival
    // function of an exponential with scale `exploring_incentive`.
    if ctx.bees.rest_timer[i] <= 0.0 {
        let urge =
            (-(ctx.bees.perceived_nectar[i] / ctx.params.exploring_incentive) as f64).exp();
        if rng.gen_bool(urge) {
            ctx.bees.state[i] = BeeState::Exploring;
        }
    }
}

// ── Returning ─────────────────────────────────────────────────────────────────

/// Fly straight home empty-handed; rest on arrival.
fn returning(bee: BeeId, ctx: &mut BeeCtx<'_>) {
    let i = bee.index();
    if ctx.is_in_home_hive(bee) {
        ctx.bees.state[i] = BeeState::Resting;
        ctx.bees.rest_timer[i] = ctx.params.resting_period_secs;
        return;
    }
    let hive_pos = ctx.home_hive(bee).pos;
    let step_len = ctx.params.flight_speed * ctx.dt;
    ctx.bees.pos[i] = ctx.bounds.step_toward(ctx.bees.pos[i], hive_pos, step_len);
}

// ── Exploring ─────────────────────────────────────────────────────────────────

/// Abort check, scent-biased wander, then try the flowers underfoot.
fn exploring(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();
    if rng.gen_bool(abort_probability(ctx)) {
        ctx.bees.state[i] = BeeState::Returning;
        return;
    }
    scent::walk_step(bee, ctx, rng);

    if let Some(patch) = ctx.patch_in_contact(ctx.bees.pos[i]) {
        harvest(bee, patch, ctx);
    }
}

// ── Carrying ──────────────────────────────────────────────────────────────────

/// Haul the load straight home; deposit and start dancing on arrival.
fn carrying(bee: BeeId, ctx: &mut BeeCtx<'_>) {
    let i = bee.index();
    if ctx.is_in_home_hive(bee) {
        let load = std::mem::take(&mut ctx.bees.load[i]);
        let home = ctx.bees.home[i];
        ctx.hives[home.index()].deposit(load);
        ctx.bees.state[i] = BeeState::Dancing;
        return;
    }
    let hive_pos = ctx.home_hive(bee).pos;
    let step_len = ctx.params.flight_speed * ctx.dt;
    ctx.bees.pos[i] = ctx.bounds.step_toward(ctx.bees.pos[i], hive_pos, step_len);
}

// ── Dancing ───────────────────────────────────────────────────────────────────

/// One waggle cycle: every rested nest-mate in view follows the dance with
/// probability `p_follow_dance`, inheriting the remembered patch.  A patch
/// that vanished while the dancer flew home makes the dance moot — no
/// recruitment, straight back to rest.
fn dancing(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();
    let destination = ctx.bees.destination[i];

    if ctx.patches.contains(destination) {
        let pos = ctx.bees.pos[i];
        let audience = ctx.bees.neighbors_within(ctx.bounds, pos, ctx.params.fov, bee);
        for other in audience {
            let j = other.index();
            if ctx.bees.state[j] == BeeState::Resting
                && ctx.bees.rest_timer[j] <= 0.0
                && rng.gen_bool(ctx.params.p_follow_dance)
            {
                ctx.bees.state[j] = BeeState::Following;
                ctx.bees.destination[j] = destination;
            }
        }
    }

    ctx.bees.state[i] = BeeState::Resting;
    ctx.bees.rest_timer[i] = ctx.params.resting_period_secs;
    ctx.bees.destination[i] = PatchId::INVALID;
}

// ── Following ─────────────────────────────────────────────────────────────────

/// Fly toward the communicated patch; harvest on contact.  A destination
/// that no longer exists routes the bee back to searching on its own —
/// it is already out in the field, so exploring beats flying home.
fn following(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();
    let destination = ctx.bees.destination[i];

    let Some((patch_pos, patch_radius)) =
        ctx.patches.get(destination).map(|p| (p.pos, p.radius))
    else {
        ctx.bees.destination[i] = PatchId::INVALID;
        ctx.bees.state[i] = BeeState::Exploring;
        return;
    };

    if rng.gen_bool(abort_probability(ctx)) {
        ctx.bees.destination[i] = PatchId::INVALID;
        ctx.bees.state[i] = BeeState::Returning;
        return;
    }

    if ctx.bounds.distance(ctx.bees.pos[i], patch_pos) <= patch_radius {
        harvest(bee, destination, ctx);
        return;
    }
    let step_len = ctx.params.flight_speed * ctx.dt;
    ctx.bees.pos[i] = ctx.bounds.step_toward(ctx.bees.pos[i], patch_pos, step_len);
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Per-step abort probability, storm-scaled.
fn abort_probability(ctx: &BeeCtx<'_>) -> f64 {
    let mut p = ctx.params.p_abort;
    if ctx.storm {
        p *= ctx.params.storm_abort_factor;
    }
    (p * ctx.dt as f64).clamp(0.0, 1.0)
}

/// Extract from `patch` and switch to `Carrying` on success.  Drains that
/// empty the patch destroy it on the spot; a follower that arrived a beat
/// too late (nothing left to take) goes back to searching.
fn harvest(bee: BeeId, patch_id: PatchId, ctx: &mut BeeCtx<'_>) {
    let i = bee.index();
    let Some(patch) = ctx.patches.get_mut(patch_id) else {
        return;
    };
    let taken = patch.extract(ctx.params.carrying_capacity);
    let depleted = patch.is_depleted();

    if taken > 0.0 {
        ctx.bees.load[i] = taken;
        ctx.bees.destination[i] = patch_id;
        ctx.bees.state[i] = BeeState::Carrying;
    } else if ctx.bees.state[i] == BeeState::Following {
        ctx.bees.destination[i] = PatchId::INVALID;
        ctx.bees.state[i] = BeeState::Exploring;
    }

    if depleted {
        ctx.remove_patch(patch_id);
    }
}

// ── Invariant audit (debug builds only) ───────────────────────────────────────

/// A failed check here is a bug in the state-machine wiring, not a runtime
/// condition — fail fast.
#[cfg(debug_assertions)]
fn assert_bee_invariants(bee: BeeId, ctx: &BeeCtx<'_>) {
    if !ctx.bees.is_alive(bee) {
        return;
    }
    let i = bee.index();
    let state = ctx.bees.state[i];

    if state != BeeState::Carrying {
        debug_assert!(
            ctx.bees.load[i] == 0.0,
            "{bee} has load {} in state {state}",
            ctx.bees.load[i]
        );
    }
    match state {
        BeeState::Carrying | BeeState::Dancing | BeeState::Following => {}
        _ => debug_assert!(
            ctx.bees.destination[i] == PatchId::INVALID,
            "{bee} keeps destination {} in state {state}",
            ctx.bees.destination[i]
        ),
    }
    if state == BeeState::Resting {
        let hive = ctx.home_hive(bee);
        let dist = ctx.bounds.distance(hive.pos, ctx.bees.pos[i]);
        debug_assert!(
            dist <= hive.radius + 1e-3,
            "{bee} rests {dist} from hive centre (radius {})",
            hive.radius
        );
    }
}
