//! Death checks, run after every bee's activity handler.
//!
//! Priority order matters for the census: a starving bee caught outside in
//! a storm died of starvation, not of the storm.
//!
//! 1. Starvation — `fed` reached zero.
//! 2. Old age — `age ≥ max_age_secs` (finite caps only).
//! 3. Storm exposure — outside the hive while a storm is active.
//! 4. Outside risk — predation and weather wear on any bee in the field.
//!
//! Death is a normal transition: the row is tombstoned, nothing is raised.

use apiary_core::{AgentRng, BeeId};

use crate::BeeCtx;

/// Apply the death rules to `bee`.  May tombstone the row.
pub fn check(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();

    if ctx.bees.fed[i] <= 0.0 {
        ctx.bees.kill(bee);
        return;
    }

    if ctx.params.max_age_secs.is_finite() && ctx.bees.age_secs[i] >= ctx.params.max_age_secs {
        ctx.bees.kill(bee);
        return;
    }

    if ctx.is_in_home_hive(bee) {
        return;
    }
    let dt = ctx.dt as f64;
    if ctx.storm && rng.gen_bool((ctx.params.p_death_by_storm * dt).clamp(0.0, 1.0)) {
        ctx.bees.kill(bee);
        return;
    }
    if rng.gen_bool((ctx.params.p_death_by_outside_risk * dt).clamp(0.0, 1.0)) {
        ctx.bees.kill(bee);
    }
}
