//! The scent field and the Metropolis-style biased walk.
//!
//! Scent at a point is the inverse-square attraction summed over all live
//! patches:
//!
//!   scent(p) = Σ  quantity_i / (dist(p, patch_i)² + ε)
//!
//! An exploring bee proposes a uniformly random step and accepts it
//! unconditionally when it does not lose scent; a scent-losing step is
//! accepted with probability `new / (cur · (1 + bias))`, where `bias ≥ 0`
//! is the bee's fixed scent-bias trait.  Higher bias, stickier climbing.

use apiary_core::{AgentRng, BeeId, Point2};
use apiary_colony::PatchStore;
use apiary_field::Bounds;

use crate::BeeCtx;

/// Keeps the denominator finite when a bee stands exactly on a patch.
const EPSILON: f64 = 1e-12;

/// Aggregate attractiveness of `pos` given all live patches.
pub fn scent_at(patches: &PatchStore, bounds: &Bounds, pos: Point2) -> f64 {
    patches
        .iter()
        .map(|p| {
            let d = bounds.distance(pos, p.pos) as f64;
            p.quantity as f64 / (d * d + EPSILON)
        })
        .sum()
}

/// Probability of accepting a move from scent level `cur` to `new`.
///
/// Deterministically 1 for any non-losing move — the property tests rely on
/// a scent-improving candidate never being rejected, whatever the draw.
pub fn acceptance_probability(cur: f64, new: f64, bias: f32) -> f64 {
    if new >= cur {
        return 1.0;
    }
    (new / (cur * (1.0 + bias as f64))).clamp(0.0, 1.0)
}

/// One exploration step: propose, score, accept or stay.
pub(crate) fn walk_step(bee: BeeId, ctx: &mut BeeCtx<'_>, rng: &mut AgentRng) {
    let i = bee.index();
    let cur = ctx.bees.pos[i];
    let step_len = ctx.params.flight_speed * ctx.dt;
    let candidate = ctx.bounds.normalize(cur.offset_by(rng.gen_angle(), step_len));

    // Nothing left to smell: pure random walk.
    if ctx.patches.is_empty() {
        ctx.bees.pos[i] = candidate;
        return;
    }

    let cur_scent = scent_at(ctx.patches, ctx.bounds, cur);
    let new_scent = scent_at(ctx.patches, ctx.bounds, candidate);
    let p = acceptance_probability(cur_scent, new_scent, ctx.bees.scent_bias[i]);
    if p >= 1.0 || rng.gen_bool(p) {
        ctx.bees.pos[i] = candidate;
    }
}
