//! Initial resource-patch placement strategies.
//!
//! Positions are drawn from the world's root `SimRng` during construction,
//! before any agent acts, so placement is covered by the same seed
//! determinism as everything else.

use apiary_core::{Point2, SimRng};
use apiary_field::Bounds;

use crate::{SimError, SimResult};

/// Where the builder puts the resource patches.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatchPlacement {
    /// Uniformly random over the whole field.
    Random { count: usize },

    /// Evenly spread on a circle of `distance` around the first hive, with
    /// a random rotation.  The classic controlled-distance experiment setup.
    FixedDistance { count: usize, distance: f32 },

    /// A `cluster_fraction` share of patches scattered around the first
    /// hive with Gaussian `spread`, kept at least `exclusion` away from it;
    /// the remainder uniformly random.
    ClusteredAroundHive {
        count: usize,
        cluster_fraction: f32,
        spread: f32,
        exclusion: f32,
    },
}

impl PatchPlacement {
    pub fn count(&self) -> usize {
        match *self {
            PatchPlacement::Random { count }
            | PatchPlacement::FixedDistance { count, .. }
            | PatchPlacement::ClusteredAroundHive { count, .. } => count,
        }
    }
}

/// Resolve a placement strategy into concrete positions.
///
/// `anchor` is the first hive's position.  Errors are configuration
/// problems (a fixed-distance circle that leaves the field, an exclusion
/// zone no sample can escape) — the world refuses to build rather than
/// silently bending the setup.
pub(crate) fn place_patches(
    placement: &PatchPlacement,
    bounds: &Bounds,
    anchor: Point2,
    rng: &mut SimRng,
) -> SimResult<Vec<Point2>> {
    match *placement {
        PatchPlacement::Random { count } => Ok((0..count).map(|_| uniform(bounds, rng)).collect()),

        PatchPlacement::FixedDistance { count, distance } => {
            if !(distance > 0.0) {
                return Err(SimError::Config(format!(
                    "fixed patch distance must be positive, got {distance}"
                )));
            }
            let escapes = !bounds.wrap
                && (anchor.x - distance < 0.0
                    || anchor.x + distance > bounds.width
                    || anchor.y - distance < 0.0
                    || anchor.y + distance > bounds.height);
            if escapes {
                return Err(SimError::Config(format!(
                    "patch circle of radius {distance} around {anchor} leaves the field"
                )));
            }
            let rotation = rng.gen_range(0.0..std::f32::consts::TAU);
            Ok((0..count)
                .map(|i| {
                    let angle = rotation + std::f32::consts::TAU * i as f32 / count.max(1) as f32;
                    bounds.normalize(anchor.offset_by(angle, distance))
                })
                .collect())
        }

        PatchPlacement::ClusteredAroundHive {
            count,
            cluster_fraction,
            spread,
            exclusion,
        } => {
            if !(0.0..=1.0).contains(&cluster_fraction) {
                return Err(SimError::Config(format!(
                    "cluster_fraction must be in [0, 1], got {cluster_fraction}"
                )));
            }
            let clustered = (count as f32 * cluster_fraction).round() as usize;
            let mut positions = Vec::with_capacity(count);
            for _ in 0..clustered {
                positions.push(clustered_sample(bounds, anchor, spread, exclusion, rng)?);
            }
            for _ in clustered..count {
                positions.push(uniform(bounds, rng));
            }
            Ok(positions)
        }
    }
}

fn uniform(bounds: &Bounds, rng: &mut SimRng) -> Point2 {
    Point2::new(
        rng.gen_range(0.0..bounds.width),
        rng.gen_range(0.0..bounds.height),
    )
}

/// Rejection-sample a Gaussian offset from `anchor` that lands in-bounds
/// and outside the exclusion ring.
fn clustered_sample(
    bounds: &Bounds,
    anchor: Point2,
    spread: f32,
    exclusion: f32,
    rng: &mut SimRng,
) -> SimResult<Point2> {
    const MAX_TRIES: usize = 1_000;
    for _ in 0..MAX_TRIES {
        let candidate = Point2::new(
            anchor.x + gaussian(rng) * spread,
            anchor.y + gaussian(rng) * spread,
        );
        if bounds.contains(candidate) && bounds.distance(anchor, candidate) >= exclusion {
            return Ok(candidate);
        }
    }
    Err(SimError::Config(format!(
        "could not place a clustered patch: spread {spread} / exclusion {exclusion} \
         leave almost no valid area"
    )))
}

/// Standard normal via Box-Muller — placement runs once, at build time.
fn gaussian(rng: &mut SimRng) -> f32 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    ((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()) as f32
}
