//! World extent and the distance metric that goes with it.
//!
//! A world is an axis-aligned rectangle `[0, width] × [0, height]`.  It is
//! either *clamped* (positions saturate at the edges — the default) or
//! *wrapped* (a torus; positions and distances use the minimum image).  The
//! choice is made once at construction and every position mutation and
//! distance query in the simulation goes through this type, so no caller
//! ever has to know which mode is active.

use apiary_core::Point2;

use crate::{FieldError, FieldResult};

/// The extent and topology of the foraging plane.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// `true` = torus topology (minimum-image distances, positions wrap).
    pub wrap: bool,
}

impl Bounds {
    /// A clamped (non-wrapping) rectangle.
    pub fn new(width: f32, height: f32) -> FieldResult<Self> {
        Self::with_topology(width, height, false)
    }

    /// A square world, the common configuration in foraging studies.
    pub fn square(side: f32) -> FieldResult<Self> {
        Self::with_topology(side, side, false)
    }

    pub fn with_topology(width: f32, height: f32, wrap: bool) -> FieldResult<Self> {
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(FieldError::InvalidExtent { width, height });
        }
        Ok(Self { width, height, wrap })
    }

    /// `true` if `p` lies inside the rectangle (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// The longest possible in-world distance; useful as an "infinity" that
    /// still participates in `min` comparisons.
    #[inline]
    pub fn diameter(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }

    // ── Position normalization ────────────────────────────────────────────

    /// Bring an arbitrary point into the world according to the topology:
    /// clamp to the edges, or wrap around them.
    #[inline]
    pub fn normalize(&self, p: Point2) -> Point2 {
        if self.wrap { self.wrapped(p) } else { self.clamped(p) }
    }

    #[inline]
    fn clamped(&self, p: Point2) -> Point2 {
        Point2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    #[inline]
    fn wrapped(&self, p: Point2) -> Point2 {
        Point2::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
    }

    // ── Distance ──────────────────────────────────────────────────────────

    /// Shortest displacement from `a` to `b` under the world topology.
    #[inline]
    pub fn delta(&self, a: Point2, b: Point2) -> Point2 {
        let mut dx = b.x - a.x;
        let mut dy = b.y - a.y;
        if self.wrap {
            if dx.abs() > self.width * 0.5 {
                dx -= self.width.copysign(dx);
            }
            if dy.abs() > self.height * 0.5 {
                dy -= self.height.copysign(dy);
            }
        }
        Point2::new(dx, dy)
    }

    /// Distance from `a` to `b` under the world topology.
    #[inline]
    pub fn distance(&self, a: Point2, b: Point2) -> f32 {
        let d = self.delta(a, b);
        (d.x * d.x + d.y * d.y).sqrt()
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move from `from` toward `to` by at most `max_step`, following the
    /// shortest in-world direction.  Arrives exactly on `to` when it is
    /// within reach; the result is always in-world.
    pub fn step_toward(&self, from: Point2, to: Point2, max_step: f32) -> Point2 {
        let d = self.delta(from, to);
        let dist = (d.x * d.x + d.y * d.y).sqrt();
        if dist <= max_step || dist == 0.0 {
            return self.normalize(to);
        }
        let scale = max_step / dist;
        self.normalize(Point2::new(from.x + d.x * scale, from.y + d.y * scale))
    }
}
