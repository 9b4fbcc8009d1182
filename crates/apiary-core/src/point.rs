//! Planar coordinate type used throughout the simulation.
//!
//! `Point2` uses `f32` components.  Foraging worlds are a few hundred units
//! across, so single precision leaves ~5 decimal digits of slack — plenty for
//! step lengths on the order of 1, and it halves the memory of the hot
//! position column in the bee store.

/// A point (or displacement) in the 2-D foraging plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Straight-line (Euclidean) distance to `other`.
    ///
    /// This is the *unwrapped* distance; torus-aware distance lives on
    /// `Bounds` in `apiary-field`, which owns the wrapping decision.
    #[inline]
    pub fn dist(self, other: Point2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point reached by moving `len` units from `self` at `angle`
    /// radians (measured from the positive x-axis).
    #[inline]
    pub fn offset_by(self, angle: f32, len: f32) -> Point2 {
        Point2 {
            x: self.x + len * angle.cos(),
            y: self.y + len * angle.sin(),
        }
    }
}

impl std::ops::Add for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
