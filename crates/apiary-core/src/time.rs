//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one pass
//! of the scheduler (patches → hives → bees → weather); the mapping to
//! simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * dt_secs
//!
//! Using an integer tick as the canonical time unit keeps step arithmetic
//! exact (no floating-point drift in the scheduler), while all behavioural
//! rates are expressed per second and multiplied by `dt_secs` at the point
//! of use, so the same parameter table works at any temporal resolution.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
///
/// Stored as `u64`; even at millisecond resolution a run cannot overflow it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and its mapping to simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 1.0.
    pub dt_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self {
            dt_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.dt_secs as f64
    }

    /// How many ticks span `secs` simulated seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.dt_secs).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Produced by an external configuration loader (out of scope for the core)
/// and consumed, immutably, at world construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Simulated seconds per tick.  Behavioural rates are per second and are
    /// scaled by this at the point of use.
    pub dt_secs: f32,

    /// Total ticks to simulate.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a position/state snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_steps: u64,
}

impl RunConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_steps)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt_secs: 1.0,
            total_steps: 10_000,
            seed: 42,
            snapshot_interval_steps: 0,
        }
    }
}
