//! Bee state: `BeeState`, SoA `BeeStore`, and per-bee RNG streams.
//!
//! # Why two structs?
//!
//! A bee's step mutates the shared store (its own row, recruited nest-mates'
//! rows, gossip targets) while continuously drawing from its own RNG.  Rust's
//! borrow checker forbids `&mut store.rows` + `&mut store.rngs[i]` if both
//! live inside one struct, so per-bee RNG state lives in a separate
//! [`BeeRngs`], mirroring the store row-for-row:
//!
//! ```ignore
//! // scheduler bee phase (simplified):
//! for id in order {
//!     let rng = rngs.get_mut(id);          // &mut BeeRngs
//!     behavior::step_bee(id, &mut ctx, rng); // ctx borrows &mut BeeStore
//! }
//! ```
//!
//! # Tombstoning
//!
//! Rows are append-only: death clears the `alive` flag but never removes or
//! reorders rows.  A `BeeId` is therefore stable for the whole run, and the
//! RNG stream of every surviving bee is untouched by deaths and births —
//! which is what makes fixed-seed runs reproducible as the population
//! changes.  Iteration always goes through [`BeeStore::live_ids`].

use apiary_core::{AgentRng, BeeId, HiveId, PatchId, Point2};
use apiary_field::Bounds;

// ── BeeState ──────────────────────────────────────────────────────────────────

/// The six activities of the forager state machine.
///
/// Death is not a state: a dead bee is tombstoned out of the store entirely.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeeState {
    /// In the hive: milling about, gossiping, weighing whether to leave.
    #[default]
    Resting,
    /// Flying home empty-handed after an aborted trip.
    Returning,
    /// Scent-biased random walk in search of a patch.
    Exploring,
    /// Hauling a nectar load straight home.
    Carrying,
    /// One waggle-dance cycle recruiting rested nest-mates.
    Dancing,
    /// Flying toward a patch learned from a dance.
    Following,
}

impl BeeState {
    /// All states in census order.
    pub const ALL: [BeeState; 6] = [
        BeeState::Resting,
        BeeState::Returning,
        BeeState::Exploring,
        BeeState::Carrying,
        BeeState::Dancing,
        BeeState::Following,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BeeState::Resting => "resting",
            BeeState::Returning => "returning",
            BeeState::Exploring => "exploring",
            BeeState::Carrying => "carrying",
            BeeState::Dancing => "dancing",
            BeeState::Following => "following",
        }
    }
}

impl std::fmt::Display for BeeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BeeRngs ───────────────────────────────────────────────────────────────────

/// Per-bee deterministic RNG state, kept separate from [`BeeStore`] to allow
/// simultaneous `&mut BeeStore` + `&mut AgentRng` borrows during a bee step.
pub struct BeeRngs {
    inner: Vec<AgentRng>,
    global_seed: u64,
}

impl BeeRngs {
    /// Allocate and seed `count` per-bee RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, BeeId(i)))
            .collect();
        Self { inner, global_seed }
    }

    /// Seed a stream for the next appended bee.  Call in lock-step with
    /// [`BeeStore::push`].
    pub fn push(&mut self) -> BeeId {
        let id = BeeId(self.inner.len() as u32);
        self.inner.push(AgentRng::new(self.global_seed, id));
        id
    }

    /// Mutable reference to one bee's RNG.
    #[inline]
    pub fn get_mut(&mut self, bee: BeeId) -> &mut AgentRng {
        &mut self.inner[bee.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── BeeStore ──────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all bee state.
///
/// Every `Vec` column has exactly `len()` elements; a `BeeId` is the index
/// into all of them:
///
/// ```ignore
/// let pos = bees.pos[bee.index()];  // O(1), cache-friendly
/// ```
///
/// Columns are `pub` for direct indexed access on the hot path; the
/// structural invariants (equal lengths, accurate `live_count`) are
/// maintained by [`push`](Self::push) and [`kill`](Self::kill).
#[derive(Default)]
pub struct BeeStore {
    /// `false` = tombstoned (dead).  Checked by every iteration helper.
    pub alive: Vec<bool>,

    /// Current state-machine activity.
    pub state: Vec<BeeState>,

    /// Position in the foraging plane.
    pub pos: Vec<Point2>,

    /// The hive this bee belongs to.  Set at birth, never changes.
    pub home: Vec<HiveId>,

    /// Nectar mass currently carried.  Non-zero only while `Carrying`.
    pub load: Vec<f32>,

    /// Hunger level in `[0, fed_max]`; zero means starvation.
    pub fed: Vec<f32>,

    /// Age in simulated seconds.
    pub age_secs: Vec<f32>,

    /// Remaining post-trip rest time in seconds.  While positive the bee
    /// neither leaves to explore nor follows a dance.
    pub rest_timer: Vec<f32>,

    /// The bee's private (noisy) estimate of its hive's nectar stock.
    pub perceived_nectar: Vec<f32>,

    /// Per-bee scent-gradient stubbornness, sampled once at birth.
    pub scent_bias: Vec<f32>,

    /// Remembered resource patch.  `PatchId::INVALID` except while
    /// `Carrying`, `Dancing`, or `Following`; always re-checked against the
    /// registry before use.
    pub destination: Vec<PatchId>,

    live_count: usize,
}

impl BeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows ever allocated, tombstones included.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Number of live bees.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn is_alive(&self, bee: BeeId) -> bool {
        self.alive.get(bee.index()).copied().unwrap_or(false)
    }

    /// Iterator over the IDs of all live bees in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = BeeId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a)
            .map(|(i, _)| BeeId(i as u32))
    }

    /// Append a new bee and return its ID.  The caller must `push` the
    /// matching [`BeeRngs`] stream in the same operation.
    pub fn push(&mut self, home: HiveId, pos: Point2, fed: f32, scent_bias: f32) -> BeeId {
        let id = BeeId(self.alive.len() as u32);
        self.alive.push(true);
        self.state.push(BeeState::Resting);
        self.pos.push(pos);
        self.home.push(home);
        self.load.push(0.0);
        self.fed.push(fed);
        self.age_secs.push(0.0);
        self.rest_timer.push(0.0);
        self.perceived_nectar.push(0.0);
        self.scent_bias.push(scent_bias);
        self.destination.push(PatchId::INVALID);
        self.live_count += 1;
        id
    }

    /// Tombstone a bee.  Clears the row's load and destination so a stale
    /// row can never masquerade as a carrier.
    pub fn kill(&mut self, bee: BeeId) {
        let i = bee.index();
        debug_assert!(self.alive[i], "double kill of {bee}");
        self.alive[i] = false;
        self.load[i] = 0.0;
        self.destination[i] = PatchId::INVALID;
        self.live_count -= 1;
    }

    /// IDs of all live bees within `radius` of `pos`, excluding `exclude`.
    ///
    /// Brute-force scan over the live population — exact, allocation-light,
    /// and fast enough at colony scale (a few hundred bees).
    pub fn neighbors_within(
        &self,
        bounds: &Bounds,
        pos: Point2,
        radius: f32,
        exclude: BeeId,
    ) -> Vec<BeeId> {
        self.live_ids()
            .filter(|&b| b != exclude && bounds.distance(pos, self.pos[b.index()]) <= radius)
            .collect()
    }

    /// Live-population counts per state, in [`BeeState::ALL`] order.
    pub fn census(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for id in self.live_ids() {
            let s = self.state[id.index()];
            let slot = BeeState::ALL.iter().position(|&x| x == s).unwrap();
            counts[slot] += 1;
        }
        counts
    }
}
