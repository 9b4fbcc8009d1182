//! Canonical parameter tables.
//!
//! All probabilities are *rates per simulated second* and are multiplied by
//! the step length `dt` at the point of use, so one table works at any
//! temporal resolution.  Defaults are the canonical values used by the
//! baseline foraging studies; experiment drivers override individual fields
//! with struct-update syntax:
//!
//! ```
//! use apiary_colony::BeeParams;
//!
//! let bees = BeeParams { p_abort: 0.04, ..BeeParams::default() };
//! assert_eq!(bees.fov, BeeParams::default().fov);
//! ```

// ── BeeParams ─────────────────────────────────────────────────────────────────

/// Tunables for every bee of a world.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeeParams {
    /// Radius within which a bee can interact with other bees (waggle-dance
    /// audience, nectar gossip).
    pub fov: f32,

    /// Distance covered per second while milling about inside the hive.
    pub speed_in_hive: f32,

    /// Distance covered per second in the field (exploring, following,
    /// carrying, returning).
    pub flight_speed: f32,

    /// Nectar mass a bee can carry home from one extraction.
    pub carrying_capacity: f32,

    /// Minimum time spent resting after a trip before the bee will consider
    /// leaving (or be recruited) again.
    pub resting_period_secs: f32,

    /// Rate of re-sampling the hive's nectar stock while resting.
    pub p_inspect: f64,

    /// Rate of sharing the perceived nectar level with one nearby bee.
    pub p_communicate: f64,

    /// Probability that a resting bee in a dancer's field of view follows
    /// the dance (per dance event, not per second).
    pub p_follow_dance: f64,

    /// Scale of the exponential survival function that turns perceived
    /// nectar scarcity into the urge to explore: a rested bee leaves with
    /// probability `exp(-perceived / exploring_incentive)` per step.
    pub exploring_incentive: f32,

    /// Rate of abandoning an exploration or recruitment flight.
    pub p_abort: f64,

    /// Multiplier applied to `p_abort` while a storm is active.
    pub storm_abort_factor: f64,

    /// Death rate for a bee caught outside the hive during a storm.
    pub p_death_by_storm: f64,

    /// Death rate from generic outside hazards (predation, wind, …).
    pub p_death_by_outside_risk: f64,

    /// Hunger drain per second.  A bee whose `fed` level reaches zero dies.
    pub hunger_rate: f32,

    /// Upper bound of the `fed` level; newborn bees start full.
    pub fed_max: f32,

    /// Lifespan cap in simulated seconds.  `f32::INFINITY` disables death
    /// by age.
    pub max_age_secs: f32,

    /// Mean/standard deviation of the per-bee scent-bias trait, sampled
    /// once at birth from a Gaussian clipped at zero.  Higher bias makes a
    /// bee more reluctant to step down the scent gradient.
    pub scent_bias_mean: f32,
    pub scent_bias_sd: f32,
}

impl Default for BeeParams {
    fn default() -> Self {
        Self {
            fov: 1.0,
            speed_in_hive: 1.0,
            flight_speed: 5.0,
            carrying_capacity: 0.005,
            resting_period_secs: 5.0,
            p_inspect: 0.2,
            p_communicate: 0.3,
            p_follow_dance: 0.7,
            exploring_incentive: 2.0,
            p_abort: 0.025,
            storm_abort_factor: 5.0,
            p_death_by_storm: 0.005,
            p_death_by_outside_risk: 0.000_75,
            hunger_rate: 0.000_05,
            fed_max: 1.0,
            max_age_secs: f32::INFINITY,
            scent_bias_mean: 9.0,
            scent_bias_sd: 2.0,
        }
    }
}

impl BeeParams {
    /// Reject parameter combinations the state machine cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.flight_speed > 0.0) {
            return Err(format!("flight_speed must be positive, got {}", self.flight_speed));
        }
        if !(self.carrying_capacity > 0.0) {
            return Err(format!(
                "carrying_capacity must be positive, got {}",
                self.carrying_capacity
            ));
        }
        if !(self.fed_max > 0.0) {
            return Err(format!("fed_max must be positive, got {}", self.fed_max));
        }
        if !(self.exploring_incentive > 0.0) {
            return Err(format!(
                "exploring_incentive must be positive, got {}",
                self.exploring_incentive
            ));
        }
        for (name, rate) in [
            ("p_inspect", self.p_inspect),
            ("p_communicate", self.p_communicate),
            ("p_follow_dance", self.p_follow_dance),
            ("p_abort", self.p_abort),
            ("storm_abort_factor", self.storm_abort_factor),
            ("p_death_by_storm", self.p_death_by_storm),
            ("p_death_by_outside_risk", self.p_death_by_outside_risk),
        ] {
            if !(rate >= 0.0 && rate.is_finite()) {
                return Err(format!("{name} must be a finite non-negative rate, got {rate}"));
            }
        }
        if self.hunger_rate < 0.0 || self.scent_bias_sd < 0.0 {
            return Err("hunger_rate and scent_bias_sd must be non-negative".into());
        }
        Ok(())
    }
}

// ── HiveParams ────────────────────────────────────────────────────────────────

/// Tunables for every hive of a world.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HiveParams {
    /// Radius of the hive area; bees inside it count as "in the hive".
    pub radius: f32,

    /// Hard cap on stored nectar.  Deposits beyond it are discarded.
    pub capacity: f32,

    /// Nectar stock at world construction.
    pub initial_nectar: f32,

    /// Nectar transferred per second to each hungry in-hive bee.
    pub feed_rate: f32,

    /// Rate at which one young bee matures into a new adult forager.
    pub p_birth: f64,

    /// Young (pre-forager) population at world construction.
    pub initial_young: u32,

    /// Nectar cost of maturing one young bee into a forager.
    pub maturation_cost: f32,

    /// When set, a hive whose stock hits zero collapses: the hive dies and
    /// takes its resident bees with it.  Off by default; some historical
    /// model variants enabled this.
    pub collapse_on_starvation: bool,
}

impl Default for HiveParams {
    fn default() -> Self {
        Self {
            radius: 5.0,
            capacity: 50.0,
            initial_nectar: 5.0,
            feed_rate: 0.002,
            p_birth: 0.1,
            initial_young: 0,
            maturation_cost: 0.2,
            collapse_on_starvation: false,
        }
    }
}

impl HiveParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.radius > 0.0) {
            return Err(format!("hive radius must be positive, got {}", self.radius));
        }
        if !(self.capacity > 0.0) {
            return Err(format!("hive capacity must be positive, got {}", self.capacity));
        }
        if self.initial_nectar < 0.0 || self.initial_nectar > self.capacity {
            return Err(format!(
                "initial_nectar {} outside [0, capacity {}]",
                self.initial_nectar, self.capacity
            ));
        }
        if self.feed_rate < 0.0 || self.maturation_cost < 0.0 {
            return Err("feed_rate and maturation_cost must be non-negative".into());
        }
        if !(self.p_birth >= 0.0 && self.p_birth.is_finite()) {
            return Err(format!("p_birth must be a finite non-negative rate, got {}", self.p_birth));
        }
        Ok(())
    }
}

// ── PatchParams ───────────────────────────────────────────────────────────────

/// Tunables for every resource patch of a world.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchParams {
    /// Interaction radius of a patch holding `base_quantity` nectar.  The
    /// actual radius shrinks with the square root of the remaining fraction.
    pub base_radius: f32,

    /// Reference quantity for the radius formula, and the initial quantity
    /// of newly placed patches.
    pub base_quantity: f32,

    /// `true` = inexhaustible: extraction never decrements the quantity.
    pub persistent: bool,

    /// Nectar regrown per second on non-persistent patches.
    pub replenish_rate: f32,
}

impl Default for PatchParams {
    fn default() -> Self {
        Self {
            base_radius: 5.0,
            base_quantity: 100.0,
            persistent: false,
            replenish_rate: 0.0,
        }
    }
}

impl PatchParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_radius > 0.0) {
            return Err(format!("patch base_radius must be positive, got {}", self.base_radius));
        }
        if !(self.base_quantity > 0.0) {
            return Err(format!(
                "patch base_quantity must be positive, got {}",
                self.base_quantity
            ));
        }
        if self.replenish_rate < 0.0 {
            return Err(format!("replenish_rate must be non-negative, got {}", self.replenish_rate));
        }
        Ok(())
    }
}
