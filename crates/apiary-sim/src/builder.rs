//! Fluent, validated construction of a [`World`].

use apiary_colony::{BeeParams, BeeRngs, BeeStore, Hive, HiveParams, PatchParams, PatchStore};
use apiary_core::{HiveId, Point2, RunConfig, SimRng};
use apiary_field::{Bounds, SiteIndex};

use crate::placement::{PatchPlacement, place_patches};
use crate::weather::{Weather, WeatherParams};
use crate::{SimError, SimResult, World};

const DEFAULT_FIELD_SIDE: f32 = 200.0;
const DEFAULT_BEES_PER_HIVE: usize = 200;

/// Fluent builder for [`World`].
///
/// Everything has a sensible default; `build()` validates the whole
/// configuration and refuses to produce a malformed world.
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldBuilder::new(RunConfig { seed: 7, ..RunConfig::default() })
///     .bounds(Bounds::square(300.0)?)
///     .bees_per_hive(150)
///     .placement(PatchPlacement::FixedDistance { count: 1, distance: 50.0 })
///     .build()?;
/// ```
pub struct WorldBuilder {
    run: RunConfig,
    bounds: Option<Bounds>,
    bee_params: BeeParams,
    hive_params: HiveParams,
    patch_params: PatchParams,
    weather: WeatherParams,
    hive_sites: Vec<Point2>,
    bees_per_hive: usize,
    placement: PatchPlacement,
}

impl WorldBuilder {
    pub fn new(run: RunConfig) -> Self {
        Self {
            run,
            bounds: None,
            bee_params: BeeParams::default(),
            hive_params: HiveParams::default(),
            patch_params: PatchParams::default(),
            weather: WeatherParams::default(),
            hive_sites: Vec::new(),
            bees_per_hive: DEFAULT_BEES_PER_HIVE,
            placement: PatchPlacement::Random { count: 2 },
        }
    }

    /// The foraging plane.  Default: a 200 × 200 clamped square.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn bee_params(mut self, params: BeeParams) -> Self {
        self.bee_params = params;
        self
    }

    pub fn hive_params(mut self, params: HiveParams) -> Self {
        self.hive_params = params;
        self
    }

    pub fn patch_params(mut self, params: PatchParams) -> Self {
        self.patch_params = params;
        self
    }

    pub fn weather(mut self, params: WeatherParams) -> Self {
        self.weather = params;
        self
    }

    /// Add a hive at `pos`.  If no site is ever given, one hive is placed
    /// at the centre of the field.
    pub fn hive_at(mut self, pos: Point2) -> Self {
        self.hive_sites.push(pos);
        self
    }

    /// Founding adult foragers per hive.  Default: 200.
    pub fn bees_per_hive(mut self, n: usize) -> Self {
        self.bees_per_hive = n;
        self
    }

    /// Resource-patch placement strategy.  Default: 2 random patches.
    pub fn placement(mut self, placement: PatchPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Validate everything and build the world, seeding hives, patches, and
    /// the founding bee population.
    pub fn build(self) -> SimResult<World> {
        // ── Parameter tables ──────────────────────────────────────────────
        self.bee_params.validate().map_err(SimError::Config)?;
        self.hive_params.validate().map_err(SimError::Config)?;
        self.patch_params.validate().map_err(SimError::Config)?;
        self.weather.validate().map_err(SimError::Config)?;
        if !(self.run.dt_secs > 0.0 && self.run.dt_secs.is_finite()) {
            return Err(SimError::Config(format!(
                "dt_secs must be positive and finite, got {}",
                self.run.dt_secs
            )));
        }

        let bounds = match self.bounds {
            Some(b) => b,
            None => Bounds::square(DEFAULT_FIELD_SIDE)?,
        };

        // ── Hive sites ────────────────────────────────────────────────────
        let mut sites = self.hive_sites;
        if sites.is_empty() {
            sites.push(Point2::new(bounds.width * 0.5, bounds.height * 0.5));
        }
        if sites.len() >= HiveId::INVALID.0 as usize {
            return Err(SimError::Config(format!("{} hives exceed the ID space", sites.len())));
        }
        for (i, &pos) in sites.iter().enumerate() {
            if !bounds.contains(pos) {
                return Err(SimError::Config(format!("hive {i} at {pos} lies outside the field")));
            }
        }

        let hives: Vec<Hive> = sites
            .iter()
            .enumerate()
            .map(|(i, &pos)| Hive::new(HiveId(i as u16), pos, &self.hive_params))
            .collect();

        // ── Patches ───────────────────────────────────────────────────────
        let mut rng = SimRng::new(self.run.seed);
        let patch_positions = place_patches(&self.placement, &bounds, hives[0].pos, &mut rng)?;

        let mut patches = PatchStore::new();
        for pos in patch_positions {
            patches.insert(pos, self.patch_params.base_quantity, &self.patch_params);
        }
        let site_index = SiteIndex::bulk(patches.iter().map(|p| (p.id, p.pos)));

        // ── Assemble and seed the founding population ─────────────────────
        let mut world = World {
            clock: self.run.make_clock(),
            bees: BeeStore::new(),
            rngs: BeeRngs::new(0, self.run.seed),
            hives,
            patches,
            sites: site_index,
            weather: Weather::new(self.weather),
            bounds,
            bee_params: self.bee_params,
            hive_params: self.hive_params,
            patch_params: self.patch_params,
            rng,
            extracted_retired: 0.0,
            total_born: 0,
            total_died: 0,
            run: self.run,
        };

        let founders = self.bees_per_hive;
        for h in 0..world.hives.len() {
            let (id, pos) = (world.hives[h].id, world.hives[h].pos);
            for _ in 0..founders {
                world.spawn_bee(id, pos);
            }
        }

        Ok(world)
    }
}
