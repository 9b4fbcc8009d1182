//! The explicit world view handed to every behaviour function.

use apiary_core::{BeeId, PatchId, Point2};
use apiary_colony::{BeeParams, BeeStore, Hive, PatchStore};
use apiary_field::{Bounds, SiteIndex};

/// Mutable view of everything a bee step may touch.
///
/// Built fresh by the scheduler for each bee phase.  The bee's own RNG is
/// *not* part of the context — it is passed alongside, which is what lets a
/// handler hold `&mut ctx.bees` and `&mut AgentRng` at the same time.
pub struct BeeCtx<'a> {
    pub bounds: &'a Bounds,
    pub bees: &'a mut BeeStore,
    /// All hives, indexed by `HiveId`.  Dead (collapsed) hives stay in the
    /// vector so indices remain valid.
    pub hives: &'a mut Vec<Hive>,
    pub patches: &'a mut PatchStore,
    /// Spatial index over patch positions; kept in sync with `patches`.
    pub sites: &'a mut SiteIndex,
    /// `true` while a storm is active (scales abort and death rates).
    pub storm: bool,
    /// Simulated seconds per step.
    pub dt: f32,
    pub params: &'a BeeParams,
    /// Largest interaction radius among live patches this step; the query
    /// radius that makes the R-tree contact lookup exact.
    pub max_patch_radius: f32,
    /// World counter absorbing the `extracted_total` of patches removed
    /// during this phase, so the cumulative-extraction metric survives
    /// patch destruction.
    pub extracted_retired: &'a mut f32,
}

impl BeeCtx<'_> {
    /// The hive this bee belongs to.
    #[inline]
    pub fn home_hive(&self, bee: BeeId) -> &Hive {
        &self.hives[self.bees.home[bee.index()].index()]
    }

    /// `true` if the bee is currently inside its own hive's area.
    #[inline]
    pub fn is_in_home_hive(&self, bee: BeeId) -> bool {
        let hive = self.home_hive(bee);
        hive.is_inside(self.bounds, self.bees.pos[bee.index()])
    }

    /// The patch whose interaction radius covers `pos`, if any.
    ///
    /// Non-wrapped worlds go through the R-tree (query radius
    /// `max_patch_radius`, then exact per-patch filter).  Wrapped worlds
    /// fall back to a linear scan, because a Euclidean R-tree cannot see
    /// across the torus seam.
    pub fn patch_in_contact(&self, pos: Point2) -> Option<PatchId> {
        if self.bounds.wrap {
            return self
                .patches
                .iter()
                .find(|p| self.bounds.distance(pos, p.pos) <= p.radius)
                .map(|p| p.id);
        }
        self.sites
            .within_radius(pos, self.max_patch_radius)
            .into_iter()
            .filter_map(|id| self.patches.get(id))
            .find(|p| self.bounds.distance(pos, p.pos) <= p.radius)
            .map(|p| p.id)
    }

    /// Destroy a patch: free the registry slot, drop the index entry, and
    /// roll its lifetime extraction counter into the world total.
    pub fn remove_patch(&mut self, id: PatchId) {
        if let Some(patch) = self.patches.remove(id) {
            self.sites.remove(id, patch.pos);
            *self.extracted_retired += patch.extracted_total;
        }
    }
}
