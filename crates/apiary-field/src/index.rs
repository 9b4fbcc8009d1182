//! R-tree index over fixed-position sites.
//!
//! Resource patches never move, so they are a good fit for a bulk-loaded
//! R-tree: O(log N) radius queries for "which patches can this bee touch
//! right now", with point removals when a patch depletes.  Bees are
//! deliberately *not* stored here (their positions change every step).
//!
//! The index speaks plain Euclidean coordinates.  On wrapped (torus) worlds
//! a radius query near a border would miss sites across the seam, so the
//! world falls back to a linear scan over the patch registry in that mode;
//! see `apiary-sim`.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use apiary_core::{PatchId, Point2};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D point with the associated `PatchId`.
#[derive(Clone, PartialEq)]
struct SiteEntry {
    point: [f32; 2],
    id: PatchId,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SiteIndex ─────────────────────────────────────────────────────────────────

/// Spatial index over the world's fixed sites (resource patches).
///
/// Construct with [`SiteIndex::bulk`] at world build time; keep in sync with
/// the patch registry by calling [`remove`](Self::remove) whenever a patch
/// is destroyed.  Sites must not move while indexed.
#[derive(Default)]
pub struct SiteIndex {
    tree: RTree<SiteEntry>,
}

impl SiteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load the index from `(id, position)` pairs — O(N log N), faster
    /// than N individual inserts.
    pub fn bulk(sites: impl IntoIterator<Item = (PatchId, Point2)>) -> Self {
        let entries: Vec<SiteEntry> = sites
            .into_iter()
            .map(|(id, p)| SiteEntry { point: [p.x, p.y], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Add one site (e.g. a patch spawned mid-run by an experiment driver).
    pub fn insert(&mut self, id: PatchId, pos: Point2) {
        self.tree.insert(SiteEntry { point: [pos.x, pos.y], id });
    }

    /// Remove the site `id` at `pos`.  Returns `true` if it was present.
    pub fn remove(&mut self, id: PatchId, pos: Point2) -> bool {
        self.tree
            .remove(&SiteEntry { point: [pos.x, pos.y], id })
            .is_some()
    }

    /// IDs of all sites within `radius` of `pos`, in arbitrary order.
    pub fn within_radius(&self, pos: Point2, radius: f32) -> Vec<PatchId> {
        self.tree
            .locate_within_distance([pos.x, pos.y], radius * radius)
            .map(|e| e.id)
            .collect()
    }

    /// The site nearest to `pos`, or `None` if the index is empty.
    pub fn nearest(&self, pos: Point2) -> Option<PatchId> {
        self.tree.nearest_neighbor(&[pos.x, pos.y]).map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
