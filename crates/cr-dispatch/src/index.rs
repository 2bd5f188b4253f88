//! Spatial index over depot positions.
//!
//! Depots never move, so an R-tree (via `rstar`) is bulk-loaded once when the
//! simulation is built.  Vehicles drift every step and are scanned linearly
//! instead; see [`nearest_vehicles`](crate::nearest_vehicles).

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use cr_core::{DepotId, Point, Positioned};
use cr_fleet::Depot;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct DepotEntry {
    point: [f64; 2],
    id:    DepotId,
}

impl RTreeObject for DepotEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for DepotEntry {
    /// Same formula as [`Point::distance_sq`], so ties resolve exactly as in
    /// the linear scan.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = point[0] - self.point[0];
        let dy = point[1] - self.point[1];
        dx * dx + dy * dy
    }
}

// ── DepotIndex ────────────────────────────────────────────────────────────────

/// Nearest-unvisited-depot lookup backed by an R-tree.
pub struct DepotIndex {
    tree: RTree<DepotEntry>,
}

impl DepotIndex {
    pub fn new(depots: &[Depot]) -> Self {
        let entries = depots
            .iter()
            .map(|d| DepotEntry { point: d.position().into(), id: d.id() })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// The unvisited depot nearest to `from`, lowest id on ties.
    ///
    /// `depots` supplies the visited flags.  Entries with no matching depot
    /// in `depots` are treated as visited.
    pub fn nearest_unvisited(&self, from: Point, depots: &[Depot]) -> Option<DepotId> {
        let mut best: Option<(f64, DepotId)> = None;
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&from.into()) {
            if depots.get(entry.id.index()).is_none_or(Depot::is_visited) {
                continue;
            }
            match best {
                None => best = Some((d2, entry.id)),
                // The iterator yields non-decreasing distances, so the first
                // strictly farther entry ends the tie run.
                Some((best_d2, _)) if d2 > best_d2 => break,
                Some((best_d2, best_id)) => {
                    if entry.id < best_id {
                        best = Some((best_d2, entry.id));
                    }
                }
            }
        }
        best.map(|(_, id)| id)
    }
}
