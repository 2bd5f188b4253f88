//! Linear-scan candidate queries.

use cr_core::Positioned;
use cr_fleet::{Depot, Vehicle};

use crate::{DispatchError, DispatchResult};

/// The unvisited depot closest to `from`.
///
/// Ties go to the depot enumerated first.  Fails with
/// [`DispatchError::NoCandidate`] when every depot has been visited (or there
/// are none).
pub fn nearest_depot<'a, P>(from: &P, depots: &'a [Depot]) -> DispatchResult<&'a Depot>
where
    P: Positioned + ?Sized,
{
    let origin = from.position();
    let mut best: Option<(f64, &Depot)> = None;

    for depot in depots.iter().filter(|d| !d.is_visited()) {
        let d2 = origin.distance_sq(depot.position());
        match best {
            Some((best_d2, _)) if d2 >= best_d2 => {}
            _ => best = Some((d2, depot)),
        }
    }

    best.map(|(_, d)| d).ok_or(DispatchError::NoCandidate)
}

/// Up to `limit` vehicles needing service, nearest first.
///
/// A vehicle qualifies when it is unreserved and its charge is strictly below
/// `threshold`.  The sort is stable, so equidistant vehicles keep enumeration
/// order.  An empty result is a normal outcome, not an error.
pub fn nearest_vehicles<'a, P>(
    from:      &P,
    vehicles:  &'a [Vehicle],
    threshold: f64,
    limit:     usize,
) -> Vec<&'a Vehicle>
where
    P: Positioned + ?Sized,
{
    let origin = from.position();
    let mut ranked: Vec<(f64, &Vehicle)> = vehicles
        .iter()
        .filter(|v| v.needs_service(threshold))
        .map(|v| (origin.distance_sq(v.position()), v))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(limit);
    ranked.into_iter().map(|(_, v)| v).collect()
}
