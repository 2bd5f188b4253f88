//! Unit tests for cr-dispatch.

use cr_core::{Bounds, Point, SimRng};
use cr_fleet::{Fleet, FleetBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn area() -> Bounds {
    Bounds::square(1000.0)
}

/// Random fleet with integer coordinates (plenty of exact ties) and mixed
/// charge levels.
fn random_fleet(seed: u64, vehicles: usize, depots: usize) -> Fleet {
    let mut rng = SimRng::new(seed);
    let mut b = FleetBuilder::new(area());
    for _ in 0..vehicles {
        let p = Point::new(rng.gen_range(0..50) as f64 * 20.0, rng.gen_range(0..50) as f64 * 20.0);
        b = b.vehicle(p, rng.gen_range(0..=100) as f64);
    }
    for _ in 0..depots {
        let p = Point::new(rng.gen_range(0..10) as f64 * 100.0, rng.gen_range(0..10) as f64 * 100.0);
        b = b.depot(p, 10);
    }
    b.build().unwrap()
}

#[cfg(test)]
mod depot_tests {
    use super::*;
    use crate::{DepotIndex, DispatchError, nearest_depot};
    use cr_core::DepotId;

    #[test]
    fn picks_closest() {
        let fleet = FleetBuilder::new(area())
            .depot(Point::new(500.0, 500.0), 10)
            .depot(Point::new(10.0, 10.0), 10)
            .depot(Point::new(900.0, 0.0), 10)
            .build()
            .unwrap();
        let d = nearest_depot(&(0.0, 0.0), &fleet.depots).unwrap();
        assert_eq!(d.id(), DepotId(1));
    }

    #[test]
    fn skips_visited() {
        let mut fleet = FleetBuilder::new(area())
            .depot(Point::new(10.0, 0.0), 10)
            .depot(Point::new(20.0, 0.0), 10)
            .build()
            .unwrap();
        fleet.depots[0].draw(10);
        let d = nearest_depot(&Point::ORIGIN, &fleet.depots).unwrap();
        assert_eq!(d.id(), DepotId(1));
        assert!(!d.is_visited());
    }

    #[test]
    fn all_visited_is_no_candidate() {
        let mut fleet = FleetBuilder::new(area())
            .depot(Point::new(10.0, 0.0), 10)
            .build()
            .unwrap();
        fleet.depots[0].draw(10);
        assert_eq!(nearest_depot(&Point::ORIGIN, &fleet.depots).unwrap_err(), DispatchError::NoCandidate);
    }

    #[test]
    fn no_depots_is_no_candidate() {
        assert!(nearest_depot(&Point::ORIGIN, &[]).is_err());
        let index = DepotIndex::new(&[]);
        assert_eq!(index.nearest_unvisited(Point::ORIGIN, &[]), None);
    }

    #[test]
    fn index_ignores_depots_missing_from_slice() {
        let built_from = FleetBuilder::new(area())
            .depot(Point::new(0.0, 0.0), 10)
            .depot(Point::new(10.0, 0.0), 10)
            .build()
            .unwrap();
        let current = FleetBuilder::new(area())
            .depot(Point::new(500.0, 500.0), 10)
            .build()
            .unwrap();
        let index = DepotIndex::new(&built_from.depots);
        let from = Point::new(10.0, 0.0);
        assert_eq!(index.nearest_unvisited(from, &current.depots), Some(DepotId(0)));
        assert_eq!(index.nearest_unvisited(from, &[]), None);
    }

    #[test]
    fn tie_goes_to_first_enumerated() {
        let fleet = FleetBuilder::new(area())
            .depot(Point::new(100.0, 200.0), 10)
            .depot(Point::new(200.0, 100.0), 10)
            .depot(Point::new(0.0, 100.0), 10)
            .build()
            .unwrap();
        let from = Point::new(100.0, 100.0);
        // All three are exactly 100 away.
        assert_eq!(nearest_depot(&from, &fleet.depots).unwrap().id(), DepotId(0));
        let index = DepotIndex::new(&fleet.depots);
        assert_eq!(index.nearest_unvisited(from, &fleet.depots), Some(DepotId(0)));
    }

    #[test]
    fn index_agrees_with_scan() {
        for seed in 0..20 {
            let mut fleet = random_fleet(seed, 0, 25);
            let index = DepotIndex::new(&fleet.depots);
            let mut rng = SimRng::new(seed + 1_000);

            // Visit depots one by one, querying from random points in between.
            loop {
                let from = rng.point_in(&area());
                let scan = nearest_depot(&from, &fleet.depots).ok().map(|d| d.id());
                let indexed = index.nearest_unvisited(from, &fleet.depots);
                assert_eq!(scan, indexed, "seed {seed} from {from}");
                match indexed {
                    Some(id) => { fleet.depots[id.index()].draw(10); }
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod vehicle_tests {
    use super::*;
    use crate::nearest_vehicles;
    use cr_core::{VehicleId, distance};

    #[test]
    fn filters_and_sorts() {
        let fleet = FleetBuilder::new(area())
            .vehicle(Point::new(300.0, 0.0), 10.0) // eligible, far
            .vehicle(Point::new(100.0, 0.0), 60.0) // too charged
            .vehicle(Point::new(200.0, 0.0), 49.9) // eligible, near
            .vehicle(Point::new(50.0, 0.0), 50.0)  // exactly at threshold: excluded
            .build()
            .unwrap();
        let ids: Vec<_> = nearest_vehicles(&Point::ORIGIN, &fleet.vehicles, 50.0, 10)
            .iter()
            .map(|v| v.id())
            .collect();
        assert_eq!(ids, [VehicleId(2), VehicleId(0)]);
    }

    #[test]
    fn excludes_reserved() {
        let mut fleet = FleetBuilder::new(area())
            .vehicle(Point::new(10.0, 0.0), 10.0)
            .vehicle(Point::new(20.0, 0.0), 10.0)
            .build()
            .unwrap();
        fleet.vehicles[0].service();
        let ranked = nearest_vehicles(&Point::ORIGIN, &fleet.vehicles, 50.0, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id(), VehicleId(1));
    }

    #[test]
    fn respects_limit() {
        let fleet = random_fleet(7, 200, 0);
        let ranked = nearest_vehicles(&Point::new(500.0, 500.0), &fleet.vehicles, 50.0, 10);
        assert!(ranked.len() <= 10);
    }

    #[test]
    fn empty_when_nothing_eligible() {
        let fleet = FleetBuilder::new(area())
            .vehicle(Point::new(10.0, 0.0), 80.0)
            .build()
            .unwrap();
        assert!(nearest_vehicles(&Point::ORIGIN, &fleet.vehicles, 50.0, 10).is_empty());
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let fleet = FleetBuilder::new(area())
            .vehicle(Point::new(0.0, 10.0), 5.0)
            .vehicle(Point::new(10.0, 0.0), 5.0)
            .vehicle(Point::new(0.0, 5.0), 5.0)
            .vehicle(Point::new(5.0, 0.0), 5.0)
            .build()
            .unwrap();
        let ids: Vec<_> = nearest_vehicles(&Point::ORIGIN, &fleet.vehicles, 50.0, 10)
            .iter()
            .map(|v| v.id().0)
            .collect();
        assert_eq!(ids, [2, 3, 0, 1]);
    }

    #[test]
    fn results_are_eligible_and_ordered() {
        for seed in 0..10 {
            let mut fleet = random_fleet(seed, 150, 0);
            for v in fleet.vehicles.iter_mut().step_by(3) {
                v.service();
            }
            let from = Point::new(333.0, 777.0);
            let ranked = nearest_vehicles(&from, &fleet.vehicles, 50.0, 10);
            for v in &ranked {
                assert!(!v.is_reserved());
                assert!(v.charge() < 50.0);
            }
            for pair in ranked.windows(2) {
                assert!(distance(&from, pair[0]) <= distance(&from, pair[1]));
            }
        }
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;
    use crate::{DispatchPolicy, GreedyPolicy, nearest_depot, nearest_vehicles};
    use cr_core::SimConfig;

    #[test]
    fn greedy_matches_free_functions() {
        let fleet = random_fleet(3, 150, 20);
        let policy = GreedyPolicy::from_config(&fleet.depots, &SimConfig::default());
        let from = Point::new(123.0, 456.0);

        let depot = policy.select_depot(from, &fleet.depots).unwrap();
        assert_eq!(depot, nearest_depot(&from, &fleet.depots).unwrap().id());

        let ranked = policy.rank_vehicles(from, &fleet.vehicles);
        let expected: Vec<_> = nearest_vehicles(&from, &fleet.vehicles, 50.0, 10)
            .iter()
            .map(|v| v.id())
            .collect();
        assert_eq!(ranked, expected);
    }
}
