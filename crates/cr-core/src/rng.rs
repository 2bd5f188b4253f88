//! The simulation's single deterministic randomness source.
//!
//! Every random draw in a run (vehicle drift, scatter generation) goes
//! through one `SimRng`.  The same seed always reproduces the same run.

use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::{Bounds, Point};

/// Seedable RNG wrapper used in single-threaded contexts only.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform point inside `bounds` (edges inclusive).
    pub fn point_in(&mut self, bounds: &Bounds) -> Point {
        Point::new(
            self.0.gen_range(bounds.min.x..=bounds.max.x),
            self.0.gen_range(bounds.min.y..=bounds.max.y),
        )
    }

    /// `amount` distinct indices from `0..len`, chosen uniformly without
    /// replacement.  `amount` is clamped to `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }

    /// Normally distributed sample (Box–Muller transform).
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // `1.0 - u` keeps the log argument in (0, 1].
        let u1: f64 = 1.0 - self.0.r#gen::<f64>();
        let u2: f64 = self.0.r#gen();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}
