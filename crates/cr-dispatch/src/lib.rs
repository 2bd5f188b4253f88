//! `cr-dispatch`: who does the charger go to next?
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`query`]   | `nearest_depot`, `nearest_vehicles` (linear scans)            |
//! | [`index`]   | `DepotIndex`, an R-tree over the fixed depot positions        |
//! | [`policy`]  | `DispatchPolicy` trait, `GreedyPolicy`                        |
//! | [`error`]   | `DispatchError`, `DispatchResult<T>`                          |
//!
//! # Ranking rules
//!
//! Candidates are ranked by squared Euclidean distance from the charger.
//! Equidistant candidates keep their enumeration order, so a run is fully
//! reproducible given the drift seed.
//!
//! All queries are read-only and cheap enough to recompute every step.

pub mod error;
pub mod index;
pub mod policy;
pub mod query;

#[cfg(test)]
mod tests;

pub use error::{DispatchError, DispatchResult};
pub use index::DepotIndex;
pub use policy::{DispatchPolicy, GreedyPolicy};
pub use query::{nearest_depot, nearest_vehicles};
