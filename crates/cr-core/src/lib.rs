//! `cr-core`: foundational types for the `rust_charger` simulation.
//!
//! This crate is a dependency of every other `cr-*` crate.  It has no `cr-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `VehicleId`, `DepotId`                                  |
//! | [`geo`]       | `Point`, `Bounds`, `Positioned`, Euclidean `distance`   |
//! | [`config`]    | `SimConfig` and its validation                          |
//! | [`rng`]       | `SimRng` (the single seedable randomness source)        |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Point, Positioned, distance};
pub use ids::{DepotId, VehicleId};
pub use rng::SimRng;
