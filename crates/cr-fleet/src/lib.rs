//! `cr-fleet`: entity records for the `rust_charger` simulation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`entity`]   | `Vehicle`, `Depot`, `Agent`                                 |
//! | [`builder`]  | `FleetBuilder` → validated `Fleet`                          |
//! | [`drift`]    | `perturb` (ambient vehicle relocation and charge decay)     |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                              |
//!
//! Entity fields are private.  Every mutation goes through a method that
//! keeps its invariant: charge stays in `[0, 100]`, a reservation is never
//! lifted, a depot's pack total is conserved.

pub mod builder;
pub mod drift;
pub mod entity;
pub mod error;


pub use builder::{Fleet, FleetBuilder};
pub use drift::{DriftParams, perturb};
pub use entity::{Agent, Depot, FULL_CHARGE, Vehicle};
pub use error::{FleetError, FleetResult};
