//! `cr-sim`: the charger's step loop.
//!
//! # One step
//!
//! ```text
//! ① Drift    perturb a sample of unreserved vehicles.
//! ② Decide   no packs on board?  refill at the nearest unvisited depot.
//!            otherwise           service the nearest low-charge vehicle.
//! ③ Budget   travelled + cost > budget  → Halted(BudgetExceeded),
//!            nothing committed.
//! ④ Commit   move the charger and apply the pack transfer.
//! ```
//!
//! A step with packs on board but no eligible vehicle is idle: nothing but
//! the drift happens.  Running out of depots halts with `NoDepotAvailable`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cr_core::{Point, SimConfig};
//! use cr_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), fleet, Point::new(500.0, 500.0))
//!     .build()?;
//! let reason = sim.run_to_completion();
//! println!("halted: {reason}, travelled {:.1}", sim.agent().travelled());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod state;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use state::{Action, HaltReason, SimState, Snapshot, StepOutcome, Target};
