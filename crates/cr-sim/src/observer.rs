//! Simulation observer trait for progress reporting and data collection.

use crate::{HaltReason, Snapshot, StepOutcome};

/// Callbacks invoked by [`Sim::run_to_completion_with`][crate::Sim::run_to_completion_with]
/// and [`Sim::run_steps`][crate::Sim::run_steps].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_step(&mut self, outcome: &StepOutcome) {
///         println!("step {}: travelled {:.0}", outcome.step, outcome.travelled);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every step, including idle and rejected ones.
    fn on_step(&mut self, _outcome: &StepOutcome) {}

    /// Called once when the run halts, with the final state.
    fn on_halt(&mut self, _reason: HaltReason, _snapshot: &Snapshot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
