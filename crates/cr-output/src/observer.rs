//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use cr_sim::{HaltReason, SimObserver, Snapshot, StepOutcome};
use tracing::warn;

use crate::row::{StepRow, VehicleRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes one row per step and the final fleet to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
///
/// The fleet table is written on halt.  A run cut short with
/// [`Sim::run_steps`](cr_sim::Sim::run_steps) never halts, so call
/// [`finish_with`][Self::finish_with] yourself in that case.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            finished:   false,
            last_error: None,
        }
    }

    /// Write the fleet table from `snapshot` and close the writer.
    ///
    /// Only the first call has any effect.
    pub fn finish_with(&mut self, snapshot: &Snapshot) {
        if self.finished {
            return;
        }
        self.finished = true;
        let result = self.writer.write_vehicles(&VehicleRow::from_snapshot(snapshot));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step(&mut self, outcome: &StepOutcome) {
        if self.finished {
            return;
        }
        let result = self.writer.write_step(&StepRow::from_outcome(outcome));
        self.store_err(result);
    }

    fn on_halt(&mut self, _reason: HaltReason, snapshot: &Snapshot) {
        self.finish_with(snapshot);
    }
}
