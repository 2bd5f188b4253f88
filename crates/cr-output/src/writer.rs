//! The `OutputWriter` trait implemented by all backend writers.

use std::path::Path;

use crate::{OutputError, OutputResult, StepRow, VehicleRow};

/// Sink for step rows and the final fleet table.
///
/// [`SimOutputObserver`](crate::SimOutputObserver) swallows errors from
/// these methods and keeps the first one for
/// [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Append one step row.
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    /// Write the fleet table.  Called once per run.
    fn write_vehicles(&mut self, rows: &[VehicleRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Calling it twice is harmless;
    /// rows written afterwards fail with [`OutputError::Finished`].
    fn finish(&mut self) -> OutputResult<()>;
}

/// Backends write into an existing directory; they never create it.
pub(crate) fn check_out_dir(dir: &Path) -> OutputResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(OutputError::MissingDir(dir.to_path_buf()))
    }
}
