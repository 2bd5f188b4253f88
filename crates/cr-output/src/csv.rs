//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `steps.csv`
//! - `vehicles.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::{OutputWriter, check_out_dir};
use crate::{OutputError, OutputResult, StepRow, VehicleRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    steps:    Writer<File>,
    vehicles: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        check_out_dir(dir)?;
        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record([
            "step", "action", "target", "cost", "x", "y", "packs", "travelled", "drifted",
        ])?;

        let mut vehicles = Writer::from_path(dir.join("vehicles.csv"))?;
        vehicles.write_record(["vehicle_id", "x", "y", "charge", "reserved"])?;

        Ok(Self {
            steps,
            vehicles,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("step"));
        }
        self.steps.write_record(&[
            row.step.to_string(),
            row.action.to_owned(),
            row.target.map(|t| t.to_string()).unwrap_or_default(),
            row.cost.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.packs.to_string(),
            row.travelled.to_string(),
            row.drifted.to_string(),
        ])?;
        Ok(())
    }

    fn write_vehicles(&mut self, rows: &[VehicleRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("vehicle"));
        }
        for row in rows {
            self.vehicles.write_record(&[
                row.vehicle_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.charge.to_string(),
                (row.reserved as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.vehicles.flush()?;
        Ok(())
    }
}
