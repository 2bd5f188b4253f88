//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `steps.parquet`
//! - `vehicles.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::{OutputWriter, check_out_dir};
use crate::{OutputError, OutputResult, StepRow, VehicleRow};

/// Step rows held in memory before being written as one row group.
const STEP_BATCH: usize = 4096;

fn step_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("step",      DataType::UInt64,  false),
        Field::new("action",    DataType::Utf8,    false),
        Field::new("target",    DataType::UInt32,  true),
        Field::new("cost",      DataType::Float64, false),
        Field::new("x",         DataType::Float64, false),
        Field::new("y",         DataType::Float64, false),
        Field::new("packs",     DataType::UInt32,  false),
        Field::new("travelled", DataType::Float64, false),
        Field::new("drifted",   DataType::UInt32,  false),
    ]))
}

fn vehicle_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("vehicle_id", DataType::UInt32,  false),
        Field::new("x",          DataType::Float64, false),
        Field::new("y",          DataType::Float64, false),
        Field::new("charge",     DataType::Float64, false),
        Field::new("reserved",   DataType::Boolean, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the pending steps and the Parquet
/// footers; files written without it cannot be opened by Parquet readers.
pub struct ParquetWriter {
    steps:       Option<ArrowWriter<File>>,
    vehicles:    Option<ArrowWriter<File>>,
    step_schema: Arc<Schema>,
    veh_schema:  Arc<Schema>,
    pending:     Vec<StepRow>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        check_out_dir(dir)?;
        let step_schema = step_schema();
        let veh_schema = vehicle_schema();

        let steps = ArrowWriter::try_new(
            File::create(dir.join("steps.parquet"))?,
            Arc::clone(&step_schema),
            Some(snappy_props()),
        )?;
        let vehicles = ArrowWriter::try_new(
            File::create(dir.join("vehicles.parquet"))?,
            Arc::clone(&veh_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            steps:    Some(steps),
            vehicles: Some(vehicles),
            step_schema,
            veh_schema,
            pending:  Vec::with_capacity(STEP_BATCH),
        })
    }

    fn flush_steps(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.steps.as_mut() else {
            self.pending.clear();
            return Ok(());
        };

        let mut steps     = UInt64Builder::new();
        let mut actions   = StringBuilder::new();
        let mut targets   = UInt32Builder::new();
        let mut costs     = Float64Builder::new();
        let mut xs        = Float64Builder::new();
        let mut ys        = Float64Builder::new();
        let mut packs     = UInt32Builder::new();
        let mut travelled = Float64Builder::new();
        let mut drifted   = UInt32Builder::new();

        for row in self.pending.drain(..) {
            steps.append_value(row.step);
            actions.append_value(row.action);
            targets.append_option(row.target);
            costs.append_value(row.cost);
            xs.append_value(row.x);
            ys.append_value(row.y);
            packs.append_value(row.packs);
            travelled.append_value(row.travelled);
            drifted.append_value(row.drifted);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.step_schema),
            vec![
                Arc::new(steps.finish()),
                Arc::new(actions.finish()),
                Arc::new(targets.finish()),
                Arc::new(costs.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(packs.finish()),
                Arc::new(travelled.finish()),
                Arc::new(drifted.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        if self.steps.is_none() {
            return Err(OutputError::Finished("step"));
        }
        self.pending.push(row.clone());
        if self.pending.len() >= STEP_BATCH {
            self.flush_steps()?;
        }
        Ok(())
    }

    fn write_vehicles(&mut self, rows: &[VehicleRow]) -> OutputResult<()> {
        let Some(writer) = self.vehicles.as_mut() else {
            return Err(OutputError::Finished("vehicle"));
        };
        if rows.is_empty() {
            return Ok(());
        }

        let mut ids      = UInt32Builder::new();
        let mut xs       = Float64Builder::new();
        let mut ys       = Float64Builder::new();
        let mut charges  = Float64Builder::new();
        let mut reserved = BooleanBuilder::new();

        for row in rows {
            ids.append_value(row.vehicle_id);
            xs.append_value(row.x);
            ys.append_value(row.y);
            charges.append_value(row.charge);
            reserved.append_value(row.reserved);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.veh_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(charges.finish()),
                Arc::new(reserved.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_steps()?;
        if let Some(w) = self.steps.take() {
            w.close()?;
        }
        if let Some(w) = self.vehicles.take() {
            w.close()?;
        }
        Ok(())
    }
}
