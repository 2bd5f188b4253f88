//! Integration tests for cr-output.

use cr_core::{Bounds, Point, SimConfig};
use cr_fleet::FleetBuilder;
use cr_sim::{Sim, SimBuilder};

use crate::row::{StepRow, VehicleRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn step_row(step: u64, action: &'static str, target: Option<u32>) -> StepRow {
    StepRow {
        step,
        action,
        target,
        cost:      12.5,
        x:         3.0,
        y:         4.0,
        packs:     9,
        travelled: 112.5,
        drifted:   0,
    }
}

fn vehicle_row(id: u32, reserved: bool) -> VehicleRow {
    VehicleRow { vehicle_id: id, x: 10.0 * id as f64, y: 0.0, charge: 42.0, reserved }
}

/// Refill, service, service, then stall.
fn small_sim() -> Sim {
    let fleet = FleetBuilder::new(Bounds::default())
        .depot(Point::new(0.0, 0.0), 10)
        .vehicle(Point::new(100.0, 0.0), 10.0)
        .vehicle(Point::new(200.0, 0.0), 20.0)
        .vehicle(Point::new(300.0, 0.0), 90.0)
        .build()
        .unwrap();
    let config = SimConfig { perturb_sample_size: 0, ..SimConfig::default() };
    SimBuilder::new(config, fleet, Point::ORIGIN).build().unwrap()
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn rows_follow_the_actions() {
        let mut sim = small_sim();
        let refill = StepRow::from_outcome(&sim.step());
        assert_eq!((refill.action, refill.target, refill.cost), ("refill", Some(0), 0.0));
        assert_eq!(refill.packs, 10);

        let service = StepRow::from_outcome(&sim.step());
        assert_eq!((service.action, service.target, service.cost), ("service", Some(0), 100.0));
        assert_eq!((service.x, service.y), (100.0, 0.0));
        assert_eq!(service.travelled, 100.0);

        sim.step();
        let idle = StepRow::from_outcome(&sim.step());
        assert_eq!((idle.action, idle.target, idle.cost), ("idle", None, 0.0));
    }

    #[test]
    fn rejected_step_is_a_halt_row() {
        let fleet = FleetBuilder::new(Bounds::default()).build().unwrap();
        let mut sim = SimBuilder::new(SimConfig::default(), fleet, Point::ORIGIN).build().unwrap();
        let row = StepRow::from_outcome(&sim.step());
        assert_eq!(row.action, "halt");
        assert_eq!(row.target, None);
    }

    #[test]
    fn vehicle_rows_in_id_order() {
        let mut sim = small_sim();
        sim.step();
        sim.step();
        let rows = VehicleRow::from_snapshot(&sim.snapshot());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], VehicleRow { vehicle_id: 0, x: 100.0, y: 0.0, charge: 100.0, reserved: true });
        assert!(!rows[1].reserved);
        assert_eq!(rows[2].vehicle_id, 2);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(dir: &TempDir, name: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("steps.csv").exists());
        assert!(dir.path().join("vehicles.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steps.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["step", "action", "target", "cost", "x", "y", "packs", "travelled", "drifted"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicles.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["vehicle_id", "x", "y", "charge", "reserved"]);
    }

    #[test]
    fn csv_step_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1, "service", Some(7))).unwrap();
        w.write_step(&step_row(2, "idle", None)).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir, "steps.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "service");
        assert_eq!(&rows[0][2], "7");
        assert_eq!(&rows[0][3], "12.5");
        assert_eq!(&rows[1][2], ""); // no target
    }

    #[test]
    fn csv_vehicle_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_vehicles(&[vehicle_row(0, true), vehicle_row(1, false)]).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir, "vehicles.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][4], "1");
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "10");
        assert_eq!(&rows[1][4], "0");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let absent = dir.path().join("absent");
        match CsvWriter::new(&absent) {
            Err(crate::OutputError::MissingDir(path)) => assert_eq!(path, absent),
            other => panic!("expected MissingDir, got {:?}", other.err()),
        }
        assert!(!absent.exists());
    }

    #[test]
    fn csv_rows_after_finish_rejected() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1, "refill", Some(0))).unwrap();
        w.finish().unwrap();
        assert!(matches!(
            w.write_step(&step_row(2, "idle", None)),
            Err(crate::OutputError::Finished("step"))
        ));
        assert!(matches!(
            w.write_vehicles(&[vehicle_row(0, false)]),
            Err(crate::OutputError::Finished("vehicle"))
        ));
    }

    #[test]
    fn integration_csv() {
        use crate::observer::SimOutputObserver;

        let mut sim = small_sim();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_to_completion_with(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        let steps = read_rows(&dir, "steps.csv");
        assert_eq!(steps.len() as u64, sim.steps());
        let actions: Vec<_> = steps.iter().map(|r| r[1].to_owned()).collect();
        assert_eq!(actions, ["refill", "service", "service", "idle"]);

        let vehicles = read_rows(&dir, "vehicles.csv");
        assert_eq!(vehicles.len(), 3);
        let reserved: Vec<_> = vehicles.iter().map(|r| r[4].to_owned()).collect();
        assert_eq!(reserved, ["1", "1", "0"]);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// In-memory writer that can be told to fail.
    #[derive(Default)]
    struct MemWriter {
        steps:      Vec<StepRow>,
        vehicles:   Vec<VehicleRow>,
        finishes:   u32,
        fail_after: Option<usize>,
    }

    impl OutputWriter for MemWriter {
        fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
            if self.fail_after.is_some_and(|n| self.steps.len() >= n) {
                return Err(OutputError::Io(std::io::Error::other(format!("step {}", row.step))));
            }
            self.steps.push(row.clone());
            Ok(())
        }

        fn write_vehicles(&mut self, rows: &[VehicleRow]) -> OutputResult<()> {
            self.vehicles.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn halt_writes_fleet_once() {
        let mut sim = small_sim();
        let mut obs = SimOutputObserver::new(MemWriter::default());
        sim.run_to_completion_with(&mut obs);
        obs.finish_with(&sim.snapshot());

        let w = obs.into_writer();
        assert_eq!(w.steps.len(), 4);
        assert_eq!(w.vehicles.len(), 3);
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn partial_run_needs_explicit_finish() {
        let mut sim = small_sim();
        let mut obs = SimOutputObserver::new(MemWriter::default());
        sim.run_steps(2, &mut obs);
        obs.finish_with(&sim.snapshot());

        let w = obs.into_writer();
        assert_eq!(w.steps.len(), 2);
        assert_eq!(w.vehicles.len(), 3);
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = small_sim();
        let writer = MemWriter { fail_after: Some(1), ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer);
        sim.run_to_completion_with(&mut obs);

        let err = obs.take_error().expect("write error expected");
        assert!(err.to_string().contains("step 2"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().steps.len(), 1);
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_step_with_null_target() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1, "refill", Some(3))).unwrap();
        w.write_step(&step_row(2, "idle", None)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM steps", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 2);
        let target: Option<i64> = conn
            .query_row("SELECT target FROM steps WHERE step = 2", [], |r| r.get(0))
            .unwrap();
        assert_eq!(target, None);
    }

    #[test]
    fn sqlite_reserved_as_integer() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_vehicles(&[vehicle_row(0, true), vehicle_row(1, false)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let val: i64 = conn
            .query_row("SELECT reserved FROM vehicles WHERE vehicle_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(val, 1);
    }

    #[test]
    fn sqlite_rerun_into_same_dir_replaces_tables() {
        let dir = tmp();
        {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_step(&step_row(1, "refill", Some(0))).unwrap();
            w.write_step(&step_row(2, "service", Some(4))).unwrap();
            w.write_vehicles(&[vehicle_row(0, true)]).unwrap();
            w.finish().unwrap();
        }

        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1, "refill", Some(1))).unwrap();
        w.write_vehicles(&[vehicle_row(0, false)]).unwrap();
        w.finish().unwrap();
        drop(w);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let steps: i64 = conn.query_row("SELECT COUNT(*) FROM steps", [], |r| r.get(0)).unwrap();
        assert_eq!(steps, 1);
        let target: Option<i64> = conn
            .query_row("SELECT target FROM steps WHERE step = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(target, Some(1));
        let reserved: i64 = conn
            .query_row("SELECT reserved FROM vehicles WHERE vehicle_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(reserved, 0);
    }
}

// ── Parquet ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("steps.parquet").exists());
        assert!(dir.path().join("vehicles.parquet").exists());
    }

    #[test]
    fn parquet_pending_steps_written_on_finish() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        for step in 1..=3 {
            w.write_step(&step_row(step, "service", Some(step as u32))).unwrap();
        }
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("steps.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let total_rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 3);

        let target = schema.field_with_name("target").unwrap();
        assert!(target.is_nullable());
        assert_eq!(*target.data_type(), DataType::UInt32);
    }

    #[test]
    fn parquet_vehicle_columns() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_vehicles(&[vehicle_row(0, true)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("vehicles.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let names: Vec<String> = builder.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, ["vehicle_id", "x", "y", "charge", "reserved"]);
    }

    #[test]
    fn parquet_rows_after_finish_rejected() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(matches!(
            w.write_step(&step_row(1, "refill", Some(0))),
            Err(crate::OutputError::Finished("step"))
        ));
        assert!(matches!(w.write_vehicles(&[]), Err(crate::OutputError::Finished("vehicle"))));
        w.finish().unwrap();
    }
}
