//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the configured output directory with two tables:
//! `steps` and `vehicles`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::{OutputWriter, check_out_dir};
use crate::{OutputError, OutputResult, StepRow, VehicleRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and reset the schema.
    ///
    /// Tables from an earlier run are dropped, matching the CSV backend which
    /// truncates its files.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        check_out_dir(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS steps;
             DROP TABLE IF EXISTS vehicles;
             CREATE TABLE steps (
                 step      INTEGER PRIMARY KEY,
                 action    TEXT    NOT NULL,
                 target    INTEGER,
                 cost      REAL    NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL,
                 packs     INTEGER NOT NULL,
                 travelled REAL    NOT NULL,
                 drifted   INTEGER NOT NULL
             );
             CREATE TABLE vehicles (
                 vehicle_id INTEGER PRIMARY KEY,
                 x          REAL    NOT NULL,
                 y          REAL    NOT NULL,
                 charge     REAL    NOT NULL,
                 reserved   INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("step"));
        }
        self.conn.execute(
            "INSERT INTO steps (step, action, target, cost, x, y, packs, travelled, drifted) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.step,
                row.action,
                row.target,
                row.cost,
                row.x,
                row.y,
                row.packs,
                row.travelled,
                row.drifted,
            ],
        )?;
        Ok(())
    }

    fn write_vehicles(&mut self, rows: &[VehicleRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished("vehicle"));
        }
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicles (vehicle_id, x, y, charge, reserved) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.x,
                    row.y,
                    row.charge,
                    row.reserved as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
