//! `cr-output`: simulation output writers for rust_charger.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                            |
//! |-----------|---------|------------------------------------------|
//! | *(none)*  | CSV     | `steps.csv`, `vehicles.csv`              |
//! | `sqlite`  | SQLite  | `output.db`                              |
//! | `parquet` | Parquet | `steps.parquet`, `vehicles.parquet`      |
//!
//! `steps` gets one row per step; `vehicles` gets the fleet as it stood when
//! the run ended.  All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cr_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cr_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_to_completion_with(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StepRow, VehicleRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
