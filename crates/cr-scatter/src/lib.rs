//! `cr-scatter`: initial vehicle and depot placements.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`record`]     | `VehicleRecord`, `DepotRecord`, `Scatter`                |
//! | [`codec`]      | packed little-endian reader / writer, file helpers       |
//! | [`generate`]   | `ScatterParams`, `generate_scatter`                      |
//! | [`error`]      | `ScatterError`, `ScatterResult<T>`                       |
//!
//! # File layout
//!
//! ```text
//! vehicle_count × { x: i32, y: i32, charge: u8 }   9 bytes each
//! depot_count   × { x: i32, y: i32 }               8 bytes each
//! ```
//!
//! The file carries no header, so both counts come from the caller.  Depot
//! pack capacity is not stored either and is supplied at load time.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cr_scatter::{generate_scatter, save_scatter_file, load_scatter_file, ScatterParams};
//!
//! let params = ScatterParams::default();
//! let scatter = generate_scatter(&params, &mut SimRng::new(7));
//! save_scatter_file(Path::new("data.bin"), &scatter)?;
//!
//! let loaded = load_scatter_file(Path::new("data.bin"), 150, 20, 10)?;
//! let fleet = loaded.into_fleet(params.bounds())?;
//! ```

pub mod codec;
pub mod error;
pub mod generate;
pub mod record;


pub use codec::{
    DEPOT_RECORD_LEN, VEHICLE_RECORD_LEN, load_scatter_file, read_scatter, save_scatter_file,
    write_scatter,
};
pub use error::{ScatterError, ScatterResult};
pub use generate::{ScatterParams, generate_scatter};
pub use record::{DepotRecord, Scatter, VehicleRecord};
