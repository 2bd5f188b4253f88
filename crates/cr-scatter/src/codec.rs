//! Packed little-endian scatter codec.
//!
//! Reading is lenient about short files: if the input ends cleanly on a
//! record boundary, the remaining records are simply absent.  A record cut in
//! half is an error.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::{DepotRecord, Scatter, ScatterError, ScatterResult, VehicleRecord};

/// Bytes per vehicle record: `i32 x, i32 y, u8 charge`.
pub const VEHICLE_RECORD_LEN: usize = 9;

/// Bytes per depot record: `i32 x, i32 y`.
pub const DEPOT_RECORD_LEN: usize = 8;

// ── Reading ───────────────────────────────────────────────────────────────────

/// Read up to `vehicle_count` vehicles then up to `depot_count` depots from
/// `reader`.  Every depot is stocked with `depot_capacity` packs.
pub fn read_scatter<R: Read>(
    mut reader:     R,
    vehicle_count:  usize,
    depot_count:    usize,
    depot_capacity: u32,
) -> ScatterResult<Scatter> {
    let mut scatter = Scatter {
        vehicles: Vec::with_capacity(vehicle_count.min(1 << 20)),
        depots:   Vec::with_capacity(depot_count.min(1 << 20)),
    };

    let mut buf = [0u8; VEHICLE_RECORD_LEN];
    for index in 0..vehicle_count {
        if !read_record(&mut reader, &mut buf, "vehicle", index)? {
            break;
        }
        scatter.vehicles.push(VehicleRecord {
            x:      le_i32(&buf[0..4]),
            y:      le_i32(&buf[4..8]),
            charge: buf[8],
        });
    }

    let mut buf = [0u8; DEPOT_RECORD_LEN];
    for index in 0..depot_count {
        if !read_record(&mut reader, &mut buf, "depot", index)? {
            break;
        }
        scatter.depots.push(DepotRecord {
            x:        le_i32(&buf[0..4]),
            y:        le_i32(&buf[4..8]),
            capacity: depot_capacity,
        });
    }

    if scatter.vehicles.len() < vehicle_count || scatter.depots.len() < depot_count {
        warn!(
            vehicles = scatter.vehicles.len(),
            depots = scatter.depots.len(),
            expected_vehicles = vehicle_count,
            expected_depots = depot_count,
            "scatter input ended early"
        );
    }
    Ok(scatter)
}

/// Like [`read_scatter`] but opens `path`.
pub fn load_scatter_file(
    path:           &Path,
    vehicle_count:  usize,
    depot_count:    usize,
    depot_capacity: u32,
) -> ScatterResult<Scatter> {
    let file = File::open(path)?;
    let scatter = read_scatter(BufReader::new(file), vehicle_count, depot_count, depot_capacity)?;
    debug!(
        path = %path.display(),
        vehicles = scatter.vehicles.len(),
        depots = scatter.depots.len(),
        "loaded scatter"
    );
    Ok(scatter)
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write every vehicle then every depot.  Depot capacity is not stored.
pub fn write_scatter<W: Write>(mut writer: W, scatter: &Scatter) -> ScatterResult<()> {
    for v in &scatter.vehicles {
        let mut buf = [0u8; VEHICLE_RECORD_LEN];
        buf[0..4].copy_from_slice(&v.x.to_le_bytes());
        buf[4..8].copy_from_slice(&v.y.to_le_bytes());
        buf[8] = v.charge;
        writer.write_all(&buf)?;
    }
    for d in &scatter.depots {
        let mut buf = [0u8; DEPOT_RECORD_LEN];
        buf[0..4].copy_from_slice(&d.x.to_le_bytes());
        buf[4..8].copy_from_slice(&d.y.to_le_bytes());
        writer.write_all(&buf)?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `scatter` to it.
pub fn save_scatter_file(path: &Path, scatter: &Scatter) -> ScatterResult<()> {
    let file = File::create(path)?;
    write_scatter(BufWriter::new(file), scatter)?;
    debug!(
        path = %path.display(),
        vehicles = scatter.vehicles.len(),
        depots = scatter.depots.len(),
        "saved scatter"
    );
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Fill `buf` from `reader`.  `Ok(false)` on a clean EOF before the first
/// byte; `Truncated` on EOF partway through.
fn read_record<R: Read>(
    reader: &mut R,
    buf:    &mut [u8],
    what:   &'static str,
    index:  usize,
) -> ScatterResult<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    match filled {
        0 => Ok(false),
        n if n == buf.len() => Ok(true),
        _ => Err(ScatterError::Truncated { what, index }),
    }
}

#[inline]
fn le_i32(bytes: &[u8]) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    i32::from_le_bytes(raw)
}
