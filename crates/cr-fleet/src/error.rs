use cr_core::{DepotId, VehicleId};
use thiserror::Error;

/// Validation failures for initial fleet data.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("{vehicle}: charge {charge} is outside [0, 100]")]
    InvalidCharge { vehicle: VehicleId, charge: f64 },

    #[error("{what} {index}: position is not finite")]
    NonFinitePosition { what: &'static str, index: usize },

    #[error("{what} {index}: position ({x}, {y}) lies outside the area")]
    OutOfBounds {
        what:  &'static str,
        index: usize,
        x:     f64,
        y:     f64,
    },

    #[error("{0}: pack capacity must be at least 1")]
    ZeroCapacity(DepotId),

    #[error("too many {0} for a 32-bit id")]
    TooMany(&'static str),
}

pub type FleetResult<T> = Result<T, FleetError>;
