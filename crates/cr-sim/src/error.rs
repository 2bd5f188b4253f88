use cr_core::CoreError;
use cr_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("invalid fleet: {0}")]
    Fleet(#[from] FleetError),

    #[error("charger start position ({x}, {y}) is not finite")]
    InvalidStart { x: f64, y: f64 },

    #[error("{what} at index {index} carries a mismatched id")]
    EntityOrder { what: &'static str, index: usize },
}

pub type SimResult<T> = Result<T, SimError>;
