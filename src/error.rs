use thiserror::Error;

use crate::grid::Pos;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: usize, cols: usize },

    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of a value-table store. Callers in the simulation treat every
/// variant as "no usable table" rather than aborting the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("table encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("table shape {found_states}x{found_actions} does not match expected {expected_states}x{expected_actions}")]
    Shape {
        expected_states: usize,
        expected_actions: usize,
        found_states: usize,
        found_actions: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
