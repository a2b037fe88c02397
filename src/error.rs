//! Error types in c45
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid schema {0}")]
    Schema(String),
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}

impl Error {
    pub fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        Error::InvalidRow {
            row,
            reason: reason.into(),
        }
    }
}
