//! Network-subsystem error type.

use thiserror::Error;

use sr_core::{Cnn, CoreError};

/// Errors produced while building or loading the street network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("junction {0} added twice")]
    DuplicateJunction(Cnn),

    #[error("junction {0} not found in graph")]
    JunctionNotFound(Cnn),

    #[error("table parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
