//! Engine error taxonomy.

use tessera_core::{CoreError, FenError};
use thiserror::Error;

/// Errors raised by board operations.
///
/// Every variant is a broken caller contract. Nothing here is transient, so
/// nothing is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid square index {0}: expected 0-63")]
    InvalidSquare(u32),

    #[error("invalid move code {0}")]
    InvalidMoveCode(u32),

    #[error("precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSquare(index) => EngineError::InvalidSquare(index),
            CoreError::InvalidMoveCode(code) => EngineError::InvalidMoveCode(code),
            CoreError::InvalidPromotion(name) => EngineError::InvalidPromotion(name),
        }
    }
}

/// Shorthand for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;
