//! Errors raised while building core values from untrusted input.

use thiserror::Error;

/// Rejected conversions into core value types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid square index {0}: expected 0-63")]
    InvalidSquare(u32),

    #[error("invalid move code {0}: expected a 12-bit value")]
    InvalidMoveCode(u32),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(String),
}
