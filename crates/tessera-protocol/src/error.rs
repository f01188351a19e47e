//! Protocol errors.

use tessera_engine::EngineError;
use thiserror::Error;

/// Why a command was rejected or the loop stopped.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("illegal move {0}")]
    IllegalMove(String),

    #[error("a promotion is pending on square {0}")]
    PromotionPending(u8),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("it is {expected}'s turn, not {requested}'s")]
    WrongSide { expected: String, requested: String },

    #[error("no legal move for {0}")]
    NoLegalMove(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
