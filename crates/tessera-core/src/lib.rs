//! Core value types for the tessera engine.
//!
//! This crate provides the small, copyable types every other crate speaks in:
//! - [`Color`] and [`Piece`] for piece identity
//! - [`PromotionPiece`] for the out-of-band promotion choice
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`], the packed `(from << 6) | to` move code
//! - FEN parsing via [`Fen`]

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::CoreError;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::{Piece, PromotionPiece};
pub use square::{File, Rank, Square};
