//! Bitboard move generation and fixed-depth search.
//!
//! This crate provides:
//! - [`Bitboard`] and [`BoardState`], the bit-level board
//! - [`AttackTables`], built once and shared read-only
//! - threat detection ([`attackers`], [`is_in_check`])
//! - pseudo-legal and legal move generation ([`pseudo_legal`], [`legal`])
//! - move application and promotion ([`apply`], [`promote`])
//! - game-end classification ([`classify`])
//! - static evaluation ([`evaluate`]) and alpha-beta search ([`find_best_move`])
//! - [`perft`] for validating the generator
//!
//! # Example
//!
//! ```
//! use tessera_core::Color;
//! use tessera_engine::{find_best_move, legal_moves_for, AttackTables, BoardState};
//!
//! let tables = AttackTables::shared();
//! let state = BoardState::startpos();
//! assert_eq!(legal_moves_for(tables, &state, Color::White).len(), 20);
//!
//! let result = find_best_move(tables, &state, 2, Color::White).unwrap();
//! println!("best: {} ({})", result.best_move, result.score);
//! ```

mod apply;
mod bitboard;
mod board;
mod error;
mod eval;
mod movegen;
mod outcome;
mod perft;
mod search;
mod tables;
mod threats;

pub use apply::{apply, apply_and_promote, promote, promote_to};
pub use bitboard::{Bitboard, BitboardIter};
pub use board::{BoardState, CastlingRights};
pub use error::{EngineError, Result};
pub use eval::{evaluate, square_bonus, PIECE_VALUES};
pub use movegen::{has_legal_move, legal, legal_moves_for, pending_promotion, pseudo_legal};
pub use outcome::{classify, GameStatus};
pub use perft::{perft, perft_divide};
pub use search::{
    find_best_move, find_best_move_minimax, SearchResult, Searcher, MATE_SCORE, SCORE_INFINITY,
};
pub use tables::AttackTables;
pub use threats::{attackers, checkers, is_attacked, is_in_check};
