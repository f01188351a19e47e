//! Threat detection.
//!
//! Sits below move generation: everything here reads raw attack patterns and
//! never asks whether a move would be legal.

use tessera_core::{Color, Piece, Square};

use crate::{AttackTables, Bitboard, BoardState};

/// Returns the squares of `by`'s pieces that attack `sq`.
///
/// Attack patterns are symmetric, so each piece kind's pattern from `sq` is
/// intersected with where that kind of `by` piece actually stands. Pawns are
/// the exception: the squares a `by` pawn attacks `sq` from are the squares an
/// opposite-colored pawn on `sq` would capture.
pub fn attackers(tables: &AttackTables, state: &BoardState, sq: Square, by: Color) -> Bitboard {
    let occupied = state.occupied();
    let diagonal = state.pieces(by, Piece::Bishop) | state.pieces(by, Piece::Queen);
    let orthogonal = state.pieces(by, Piece::Rook) | state.pieces(by, Piece::Queen);

    (tables.pawn_attacks(by.opposite(), sq) & state.pieces(by, Piece::Pawn))
        | (tables.knight(sq) & state.pieces(by, Piece::Knight))
        | (tables.king(sq) & state.pieces(by, Piece::King))
        | (tables.bishop(sq, occupied) & diagonal)
        | (tables.rook(sq, occupied) & orthogonal)
}

/// Returns true if any `by` piece attacks `sq`.
#[inline]
pub fn is_attacked(tables: &AttackTables, state: &BoardState, sq: Square, by: Color) -> bool {
    attackers(tables, state, sq, by).is_not_empty()
}

/// Pieces giving check to `color`'s king. Empty when that side has no king.
pub fn checkers(tables: &AttackTables, state: &BoardState, color: Color) -> Bitboard {
    match state.king_square(color) {
        Some(king) => attackers(tables, state, king, color.opposite()),
        None => Bitboard::EMPTY,
    }
}

/// Returns true if `color`'s king is attacked.
#[inline]
pub fn is_in_check(tables: &AttackTables, state: &BoardState, color: Color) -> bool {
    checkers(tables, state, color).is_not_empty()
}
