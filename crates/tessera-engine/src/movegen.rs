//! Move generation.
//!
//! Two phases: [`pseudo_legal`] reads attack tables and occupancy only, then
//! [`legal`] plays each candidate on a private copy of the board and keeps it
//! if the mover's king is not attacked afterwards. Castling is added for kings
//! by a dedicated check, since the king's path must be safe too.

use tessera_core::{Color, File, Move, Piece, Square};

use crate::apply::make_move;
use crate::error::{EngineError, Result};
use crate::threats::{is_attacked, is_in_check};
use crate::{AttackTables, Bitboard, BoardState};

/// Pseudo-legal destinations of the piece on `from`.
///
/// Fails with [`EngineError::PreconditionViolated`] if `from` is empty.
pub fn pseudo_legal(tables: &AttackTables, state: &BoardState, from: Square) -> Result<Bitboard> {
    let (piece, color) = occupant(state, from)?;
    Ok(pseudo_targets(tables, state, from, piece, color))
}

/// Legal destinations of the piece on `from`, castling included.
///
/// Generation follows the color of the piece on `from`, whatever the side to
/// move is. A side without a king never has moves filtered out.
pub fn legal(tables: &AttackTables, state: &BoardState, from: Square) -> Result<Bitboard> {
    let (piece, color) = occupant(state, from)?;
    Ok(legal_targets(tables, state, from, piece, color))
}

/// Every legal move of `color`, ordered by source square then destination.
pub fn legal_moves_for(tables: &AttackTables, state: &BoardState, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for from in state.color(color) {
        if let Some((piece, _)) = state.piece_at(from) {
            for to in legal_targets(tables, state, from, piece, color) {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_move(tables: &AttackTables, state: &BoardState, color: Color) -> bool {
    state.color(color).into_iter().any(|from| {
        state
            .piece_at(from)
            .is_some_and(|(piece, _)| legal_targets(tables, state, from, piece, color).is_not_empty())
    })
}

/// Square of a `color` pawn standing on its final rank, awaiting promotion.
pub fn pending_promotion(state: &BoardState, color: Color) -> Option<Square> {
    let final_rank = Bitboard(Bitboard::RANK_1.0 << (8 * color.promotion_rank()));
    (state.pieces(color, Piece::Pawn) & final_rank).lsb()
}

fn occupant(state: &BoardState, sq: Square) -> Result<(Piece, Color)> {
    state
        .piece_at(sq)
        .ok_or_else(|| EngineError::PreconditionViolated(format!("no piece on {}", sq)))
}

pub(crate) fn pseudo_targets(
    tables: &AttackTables,
    state: &BoardState,
    from: Square,
    piece: Piece,
    color: Color,
) -> Bitboard {
    let occupied = state.occupied();
    let targets = match piece {
        Piece::Pawn => pawn_targets(tables, state, from, color),
        Piece::Knight => tables.knight(from),
        Piece::Bishop => tables.bishop(from, occupied),
        Piece::Rook => tables.rook(from, occupied),
        Piece::Queen => tables.queen(from, occupied),
        Piece::King => tables.king(from),
    };
    targets & !state.color(color)
}

fn pawn_targets(tables: &AttackTables, state: &BoardState, from: Square, color: Color) -> Bitboard {
    let occupied = state.occupied();

    // A blocked first step also rules out the double step.
    let quiet = match from.offset(color.pawn_step()) {
        Some(ahead) if !occupied.contains(ahead) => tables.pawn_pushes(color, from) & !occupied,
        _ => Bitboard::EMPTY,
    };

    let attacks = tables.pawn_attacks(color, from);
    let mut captures = attacks & state.color(color.opposite());
    if let Some(target) = state.en_passant_for(color) {
        let passed = target.offset(-color.pawn_step());
        let passed_is_enemy_pawn = passed
            .is_some_and(|sq| state.pieces(color.opposite(), Piece::Pawn).contains(sq));
        if attacks.contains(target) && passed_is_enemy_pawn {
            captures.set(target);
        }
    }

    quiet | captures
}

pub(crate) fn legal_targets(
    tables: &AttackTables,
    state: &BoardState,
    from: Square,
    piece: Piece,
    color: Color,
) -> Bitboard {
    let mut legal = Bitboard::EMPTY;
    for to in pseudo_targets(tables, state, from, piece, color) {
        let mut next = *state;
        make_move(&mut next, from, to, piece, color);
        if !is_in_check(tables, &next, color) {
            legal.set(to);
        }
    }
    if piece == Piece::King {
        legal |= castling_targets(tables, state, from, color);
    }
    legal
}

#[inline]
fn back_rank_square(color: Color, file: File) -> Square {
    Square::from_index_masked(color.back_rank() * 8 + file.index())
}

/// King destinations for castling from `from`.
///
/// Needs the king on its home square, the rights bits of both king and rook
/// squares, the rook itself, empty squares in between, and no attack on any
/// square the king stands on or crosses.
pub(crate) fn castling_targets(
    tables: &AttackTables,
    state: &BoardState,
    from: Square,
    color: Color,
) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    if from != back_rank_square(color, File::E) {
        return targets;
    }

    let rights = state.castling();
    let occupied = state.occupied();
    let rooks = state.pieces(color, Piece::Rook);
    let enemy = color.opposite();
    let safe = |files: &[File]| {
        files
            .iter()
            .all(|&f| !is_attacked(tables, state, back_rank_square(color, f), enemy))
    };
    let empty = |files: &[File]| {
        files
            .iter()
            .all(|&f| !occupied.contains(back_rank_square(color, f)))
    };

    if rights.kingside(color)
        && rooks.contains(back_rank_square(color, File::H))
        && empty(&[File::F, File::G])
        && safe(&[File::E, File::F, File::G])
    {
        targets.set(back_rank_square(color, File::G));
    }

    if rights.queenside(color)
        && rooks.contains(back_rank_square(color, File::A))
        && empty(&[File::B, File::C, File::D])
        && safe(&[File::E, File::D, File::C])
    {
        targets.set(back_rank_square(color, File::C));
    }

    targets
}
