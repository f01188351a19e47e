//! Move application and promotion.

use tessera_core::{Color, File, Piece, PromotionPiece, Square};

use crate::error::{EngineError, Result};
use crate::BoardState;

/// Plays the piece on `from` to `to`.
///
/// Handles captures, castling (a king moving two files also moves the rook),
/// en passant (the passed pawn is removed) and the en passant target and
/// castling-rights bookkeeping. The move is not checked for legality. A pawn
/// reaching its final rank stays a pawn until [`promote`] is called.
///
/// Fails without touching the state when `from` is empty, `to == from`, `to`
/// holds one of the mover's own pieces, or a castling move has no rook.
pub fn apply(state: &mut BoardState, from: Square, to: Square) -> Result<()> {
    let (piece, color) = state
        .piece_at(from)
        .ok_or_else(|| EngineError::PreconditionViolated(format!("no piece on {}", from)))?;
    if from == to {
        return Err(EngineError::PreconditionViolated(format!(
            "move from {} to itself",
            from
        )));
    }
    if state.color(color).contains(to) {
        return Err(EngineError::PreconditionViolated(format!(
            "{} is occupied by the moving side",
            to
        )));
    }
    if piece == Piece::King && is_castling(from, to) {
        let (rook_from, _) = castling_rook(color, from, to);
        if !state.pieces(color, Piece::Rook).contains(rook_from) {
            return Err(EngineError::PreconditionViolated(format!(
                "castling without a rook on {}",
                rook_from
            )));
        }
    }

    make_move(state, from, to, piece, color);
    Ok(())
}

/// Plays a move and promotes a pawn that reached its final rank.
///
/// Returns true if a promotion happened.
pub fn apply_and_promote(
    state: &mut BoardState,
    from: Square,
    to: Square,
    promotion: PromotionPiece,
) -> Result<bool> {
    apply(state, from, to)?;
    let promoted = reaches_final_rank(state, to);
    if promoted {
        promote_to(state, to, promotion)?;
    }
    Ok(promoted)
}

/// Replaces the pawn on `sq` with the piece named `name`.
///
/// Accepts `queen`, `rook`, `bishop`, `knight` and their initials.
pub fn promote(state: &mut BoardState, sq: Square, name: &str) -> Result<()> {
    let promotion: PromotionPiece = name.parse()?;
    promote_to(state, sq, promotion)
}

/// Replaces the pawn on `sq` with `promotion`.
///
/// The pawn must stand on its final rank.
pub fn promote_to(state: &mut BoardState, sq: Square, promotion: PromotionPiece) -> Result<()> {
    match state.piece_at(sq) {
        Some((Piece::Pawn, color)) if sq.rank_index() == color.promotion_rank() => {
            state.remove(sq);
            state.put(sq, promotion.piece(), color);
            Ok(())
        }
        _ => Err(EngineError::PreconditionViolated(format!(
            "no pawn to promote on {}",
            sq
        ))),
    }
}

fn reaches_final_rank(state: &BoardState, sq: Square) -> bool {
    matches!(state.piece_at(sq), Some((Piece::Pawn, color)) if sq.rank_index() == color.promotion_rank())
}

#[inline]
fn is_castling(from: Square, to: Square) -> bool {
    from.file_index().abs_diff(to.file_index()) == 2
}

/// Rook origin and destination for a castling king move.
fn castling_rook(color: Color, from: Square, to: Square) -> (Square, Square) {
    let rank = color.back_rank() * 8;
    let (rook_from, rook_to) = if to.file_index() > from.file_index() {
        (File::H, File::F)
    } else {
        (File::A, File::D)
    };
    (
        Square::from_index_masked(rank + rook_from.index()),
        Square::from_index_masked(rank + rook_to.index()),
    )
}

/// Plays a move whose mover is already known. Callers guarantee `to` does not
/// hold one of the mover's pieces.
pub(crate) fn make_move(state: &mut BoardState, from: Square, to: Square, piece: Piece, color: Color) {
    let rights = state.castling_mut();
    rights.clear(from);
    rights.clear(to);

    match piece {
        Piece::Pawn if state.en_passant_for(color) == Some(to) => {
            if let Some(passed) = to.offset(-color.pawn_step()) {
                state.remove(passed);
            }
            relocate(state, from, to, piece, color);
            state.set_en_passant(None);
        }
        Piece::Pawn => {
            state.remove(to);
            relocate(state, from, to, piece, color);
            let double_step = from.index().abs_diff(to.index()) == 16;
            let passed = if double_step {
                from.offset(color.pawn_step())
            } else {
                None
            };
            state.set_en_passant(passed);
        }
        Piece::King if is_castling(from, to) => {
            let (rook_from, rook_to) = castling_rook(color, from, to);
            relocate(state, from, to, piece, color);
            relocate(state, rook_from, rook_to, Piece::Rook, color);
            state.set_en_passant(None);
        }
        _ => {
            state.remove(to);
            relocate(state, from, to, piece, color);
            state.set_en_passant(None);
        }
    }

    state.set_side_to_move(color.opposite());
}

/// Plays a move and queens a pawn that reached its final rank.
pub(crate) fn make_move_auto_queen(
    state: &mut BoardState,
    from: Square,
    to: Square,
    piece: Piece,
    color: Color,
) {
    make_move(state, from, to, piece, color);
    if piece == Piece::Pawn && to.rank_index() == color.promotion_rank() {
        state.remove(to);
        state.put(to, Piece::Queen, color);
    }
}

fn relocate(state: &mut BoardState, from: Square, to: Square, piece: Piece, color: Color) {
    state.remove(from);
    state.put(to, piece, color);
}
