//! Game-end classification.

use std::fmt;

use tessera_core::Piece;

use crate::error::{EngineError, Result};
use crate::movegen::{has_legal_move, legal_targets};
use crate::threats::attackers;
use crate::{AttackTables, BoardState};

/// Whether the side to move can still play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// At least one legal move exists.
    Ongoing,
    /// No legal move and the king is attacked.
    Checkmate,
    /// No legal move and the king is safe.
    Stalemate,
}

impl GameStatus {
    /// Protocol name: `none`, `checkmate` or `stalemate`.
    pub const fn name(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "none",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies the position for the side to move.
///
/// In double check only king moves can help, so only the king is tried.
/// Fails if the side to move has no king.
pub fn classify(tables: &AttackTables, state: &BoardState) -> Result<GameStatus> {
    let color = state.side_to_move();
    let king = state.king_square(color).ok_or_else(|| {
        EngineError::PreconditionViolated(format!("{} has no king", color))
    })?;
    let checkers = attackers(tables, state, king, color.opposite());

    let can_move = if checkers.has_several() {
        legal_targets(tables, state, king, Piece::King, color).is_not_empty()
    } else {
        has_legal_move(tables, state, color)
    };

    Ok(match (can_move, checkers.is_not_empty()) {
        (true, _) => GameStatus::Ongoing,
        (false, true) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str) -> GameStatus {
        let state = BoardState::from_fen(fen).unwrap();
        classify(AttackTables::shared(), &state).unwrap()
    }

    #[test]
    fn startpos_is_ongoing() {
        let status = classify(AttackTables::shared(), &BoardState::startpos()).unwrap();
        assert_eq!(status, GameStatus::Ongoing);
        assert_eq!(status.to_string(), "none");
        assert!(!status.is_over());
    }

    #[test]
    fn back_rank_mate() {
        assert_eq!(status("3R2k1/5ppp/8/8/8/8/8/6K1 b - -"), GameStatus::Checkmate);
    }

    #[test]
    fn check_with_escape() {
        assert_eq!(status("3R2k1/5pp1/8/8/8/8/8/6K1 b - -"), GameStatus::Ongoing);
    }

    #[test]
    fn check_answered_by_capture() {
        assert_eq!(status("3R2k1/5ppp/8/8/8/8/7K/3r4 b - -"), GameStatus::Ongoing);
    }

    #[test]
    fn lone_king_stalemate() {
        assert_eq!(status("7k/5Q2/6K1/8/8/8/8/8 b - -"), GameStatus::Stalemate);
    }

    #[test]
    fn double_check_mate_only_tries_king() {
        // Rook and knight both check. hxg3 removes one checker, not both.
        assert_eq!(status("4k3/8/8/8/8/6n1/6PP/r6K w - -"), GameStatus::Checkmate);
    }

    #[test]
    fn double_check_with_king_escape() {
        assert_eq!(status("4k3/8/8/8/1b6/8/8/r3K3 w - -"), GameStatus::Ongoing);
    }

    #[test]
    fn missing_king_is_rejected() {
        let state = BoardState::from_fen("4k3/8/8/8/8/8/8/8 w - -").unwrap();
        assert!(matches!(
            classify(AttackTables::shared(), &state),
            Err(EngineError::PreconditionViolated(_))
        ));
    }
}
