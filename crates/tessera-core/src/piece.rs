//! Chess piece representation.

use std::fmt;
use std::str::FromStr;

use crate::{Color, CoreError};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece kinds in index order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece a pawn may be promoted to.
///
/// Promotion is not part of the move code; callers name the piece separately
/// once a pawn reaches its final rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionPiece {
    /// The piece kind this promotion produces.
    #[inline]
    pub const fn piece(self) -> Piece {
        match self {
            PromotionPiece::Knight => Piece::Knight,
            PromotionPiece::Bishop => Piece::Bishop,
            PromotionPiece::Rook => Piece::Rook,
            PromotionPiece::Queen => Piece::Queen,
        }
    }

    /// Lowercase name used on the wire and in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            PromotionPiece::Knight => "knight",
            PromotionPiece::Bishop => "bishop",
            PromotionPiece::Rook => "rook",
            PromotionPiece::Queen => "queen",
        }
    }
}

impl FromStr for PromotionPiece {
    type Err = CoreError;

    /// Accepts full names (`queen`, `rook`, `bishop`, `knight`) or their
    /// single-letter forms (`q`, `r`, `b`, `n`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queen" | "q" => Ok(PromotionPiece::Queen),
            "rook" | "r" => Ok(PromotionPiece::Rook),
            "bishop" | "b" => Ok(PromotionPiece::Bishop),
            "knight" | "n" => Ok(PromotionPiece::Knight),
            _ => Err(CoreError::InvalidPromotion(s.to_string())),
        }
    }
}

impl fmt::Display for PromotionPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_to_fen() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(Piece::from_fen_char('K'), Some((Piece::King, Color::White)));
        assert_eq!(Piece::from_fen_char('q'), Some((Piece::Queen, Color::Black)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn promotion_names() {
        assert_eq!("queen".parse(), Ok(PromotionPiece::Queen));
        assert_eq!("R".parse(), Ok(PromotionPiece::Rook));
        assert_eq!(" Bishop ".parse(), Ok(PromotionPiece::Bishop));
        assert_eq!("n".parse(), Ok(PromotionPiece::Knight));
        assert_eq!(PromotionPiece::Knight.piece(), Piece::Knight);
    }

    #[test]
    fn promotion_rejects_kings_and_pawns() {
        for name in ["king", "pawn", "k", "", "queen!"] {
            assert_eq!(
                name.parse::<PromotionPiece>(),
                Err(CoreError::InvalidPromotion(name.to_string()))
            );
        }
    }
}
