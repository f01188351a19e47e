//! Board state: piece bitboards, castling rights and en passant target.

use std::fmt;

use tessera_core::{Color, Fen, FenError, Piece, Square};

use crate::Bitboard;

/// Castling rights as a set of squares.
///
/// A bit is kept for each of the six king and rook start squares
/// (a1, e1, h1, a8, e8, h8). Once a piece leaves or is captured on one of
/// them the bit is cleared for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(Bitboard);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(Bitboard::EMPTY);

    /// All six start squares.
    pub const ALL: CastlingRights = CastlingRights(Bitboard(0x9100_0000_0000_0091));

    /// Creates rights from a raw square mask, dropping squares outside the six.
    #[inline]
    pub const fn new(mask: u64) -> Self {
        CastlingRights(Bitboard(mask & Self::ALL.0 .0))
    }

    #[inline]
    pub const fn has(self, sq: Square) -> bool {
        self.0.contains(sq)
    }

    /// Clears the bit for `sq`, if it carries one.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0.clear(sq);
    }

    /// Returns the rights as a bitboard.
    #[inline]
    pub const fn squares(self) -> Bitboard {
        self.0
    }

    /// True if `self` holds no square that `other` lacks.
    #[inline]
    pub const fn is_subset_of(self, other: CastlingRights) -> bool {
        self.0 .0 & !other.0 .0 == 0
    }

    /// Kingside: king square and h-file rook square both intact.
    pub const fn kingside(self, color: Color) -> bool {
        let (king, rook) = match color {
            Color::White => (Square::E1, Square::H1),
            Color::Black => (Square::E8, Square::H8),
        };
        self.has(king) && self.has(rook)
    }

    /// Queenside: king square and a-file rook square both intact.
    pub const fn queenside(self, color: Color) -> bool {
        let (king, rook) = match color {
            Color::White => (Square::E1, Square::A1),
            Color::Black => (Square::E8, Square::A8),
        };
        self.has(king) && self.has(rook)
    }

    fn from_fen_letters(letters: &str) -> Self {
        let mut mask = Bitboard::EMPTY;
        for c in letters.chars() {
            let squares = match c {
                'K' => [Square::E1, Square::H1],
                'Q' => [Square::E1, Square::A1],
                'k' => [Square::E8, Square::H8],
                'q' => [Square::E8, Square::A8],
                _ => continue,
            };
            for sq in squares {
                mask.set(sq);
            }
        }
        CastlingRights(mask)
    }

    fn to_fen_letters(self) -> String {
        let mut out = String::new();
        for (available, letter) in [
            (self.kingside(Color::White), 'K'),
            (self.queenside(Color::White), 'Q'),
            (self.kingside(Color::Black), 'k'),
            (self.queenside(Color::Black), 'q'),
        ] {
            if available {
                out.push(letter);
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }
}

/// The complete mutable board.
///
/// Twelve piece bitboards indexed `[color][piece]`, two color bitboards, the
/// castling rights, an optional en passant target and the side to move.
/// A state is only ever advanced by copying it and applying one move to the
/// copy; there is no undo.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    pieces: [[Bitboard; 6]; 2],
    colors: [Bitboard; 2],
    castling: CastlingRights,
    en_passant: Option<Square>,
    side_to_move: Color,
}

impl BoardState {
    /// A board with no pieces, no rights and White to move.
    pub fn empty() -> Self {
        BoardState {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            colors: [Bitboard::EMPTY; 2],
            castling: CastlingRights::NONE,
            en_passant: None,
            side_to_move: Color::White,
        }
    }

    /// The standard starting position.
    pub fn startpos() -> Self {
        BoardState {
            pieces: [
                [
                    Bitboard(0x0000_0000_0000_FF00),
                    Bitboard(0x0000_0000_0000_0042),
                    Bitboard(0x0000_0000_0000_0024),
                    Bitboard(0x0000_0000_0000_0081),
                    Bitboard(0x0000_0000_0000_0008),
                    Bitboard(0x0000_0000_0000_0010),
                ],
                [
                    Bitboard(0x00FF_0000_0000_0000),
                    Bitboard(0x4200_0000_0000_0000),
                    Bitboard(0x2400_0000_0000_0000),
                    Bitboard(0x8100_0000_0000_0000),
                    Bitboard(0x0800_0000_0000_0000),
                    Bitboard(0x1000_0000_0000_0000),
                ],
            ],
            colors: [
                Bitboard(0x0000_0000_0000_FFFF),
                Bitboard(0xFFFF_0000_0000_0000),
            ],
            castling: CastlingRights::ALL,
            en_passant: None,
            side_to_move: Color::White,
        }
    }

    /// Builds a state from FEN. Clock fields are validated but not kept.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let mut state = BoardState::empty();
        for (sq, piece, color) in parsed.placement {
            state.put(sq, piece, color);
        }
        state.side_to_move = parsed.side_to_move;
        state.castling = CastlingRights::from_fen_letters(&parsed.castling);
        state.en_passant = parsed.en_passant;
        Ok(state)
    }

    /// Writes the state as FEN, with clocks fixed at `0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index_masked(rank * 8 + file);
                match self.piece_at(sq) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');
        fen.push_str(&self.castling.to_fen_letters());
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }
        fen.push_str(" 0 1");
        fen
    }

    /// Bitboard of one piece kind of one color.
    #[inline]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All squares held by `color`.
    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The en passant target, but only if a `color` pawn may capture onto it.
    ///
    /// A target on rank 3 belongs to a white double step and is only
    /// capturable by Black; one on rank 6 only by White.
    #[inline]
    pub fn en_passant_for(&self, color: Color) -> Option<Square> {
        let capture_rank = match color {
            Color::White => 5,
            Color::Black => 2,
        };
        self.en_passant.filter(|sq| sq.rank_index() == capture_rank)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Overrides the side to move, e.g. when a caller searches for a fixed color.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Returns the piece and its color on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = self.color_at(sq)?;
        Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces[color.index()][piece.index()].contains(sq))
            .map(|piece| (piece, color))
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        Color::BOTH.into_iter().find(|c| self.colors[c.index()].contains(sq))
    }

    /// Square of `color`'s king, if it has one.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Checks that piece and color bitboards partition occupancy consistently.
    pub fn is_consistent(&self) -> bool {
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces(color, piece);
                if (union & bb).is_not_empty() {
                    return false;
                }
                union |= bb;
            }
            if union != self.colors[color.index()] {
                return false;
            }
        }
        (self.colors[0] & self.colors[1]).is_empty()
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.pieces[color.index()][piece.index()].set(sq);
        self.colors[color.index()].set(sq);
    }

    /// Removes whatever stands on `sq` and returns it.
    pub(crate) fn remove(&mut self, sq: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.piece_at(sq)?;
        self.pieces[color.index()][piece.index()].clear(sq);
        self.colors[color.index()].clear(sq);
        Some((piece, color))
    }

    pub(crate) fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardState({})", self.to_fen())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_index_masked(rank * 8 + file);
                let c = self
                    .piece_at(sq)
                    .map_or('.', |(piece, color)| piece.to_fen_char(color));
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_matches_fen() {
        let literal = BoardState::startpos();
        let parsed = BoardState::from_fen(Fen::STARTPOS).unwrap();
        assert_eq!(literal, parsed);
        assert_eq!(literal.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn startpos_layout() {
        let state = BoardState::startpos();
        assert_eq!(state.occupied().count(), 32);
        assert_eq!(state.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(state.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(state.piece_at(Square::from_index_masked(28)), None);
        assert_eq!(state.king_square(Color::Black), Some(Square::E8));
        assert!(state.is_consistent());
    }

    #[test]
    fn castling_rights_squares() {
        let mut rights = CastlingRights::ALL;
        assert_eq!(rights.squares().count(), 6);
        assert!(rights.kingside(Color::White) && rights.queenside(Color::Black));

        rights.clear(Square::H1);
        assert!(!rights.kingside(Color::White));
        assert!(rights.queenside(Color::White));

        rights.clear(Square::E8);
        assert!(!rights.kingside(Color::Black) && !rights.queenside(Color::Black));
        assert!(rights.is_subset_of(CastlingRights::ALL));

        // Clearing a square outside the six changes nothing.
        let before = rights;
        rights.clear(Square::from_index_masked(27));
        assert_eq!(rights, before);
    }

    #[test]
    fn castling_rights_from_fen() {
        let state = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(state.castling().kingside(Color::White));
        assert!(!state.castling().queenside(Color::White));
        assert!(state.castling().queenside(Color::Black));
        assert!(!state.castling().kingside(Color::Black));
        assert_eq!(state.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    }

    #[test]
    fn fen_roundtrip_keeps_side_and_en_passant() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 1";
        let state = BoardState::from_fen(fen).unwrap();
        assert_eq!(state.en_passant(), Square::from_algebraic("e6"));
        assert_eq!(state.to_fen(), fen);

        let black = BoardState::from_fen("8/8/8/8/8/8/8/k6K b - -").unwrap();
        assert_eq!(black.side_to_move(), Color::Black);
        assert_eq!(black.to_fen(), "8/8/8/8/8/8/8/k6K b - - 0 1");
    }

    #[test]
    fn en_passant_belongs_to_one_side() {
        let state = BoardState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3").unwrap();
        assert_eq!(state.en_passant_for(Color::Black), Square::from_algebraic("e3"));
        assert_eq!(state.en_passant_for(Color::White), None);
    }

    #[test]
    fn put_and_remove() {
        let mut state = BoardState::empty();
        let d4 = Square::from_algebraic("d4").unwrap();
        state.put(d4, Piece::Knight, Color::Black);
        assert_eq!(state.piece_at(d4), Some((Piece::Knight, Color::Black)));
        assert!(state.is_consistent());

        assert_eq!(state.remove(d4), Some((Piece::Knight, Color::Black)));
        assert_eq!(state.remove(d4), None);
        assert!(state.occupied().is_empty());
    }

    #[test]
    fn display_grid() {
        let text = BoardState::startpos().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.ends_with("  a b c d e f g h"));
    }
}
