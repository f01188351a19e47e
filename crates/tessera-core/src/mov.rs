//! Move representation.

use std::fmt;

use crate::{CoreError, Square};

/// A move from one square to another.
///
/// Encoded as `(from << 6) | to`, each square a six-bit index. Promotion is
/// not part of the code: it is chosen separately once the pawn has landed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a move between two squares.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move(((from.index() as u16) << 6) | to.index() as u16)
    }

    /// Decodes a move code, rejecting values wider than twelve bits.
    pub fn from_code(code: u32) -> Result<Self, CoreError> {
        if code < (1 << 12) {
            Ok(Move(code as u16))
        } else {
            Err(CoreError::InvalidMoveCode(code))
        }
    }

    /// Returns the packed move code.
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_masked((self.0 >> 6) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_masked((self.0 & 0x3F) as u8)
    }

    /// Returns coordinate notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from(), self.to())
    }

    /// Parses coordinate notation ("e2e4"). A trailing promotion letter is
    /// not accepted since promotion travels separately.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() != 4 {
            return None;
        }
        let from = Square::from_algebraic(s.get(0..2)?)?;
        let to = Square::from_algebraic(s.get(2..4)?)?;
        Some(Move::new(from, to))
    }
}

impl From<Move> for u16 {
    fn from(m: Move) -> u16 {
        m.code()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_encoding() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4);

        assert_eq!(m.code(), (12 << 6) | 28);
        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
    }

    #[test]
    fn move_from_code() {
        let m = Move::from_code((6 << 6) | 21).unwrap();
        assert_eq!(m.to_uci(), "g1f3");
        assert_eq!(Move::from_code(4096), Err(CoreError::InvalidMoveCode(4096)));
    }

    #[test]
    fn move_uci() {
        let m = Move::from_uci("e7e5").unwrap();
        assert_eq!(m.from().to_algebraic(), "e7");
        assert_eq!(m.to().to_algebraic(), "e5");
        assert_eq!(format!("{}", m), "e7e5");
        assert_eq!(format!("{:?}", m), "Move(e7e5)");
    }

    #[test]
    fn move_from_uci_rejects_malformed() {
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e7e8q").is_none());
        assert!(Move::from_uci("é2e4").is_none());
    }
}
