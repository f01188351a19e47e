//! Player color representation.

/// The two sides of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns +1 for White and -1 for Black.
    ///
    /// Multiplying a white-relative score by this yields the score from this
    /// color's point of view.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Square-index offset of a single pawn step (+8 for White, -8 for Black).
    #[inline]
    pub const fn pawn_step(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// Rank index the pawns of this color start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Returns the back rank for this color (0 for White, 7 for Black).
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Parses the protocol color index (0 = White, 1 = Black).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn sign_flips_score_perspective() {
        assert_eq!(Color::White.sign() * 150, 150);
        assert_eq!(Color::Black.sign() * 150, -150);
    }

    #[test]
    fn pawn_geometry() {
        assert_eq!(Color::White.pawn_step(), 8);
        assert_eq!(Color::Black.pawn_step(), -8);
        assert_eq!(Color::White.pawn_rank(), 1);
        assert_eq!(Color::Black.promotion_rank(), 0);
    }

    #[test]
    fn from_protocol_index() {
        assert_eq!(Color::from_index(0), Some(Color::White));
        assert_eq!(Color::from_index(1), Some(Color::Black));
        assert_eq!(Color::from_index(2), None);
    }
}
