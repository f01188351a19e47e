//! Lines sent from the engine to the client.

use std::fmt;

use tessera_engine::GameStatus;

/// What happened after a move, reported on an `event` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Check,
    Checkmate,
    Stalemate,
    Promotion,
}

impl Event {
    /// Combines the game status with whether the side to move is in check.
    pub fn from_status(status: GameStatus, in_check: bool) -> Self {
        match status {
            GameStatus::Checkmate => Event::Checkmate,
            GameStatus::Stalemate => Event::Stalemate,
            GameStatus::Ongoing if in_check => Event::Check,
            GameStatus::Ongoing => Event::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Event::None => "none",
            Event::Check => "check",
            Event::Checkmate => "checkmate",
            Event::Stalemate => "stalemate",
            Event::Promotion => "promotion",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    UciOk,
    ReadyOk,
    /// Source and destination of the engine's move.
    MoveData(Vec<u32>),
    /// Piece code (`color * 6 + piece`) the engine promoted to.
    PromotionPc(u32),
    /// Checker bitboard, or the promotion square for [`Event::Promotion`].
    EventData(u64),
    Event(Event),
    /// A bare legal move code from `getmoves`.
    MoveCode(u16),
    /// Text grid of the board from `getboard`, possibly several lines.
    Board(String),
    /// Terminal line: the other side may move.
    NextTurn,
    /// Terminal line: a promotion choice is needed.
    Awaiting,
    /// Rejected input.
    Error(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::UciOk => f.write_str("uciok"),
            Response::ReadyOk => f.write_str("readyok"),
            Response::MoveData(values) => {
                f.write_str("move_data")?;
                for v in values {
                    write!(f, " {}", v)?;
                }
                Ok(())
            }
            Response::PromotionPc(code) => write!(f, "promotion_pc {}", code),
            Response::EventData(data) => write!(f, "event_data {}", data),
            Response::Event(event) => write!(f, "event {}", event),
            Response::MoveCode(code) => write!(f, "{}", code),
            Response::Board(grid) => f.write_str(grid),
            Response::NextTurn => f.write_str("nextturn"),
            Response::Awaiting => f.write_str("awaiting"),
            Response::Error(message) => write!(f, "error {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines() {
        assert_eq!(Response::UciOk.to_string(), "uciok");
        assert_eq!(Response::MoveData(vec![12, 28]).to_string(), "move_data 12 28");
        assert_eq!(Response::PromotionPc(4).to_string(), "promotion_pc 4");
        assert_eq!(Response::EventData(0).to_string(), "event_data 0");
        assert_eq!(Response::Event(Event::Check).to_string(), "event check");
        assert_eq!(Response::MoveCode(796).to_string(), "796");
        assert_eq!(Response::Awaiting.to_string(), "awaiting");
        assert_eq!(
            Response::Board("8 . .\n  a b".to_string()).to_string(),
            "8 . .\n  a b"
        );
        assert_eq!(
            Response::Error("bad".to_string()).to_string(),
            "error bad"
        );
    }

    #[test]
    fn events_from_status() {
        assert_eq!(Event::from_status(GameStatus::Ongoing, false), Event::None);
        assert_eq!(Event::from_status(GameStatus::Ongoing, true), Event::Check);
        assert_eq!(Event::from_status(GameStatus::Checkmate, true), Event::Checkmate);
        assert_eq!(Event::from_status(GameStatus::Stalemate, false), Event::Stalemate);
    }
}
