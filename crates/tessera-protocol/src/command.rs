//! Command parsing.

use tessera_core::{Color, Move, Square};

use crate::ProtocolError;

/// Commands sent from the client to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Handshake.
    Uci,
    /// Synchronization.
    IsReady,
    /// Reset to the starting position.
    UciNewGame,
    /// Play a user move given as `(from << 6) | to`.
    MakeMove(Move),
    /// Resolve a pending promotion.
    Promote(String),
    /// Let the engine move, optionally asserting its color (0 white, 1 black).
    EngineGo(Option<Color>),
    /// List legal move codes from a square.
    GetMoves(Square),
    /// Print the board for debugging.
    GetBoard,
    /// End the session.
    Quit,
    /// Anything else, kept for the error message.
    Unknown(String),
}

impl Command {
    /// Parses one input line.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "uci" => Ok(Command::Uci),
            "isready" => Ok(Command::IsReady),
            "ucinewgame" => Ok(Command::UciNewGame),
            "quit" => Ok(Command::Quit),
            "getboard" => Ok(Command::GetBoard),
            "makemove" => {
                let code = Self::number(cmd, parts.next())?;
                let mv = Move::from_code(code)
                    .map_err(|e| ProtocolError::Parse(e.to_string()))?;
                Ok(Command::MakeMove(mv))
            }
            "promote" => match parts.next() {
                Some(piece) => Ok(Command::Promote(piece.to_string())),
                None => Err(ProtocolError::Parse("promote: missing piece".to_string())),
            },
            "enginego" => match parts.next() {
                None => Ok(Command::EngineGo(None)),
                Some(arg) => {
                    let color = arg
                        .parse::<u8>()
                        .ok()
                        .and_then(Color::from_index)
                        .ok_or_else(|| {
                            ProtocolError::Parse(format!("enginego: invalid color '{}'", arg))
                        })?;
                    Ok(Command::EngineGo(Some(color)))
                }
            },
            "getmoves" => {
                let index = Self::number(cmd, parts.next())?;
                let square = Square::try_from(index)
                    .map_err(|e| ProtocolError::Parse(e.to_string()))?;
                Ok(Command::GetMoves(square))
            }
            _ => Ok(Command::Unknown(input.to_string())),
        }
    }

    fn number(cmd: &str, arg: Option<&str>) -> Result<u32, ProtocolError> {
        let arg = arg.ok_or_else(|| ProtocolError::Parse(format!("{}: missing argument", cmd)))?;
        arg.parse()
            .map_err(|_| ProtocolError::Parse(format!("{}: '{}' is not a number", cmd, arg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handshake() {
        assert_eq!(Command::parse("uci").unwrap(), Command::Uci);
        assert_eq!(Command::parse("  isready\n").unwrap(), Command::IsReady);
        assert_eq!(Command::parse("ucinewgame").unwrap(), Command::UciNewGame);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn parse_makemove() {
        // e2e4 = (12 << 6) | 28
        let cmd = Command::parse("makemove 796").unwrap();
        assert_eq!(cmd, Command::MakeMove(Move::from_uci("e2e4").unwrap()));
        assert!(matches!(Command::parse("makemove"), Err(ProtocolError::Parse(_))));
        assert!(matches!(Command::parse("makemove e2e4"), Err(ProtocolError::Parse(_))));
        assert!(matches!(Command::parse("makemove 4096"), Err(ProtocolError::Parse(_))));
    }

    #[test]
    fn parse_enginego() {
        assert_eq!(Command::parse("enginego").unwrap(), Command::EngineGo(None));
        assert_eq!(
            Command::parse("enginego 1").unwrap(),
            Command::EngineGo(Some(Color::Black))
        );
        assert!(Command::parse("enginego 2").is_err());
    }

    #[test]
    fn parse_getmoves_and_promote() {
        assert_eq!(
            Command::parse("getmoves 12").unwrap(),
            Command::GetMoves(Square::from_algebraic("e2").unwrap())
        );
        assert!(Command::parse("getmoves 64").is_err());
        assert_eq!(
            Command::parse("promote rook").unwrap(),
            Command::Promote("rook".to_string())
        );
        assert!(Command::parse("promote").is_err());
    }

    #[test]
    fn unknown_is_kept() {
        assert_eq!(Command::parse("getboard").unwrap(), Command::GetBoard);
        assert_eq!(
            Command::parse("position startpos").unwrap(),
            Command::Unknown("position startpos".to_string())
        );
        assert_eq!(Command::parse("").unwrap(), Command::Unknown(String::new()));
    }
}
