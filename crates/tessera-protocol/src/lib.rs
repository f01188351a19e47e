//! Engine side of a line-oriented game protocol.
//!
//! A GUI drives a [`Session`] with one command per line and reads back
//! plain-text responses.
//!
//! # Commands
//!
//! - `uci` / `uciok` - Handshake
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Reset to the starting position
//! - `makemove <code>` - Play a user move, `code = (from << 6) | to`
//! - `promote <piece>` - Resolve a pending user promotion
//! - `enginego [0|1]` - Let the engine search and play
//! - `getmoves <square>` - List legal move codes from a square
//! - `getboard` - Print the board, then `readyok`
//! - `quit` - Exit
//!
//! A move answer ends with `nextturn`, or with `awaiting` when the user must
//! pick a promotion piece. Rejected input is answered with `error <message>`.

mod command;
mod config;
mod error;
mod response;
mod session;

pub use command::Command;
pub use config::{ConfigError, EngineConfig};
pub use error::ProtocolError;
pub use response::{Event, Response};
pub use session::Session;

use std::io::{BufRead, Write};

use tracing::warn;

/// Reads commands from `reader` and writes responses to `writer`.
pub struct ProtocolLoop<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ProtocolLoop<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads one command. `None` at end of input.
    ///
    /// A line that is not UTF-8 is consumed and reported as a parse error.
    pub fn read_command(&mut self) -> Result<Option<Command>, ProtocolError> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8(bytes)
            .map_err(|_| ProtocolError::Parse("line is not valid UTF-8".to_string()))?;
        Command::parse(&line).map(Some)
    }

    /// Writes and flushes a batch of response lines.
    pub fn send(&mut self, responses: &[Response]) -> Result<(), ProtocolError> {
        for response in responses {
            writeln!(self.writer, "{}", response)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Serves `session` until `quit` or end of input.
    ///
    /// Unparsable lines are answered with an `error` line and the loop
    /// continues. Only I/O failures end it early.
    pub fn run(&mut self, session: &mut Session) -> Result<(), ProtocolError> {
        loop {
            let responses = match self.read_command() {
                Ok(None) | Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(command)) => session.handle(&command),
                Err(ProtocolError::Io(e)) => return Err(ProtocolError::Io(e)),
                Err(e) => {
                    warn!(error = %e, "unparsable command");
                    vec![Response::Error(e.to_string())]
                }
            };
            self.send(&responses)?;
        }
    }

    /// Returns the writer, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// A loop over stdin and stdout.
pub fn stdio_loop() -> ProtocolLoop<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    ProtocolLoop::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout())
}
