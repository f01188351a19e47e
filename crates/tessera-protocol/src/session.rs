//! Game session: one board driven by protocol commands.

use tessera_core::{Move, PromotionPiece, Square};
use tessera_engine::{
    apply, apply_and_promote, checkers, classify, find_best_move, legal, pending_promotion,
    promote, AttackTables, BoardState,
};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::{Command, Event, ProtocolError, Response};

/// Owns the board for one game and answers commands against it.
pub struct Session {
    tables: &'static AttackTables,
    search_depth: u32,
    auto_promotion: PromotionPiece,
    state: BoardState,
    pending: Option<Square>,
}

impl Session {
    /// Starts a session in the standard starting position.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_state(config, BoardState::startpos())
    }

    /// Starts a session from an arbitrary position.
    pub fn with_state(config: &EngineConfig, state: BoardState) -> Result<Self, ConfigError> {
        let auto_promotion = config.validate()?;
        Ok(Session {
            tables: AttackTables::shared(),
            search_depth: config.search_depth,
            auto_promotion,
            state,
            pending: None,
        })
    }

    /// The current board.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Square of a user pawn waiting for `promote`.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending
    }

    /// Runs one command. Failures become a single `error` line.
    pub fn handle(&mut self, command: &Command) -> Vec<Response> {
        debug!(?command, "handling command");
        match self.execute(command) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "command rejected");
                vec![Response::Error(e.to_string())]
            }
        }
    }

    fn execute(&mut self, command: &Command) -> Result<Vec<Response>, ProtocolError> {
        match command {
            Command::Uci => Ok(vec![Response::UciOk]),
            Command::IsReady => Ok(vec![Response::ReadyOk]),
            Command::UciNewGame => {
                self.state = BoardState::startpos();
                self.pending = None;
                info!("new game");
                Ok(vec![Response::ReadyOk])
            }
            Command::MakeMove(mv) => self.user_move(*mv),
            Command::Promote(name) => self.resolve_promotion(name),
            Command::EngineGo(color) => self.engine_move(*color),
            Command::GetMoves(sq) => self.moves_from(*sq),
            Command::GetBoard => Ok(vec![
                Response::Board(self.state.to_string()),
                Response::ReadyOk,
            ]),
            Command::Quit => Ok(Vec::new()),
            Command::Unknown(text) => {
                Err(ProtocolError::Parse(format!("unknown command '{}'", text)))
            }
        }
    }

    fn ensure_no_pending(&self) -> Result<(), ProtocolError> {
        match self.pending {
            Some(sq) => Err(ProtocolError::PromotionPending(sq.index())),
            None => Ok(()),
        }
    }

    fn user_move(&mut self, mv: Move) -> Result<Vec<Response>, ProtocolError> {
        self.ensure_no_pending()?;
        let side = self.state.side_to_move();
        let (from, to) = (mv.from(), mv.to());
        if self.state.color_at(from) != Some(side)
            || !legal(self.tables, &self.state, from)?.contains(to)
        {
            return Err(ProtocolError::IllegalMove(mv.to_uci()));
        }

        apply(&mut self.state, from, to)?;

        if let Some(sq) = pending_promotion(&self.state, side) {
            self.pending = Some(sq);
            return Ok(vec![
                Response::EventData(sq.index() as u64),
                Response::Event(Event::Promotion),
                Response::Awaiting,
            ]);
        }
        self.report()
    }

    fn resolve_promotion(&mut self, name: &str) -> Result<Vec<Response>, ProtocolError> {
        let sq = self.pending.ok_or(ProtocolError::NoPromotionPending)?;
        promote(&mut self.state, sq, name)?;
        self.pending = None;
        self.report()
    }

    fn engine_move(
        &mut self,
        color: Option<tessera_core::Color>,
    ) -> Result<Vec<Response>, ProtocolError> {
        self.ensure_no_pending()?;
        let side = self.state.side_to_move();
        if let Some(requested) = color.filter(|&c| c != side) {
            return Err(ProtocolError::WrongSide {
                expected: side.to_string(),
                requested: requested.to_string(),
            });
        }

        let result = find_best_move(self.tables, &self.state, self.search_depth, side)
            .ok_or_else(|| ProtocolError::NoLegalMove(side.to_string()))?;
        let (from, to) = (result.best_move.from(), result.best_move.to());
        info!(mv = %result.best_move, score = result.score, nodes = result.nodes, "engine move");

        let promoted = apply_and_promote(&mut self.state, from, to, self.auto_promotion)?;

        let mut lines = vec![Response::MoveData(vec![
            from.index() as u32,
            to.index() as u32,
        ])];
        if promoted {
            let code = side.index() * 6 + self.auto_promotion.piece().index();
            lines.push(Response::PromotionPc(code as u32));
        }
        lines.extend(self.report()?);
        Ok(lines)
    }

    fn moves_from(&self, sq: Square) -> Result<Vec<Response>, ProtocolError> {
        let mut lines: Vec<Response> = legal(self.tables, &self.state, sq)?
            .into_iter()
            .map(|to| Response::MoveCode(Move::new(sq, to).code()))
            .collect();
        lines.push(Response::ReadyOk);
        Ok(lines)
    }

    /// Event lines for the side now to move.
    fn report(&self) -> Result<Vec<Response>, ProtocolError> {
        let side = self.state.side_to_move();
        let status = classify(self.tables, &self.state)?;
        let threats = checkers(self.tables, &self.state, side);
        Ok(vec![
            Response::EventData(threats.0),
            Response::Event(Event::from_status(status, threats.is_not_empty())),
            Response::NextTurn,
        ])
    }
}
