//! Fixed-depth alpha-beta search.
//!
//! One canonical routine, [`Searcher::negamax`], scores positions from the
//! side to move's point of view. [`Searcher::alpha_beta`] presents the same
//! search as a maximizer/minimizer over White-relative scores.
//!
//! Moves are tried in generation order: ascending source square, then
//! ascending destination. Cutoffs are fail-hard. A pawn reaching its final
//! rank inside the tree becomes a queen.

use tessera_core::{Color, Move};
use tracing::{debug, trace};

use crate::apply::make_move_auto_queen;
use crate::eval::evaluate;
use crate::movegen::legal_targets;
use crate::threats::is_in_check;
use crate::{AttackTables, BoardState};

/// Base score for a mated side; the remaining depth is added so that nearer
/// mates score further from zero.
pub const MATE_SCORE: i32 = 100_000;

/// Bound larger than any reachable score.
pub const SCORE_INFINITY: i32 = 1_000_000_000;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub nodes: u64,
}

/// Search state shared across one root search.
pub struct Searcher<'a> {
    tables: &'a AttackTables,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Searcher { tables, nodes: 0 }
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Scores `state` for its side to move.
    pub fn negamax(&mut self, state: &BoardState, depth: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let color = state.side_to_move();

        if depth == 0 {
            return color.sign() * evaluate(state);
        }

        let mut any_move = false;
        for (_, child) in children(self.tables, state, color) {
            any_move = true;
            let score = -self.negamax(&child, depth - 1, -beta, -alpha);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        if !any_move {
            return if is_in_check(self.tables, state, color) {
                -(MATE_SCORE + depth as i32)
            } else {
                0
            };
        }

        alpha
    }

    /// White-relative score of `state` with `maximizing` to move.
    ///
    /// White maximizes and Black minimizes.
    pub fn alpha_beta(
        &mut self,
        state: &BoardState,
        depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: Color,
    ) -> i32 {
        let mut position = *state;
        position.set_side_to_move(maximizing);
        match maximizing {
            Color::White => self.negamax(&position, depth, alpha, beta),
            Color::Black => -self.negamax(&position, depth, -beta, -alpha),
        }
    }
}

/// Legal successors of `state` for `color`, in generation order.
fn children<'s>(
    tables: &'s AttackTables,
    state: &'s BoardState,
    color: Color,
) -> impl Iterator<Item = (Move, BoardState)> + 's {
    state.color(color).into_iter().flat_map(move |from| {
        let piece = state.piece_at(from).map(|(piece, _)| piece);
        piece.into_iter().flat_map(move |piece| {
            legal_targets(tables, state, from, piece, color)
                .into_iter()
                .map(move |to| {
                    let mut child = *state;
                    make_move_auto_queen(&mut child, from, to, piece, color);
                    (Move::new(from, to), child)
                })
        })
    })
}

/// Best move for `color`, scored from `color`'s point of view.
///
/// A `depth` of zero is treated as one. Returns `None` when `color` has no
/// legal move.
pub fn find_best_move(
    tables: &AttackTables,
    state: &BoardState,
    depth: u32,
    color: Color,
) -> Option<SearchResult> {
    let mut root = *state;
    root.set_side_to_move(color);
    let mut searcher = Searcher::new(tables);
    searcher.nodes = 1;

    let child_depth = depth.max(1) - 1;
    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for (mv, child) in children(tables, &root, color) {
        let score = -searcher.negamax(&child, child_depth, -beta, -alpha);
        trace!(%mv, score, "root move");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    finish(best, searcher.nodes, depth, color)
}

/// Best move for `color` through the maximizer/minimizer view.
///
/// The score is White-relative. Picks the same move as [`find_best_move`]
/// and reports the same score up to sign.
pub fn find_best_move_minimax(
    tables: &AttackTables,
    state: &BoardState,
    depth: u32,
    color: Color,
) -> Option<SearchResult> {
    let mut root = *state;
    root.set_side_to_move(color);
    let mut searcher = Searcher::new(tables);
    searcher.nodes = 1;

    let child_depth = depth.max(1) - 1;
    let mut alpha = -SCORE_INFINITY;
    let mut beta = SCORE_INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for (mv, child) in children(tables, &root, color) {
        let score = searcher.alpha_beta(&child, child_depth, alpha, beta, color.opposite());
        trace!(%mv, score, "root move");
        let improves = match (color, best) {
            (_, None) => true,
            (Color::White, Some((_, best_score))) => score > best_score,
            (Color::Black, Some((_, best_score))) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
        }
        match color {
            Color::White => alpha = alpha.max(score),
            Color::Black => beta = beta.min(score),
        }
    }

    finish(best, searcher.nodes, depth, color)
}

fn finish(best: Option<(Move, i32)>, nodes: u64, depth: u32, color: Color) -> Option<SearchResult> {
    let (best_move, score) = best?;
    debug!(depth, side = %color, best = %best_move, score, nodes, "search complete");
    Some(SearchResult {
        best_move,
        score,
        nodes,
    })
}
