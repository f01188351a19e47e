//! Perft (performance test) for move generator validation.
//!
//! Counts leaf nodes of the legal move tree to a fixed depth. Each
//! (source, destination) pair is one move; a pawn reaching its final rank is
//! queened, so underpromotions are not counted separately.

use tessera_core::Move;

use crate::apply::make_move_auto_queen;
use crate::movegen::legal_targets;
use crate::{AttackTables, BoardState};

/// Counts leaf nodes `depth` plies below `state` for its side to move.
pub fn perft(tables: &AttackTables, state: &BoardState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let color = state.side_to_move();
    let mut nodes = 0u64;
    for from in state.color(color) {
        let Some((piece, _)) = state.piece_at(from) else {
            continue;
        };
        let targets = legal_targets(tables, state, from, piece, color);
        if depth == 1 {
            nodes += targets.count() as u64;
            continue;
        }
        for to in targets {
            let mut child = *state;
            make_move_auto_queen(&mut child, from, to, piece, color);
            nodes += perft(tables, &child, depth - 1);
        }
    }
    nodes
}

/// Per-move leaf counts at `depth`, sorted by move text.
pub fn perft_divide(tables: &AttackTables, state: &BoardState, depth: u32) -> Vec<(Move, u64)> {
    let color = state.side_to_move();
    let mut results = Vec::new();
    for from in state.color(color) {
        let Some((piece, _)) = state.piece_at(from) else {
            continue;
        };
        for to in legal_targets(tables, state, from, piece, color) {
            let mut child = *state;
            make_move_auto_queen(&mut child, from, to, piece, color);
            let nodes = perft(tables, &child, depth.saturating_sub(1));
            results.push((Move::new(from, to), nodes));
        }
    }
    results.sort_by_key(|(mv, _)| mv.to_uci());
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn count(fen: &str, depth: u32) -> u64 {
        let state = BoardState::from_fen(fen).unwrap();
        perft(AttackTables::shared(), &state, depth)
    }

    #[test]
    fn startpos() {
        let tables = AttackTables::shared();
        let state = BoardState::startpos();
        assert_eq!(perft(tables, &state, 0), 1);
        assert_eq!(perft(tables, &state, 1), 20);
        assert_eq!(perft(tables, &state, 2), 400);
        assert_eq!(perft(tables, &state, 3), 8902);
    }

    #[test]
    #[ignore]
    fn startpos_depth_4() {
        assert_eq!(count(tessera_core::Fen::STARTPOS, 4), 197_281);
    }

    #[test]
    fn kiwipete() {
        assert_eq!(count(KIWIPETE, 1), 48);
        assert_eq!(count(KIWIPETE, 2), 2039);
    }

    #[test]
    #[ignore]
    fn kiwipete_depth_3() {
        assert_eq!(count(KIWIPETE, 3), 97_862);
    }

    #[test]
    fn position_3() {
        assert_eq!(count(POSITION_3, 1), 14);
        assert_eq!(count(POSITION_3, 2), 191);
        assert_eq!(count(POSITION_3, 3), 2812);
    }

    #[test]
    fn divide_sums_to_perft() {
        let tables = AttackTables::shared();
        let state = BoardState::startpos();
        let divide = perft_divide(tables, &state, 2);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert_eq!(divide[0].0.to_uci(), "a2a3");
    }
}
