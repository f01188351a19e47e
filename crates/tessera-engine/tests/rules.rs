//! Rule scenarios played through the public API.

use tessera_core::{Color, Move, Piece, Square};
use tessera_engine::{
    apply, classify, legal, legal_moves_for, AttackTables, BoardState, GameStatus,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(state: &mut BoardState, moves: &[&str]) {
    for uci in moves {
        let mv = Move::from_uci(uci).unwrap();
        apply(state, mv.from(), mv.to()).unwrap();
    }
}

fn castles(fen: &str, king: Square, target: Square) -> bool {
    let state = BoardState::from_fen(fen).unwrap();
    legal(AttackTables::shared(), &state, king)
        .unwrap()
        .contains(target)
}

#[test]
fn startpos_offers_twenty_destinations() {
    let tables = AttackTables::shared();
    let state = BoardState::startpos();
    let total: u32 = state
        .color(Color::White)
        .into_iter()
        .map(|from| legal(tables, &state, from).unwrap().count())
        .sum();
    assert_eq!(total, 20);
}

#[test]
fn fools_mate() {
    let mut state = BoardState::startpos();
    play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(state.side_to_move(), Color::White);
    assert_eq!(
        classify(AttackTables::shared(), &state).unwrap(),
        GameStatus::Checkmate
    );
}

#[test]
fn lone_king_stalemate() {
    let state = BoardState::from_fen("k7/8/1Q6/8/8/8/8/7K b - -").unwrap();
    let tables = AttackTables::shared();
    assert!(legal(tables, &state, Square::A8).unwrap().is_empty());
    assert_eq!(classify(tables, &state).unwrap(), GameStatus::Stalemate);
}

#[test]
fn en_passant_capture() {
    let mut state = BoardState::startpos();
    play(&mut state, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(state.en_passant(), Some(sq("d6")));
    assert!(legal(AttackTables::shared(), &state, sq("e5"))
        .unwrap()
        .contains(sq("d6")));

    play(&mut state, &["e5d6"]);
    let white_pawns = state.pieces(Color::White, Piece::Pawn);
    let black_pawns = state.pieces(Color::Black, Piece::Pawn);
    assert!(!white_pawns.contains(sq("e5")));
    assert!(white_pawns.contains(sq("d6")));
    assert!(!black_pawns.contains(sq("d5")));
    assert_eq!(state.en_passant(), None);
    assert!(state.is_consistent());
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut state = BoardState::startpos();
    play(&mut state, &["e2e4", "d7d5", "e4e5", "f7f5", "a2a3", "a7a6"]);
    assert_eq!(state.en_passant(), None);
    assert!(!legal(AttackTables::shared(), &state, sq("e5"))
        .unwrap()
        .contains(sq("f6")));
}

const OPEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -";

#[test]
fn castling_available_when_clear() {
    assert!(castles(OPEN, Square::E1, Square::G1));
    assert!(castles(OPEN, Square::E1, Square::C1));
}

#[test]
fn castling_blocked_by_cleared_right() {
    assert!(!castles("r3k2r/8/8/8/8/8/8/R3K2R w Qkq -", Square::E1, Square::G1));
    assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Qkq -", Square::E1, Square::C1));

    // A rook that leaves and returns does not restore the right.
    let mut state = BoardState::from_fen(OPEN).unwrap();
    play(&mut state, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    let king = legal(AttackTables::shared(), &state, Square::E1).unwrap();
    assert!(!king.contains(Square::G1));
    assert!(king.contains(Square::C1));
}

#[test]
fn castling_blocked_by_piece_in_between() {
    assert!(!castles("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq -", Square::E1, Square::G1));
    assert!(!castles("r3k2r/8/8/8/8/8/8/R3K1NR w KQkq -", Square::E1, Square::G1));
    assert!(!castles("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq -", Square::E1, Square::C1));
    assert!(!castles("r3k2r/8/8/8/8/8/8/R1B1K2R w KQkq -", Square::E1, Square::C1));
    assert!(!castles("r3k2r/8/8/8/8/8/8/R2QK2R w KQkq -", Square::E1, Square::C1));
}

#[test]
fn castling_blocked_when_in_check() {
    let fen = "4k3/4r3/8/8/8/8/8/R3K2R w KQ -";
    assert!(!castles(fen, Square::E1, Square::G1));
    assert!(!castles(fen, Square::E1, Square::C1));
}

#[test]
fn castling_blocked_through_attacked_square() {
    let fen = "4kr2/8/8/8/8/8/8/R3K2R w KQ -";
    assert!(!castles(fen, Square::E1, Square::G1));
    assert!(castles(fen, Square::E1, Square::C1));

    let fen = "3rk3/8/8/8/8/8/8/R3K2R w KQ -";
    assert!(!castles(fen, Square::E1, Square::C1));
    assert!(castles(fen, Square::E1, Square::G1));
}

#[test]
fn castling_blocked_onto_attacked_square() {
    assert!(!castles("4k1r1/8/8/8/8/8/8/R3K2R w KQ -", Square::E1, Square::G1));
    assert!(!castles("2r1k3/8/8/8/8/8/8/R3K2R w KQ -", Square::E1, Square::C1));
}

#[test]
fn attacked_b_file_does_not_stop_queenside() {
    assert!(castles("1r2k3/8/8/8/8/8/8/R3K2R w KQ -", Square::E1, Square::C1));
}

#[test]
fn black_castling_mirrors_white() {
    assert!(castles(OPEN, Square::E8, Square::G8));
    assert!(castles(OPEN, Square::E8, Square::C8));
    assert!(!castles("r3k2r/8/8/8/8/8/8/R3K1R1 b kq -", Square::E8, Square::G8));
}

#[test]
fn legal_moves_include_castling() {
    let state = BoardState::from_fen(OPEN).unwrap();
    let moves = legal_moves_for(AttackTables::shared(), &state, Color::White);
    assert!(moves.contains(&Move::new(Square::E1, Square::G1)));
    assert!(moves.contains(&Move::new(Square::E1, Square::C1)));
    assert_eq!(moves.len(), 26);
}
