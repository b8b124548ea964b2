// SPDX-License-Identifier: MIT OR Apache-2.0

use tengen_core::board::Board;
use tengen_core::engine::GameState;
use tengen_core::sgf::{from_sgf, to_sgf, GameRecord};
use tengen_core::snapshot::{decode, encode, Snapshot};
use tengen_core::{Color, Coord, Move, RuleSet};

#[test]
fn snapshot_round_trip_scenario() {
    // 9x9 board, 3 black and 2 white stones, capture counts carried along
    let mut board = Board::new(9);
    board.place(Coord::new(1, 1), Color::Black);
    board.place(Coord::new(4, 4), Color::Black);
    board.place(Coord::new(7, 2), Color::Black);
    board.place(Coord::new(3, 5), Color::White);
    board.place(Coord::new(6, 6), Color::White);

    let snapshot = Snapshot::from_state(&board, Color::White, RuleSet::Go, 2, 5);
    let text = encode(&snapshot);
    let decoded = decode(&text).expect("decode failed");

    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.turn, Color::White);
    assert_eq!(decoded.rule_set, RuleSet::Go);
    assert_eq!(decoded.black_captures, 2);
    assert_eq!(decoded.white_captures, 5);

    let rebuilt = decoded.to_board().expect("grid invalid");
    for (coord, color) in board.stones() {
        assert_eq!(rebuilt.get(coord), Some(color));
    }
    assert_eq!(rebuilt.stone_count(), 5);
}

#[test]
fn snapshot_decode_rejects_malformed_input() {
    assert!(decode("!!!").is_none());
    assert!(decode("aGVsbG8gd29ybGQ=").is_none()); // valid base64, not a snapshot
    assert!(decode("").is_none());
}

#[test]
fn gomoku_snapshot_round_trip() {
    let mut board = Board::new(15);
    board.place(Coord::new(7, 7), Color::Black);
    let snapshot = Snapshot::from_state(&board, Color::White, RuleSet::Gomoku, 0, 0);
    let decoded = decode(&encode(&snapshot)).unwrap();
    assert_eq!(decoded.rule_set, RuleSet::Gomoku);
    assert_eq!(decoded.size, 15);
}

#[test]
fn sgf_round_trip_reconstructs_terminal_board() {
    // Play a short game through the state layer, export, re-import, and
    // compare terminal boards and histories.
    let mut game = GameState::new(9, RuleSet::Go);
    for coord in [
        Coord::new(2, 2),
        Coord::new(6, 6),
        Coord::new(2, 6),
        Coord::new(6, 2),
        Coord::new(4, 4),
    ] {
        game.play(coord).unwrap();
    }
    game.pass();
    game.play(Coord::new(4, 2)).unwrap();

    let record = game.to_record();
    let imported = from_sgf(&to_sgf(&record)).expect("import failed");

    assert_eq!(imported.board.fingerprint(), game.board.fingerprint());
    assert_eq!(imported.record.moves.len(), record.moves.len());
    assert_eq!(imported.record.moves, record.moves);
    assert_eq!(imported.black_captures, game.captures.0);
    assert_eq!(imported.white_captures, game.captures.1);
}

#[test]
fn sgf_import_reconstructs_captures() {
    // Black captures one stone mid-game; the running totals must match
    let mut game = GameState::new(9, RuleSet::Go);
    // Surround white (1,1)
    game.play(Coord::new(1, 0)).unwrap(); // B
    game.play(Coord::new(1, 1)).unwrap(); // W
    game.play(Coord::new(0, 1)).unwrap(); // B
    game.play(Coord::new(7, 7)).unwrap(); // W elsewhere
    game.play(Coord::new(2, 1)).unwrap(); // B
    game.play(Coord::new(7, 6)).unwrap(); // W elsewhere
    game.play(Coord::new(1, 2)).unwrap(); // B captures
    assert_eq!(game.captures.0, 1);

    let imported = from_sgf(&to_sgf(&game.to_record())).expect("import failed");
    assert_eq!(imported.black_captures, 1);
    assert_eq!(imported.board.get(Coord::new(1, 1)), None);
}

#[test]
fn sgf_setup_stones_round_trip() {
    let mut record = GameRecord::new(19, RuleSet::Go);
    // Two-stone handicap on the 4-4 points
    record.setup.push((Color::Black, Coord::new(3, 3)));
    record.setup.push((Color::Black, Coord::new(15, 15)));
    record.moves.push((Color::White, Move::Place(Coord::new(15, 3))));
    record.moves.push((Color::Black, Move::Place(Coord::new(3, 15))));

    let sgf = to_sgf(&record);
    assert!(sgf.contains("AB[dd][pp]"));

    let imported = from_sgf(&sgf).expect("import failed");
    assert_eq!(imported.record.setup, record.setup);
    assert_eq!(imported.board.get(Coord::new(3, 3)), Some(Color::Black));
    assert_eq!(imported.board.get(Coord::new(15, 3)), Some(Color::White));
}

#[test]
fn sgf_import_fails_closed_on_illegal_moves() {
    // Second B node plays on an occupied point: whole import must fail
    let sgf = "(;FF[4]GM[1]SZ[9];B[ee];W[cc];B[ee])";
    assert!(from_sgf(sgf).is_none());
}

#[test]
fn sgf_import_handles_passes() {
    let sgf = "(;FF[4]GM[1]SZ[9];B[ee];W[];B[cc];W[])";
    let imported = from_sgf(sgf).expect("import failed");
    assert_eq!(imported.record.moves.len(), 4);
    assert_eq!(imported.record.moves[1], (Color::White, Move::Pass));
    assert_eq!(imported.pass_count, 1);
}

#[test]
fn sgf_import_respects_board_size() {
    let sgf = "(;FF[4]GM[1]SZ[13];B[mm])";
    let imported = from_sgf(sgf).expect("import failed");
    assert_eq!(imported.board.size(), 13);
    assert_eq!(imported.board.get(Coord::new(12, 12)), Some(Color::Black));

    // A coordinate off a 9x9 board is treated as a pass, not an error
    let small = "(;FF[4]GM[1]SZ[9];B[mm])";
    let imported = from_sgf(small).expect("import failed");
    assert_eq!(imported.record.moves[0], (Color::Black, Move::Pass));
}
