// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gomoku move search: pattern-scored alpha-beta minimax
//!
//! Move selection runs in three stages: play an immediate five if one
//! exists, block the opponent's immediate five, and otherwise run a
//! fixed-depth alpha-beta minimax over the strongest candidate moves with
//! per-ply beam ordering by the same pattern heuristic. The recursion works
//! on a private scratch board with place/undo; the caller's board is never
//! touched.

use crate::candidates::{candidate_moves, DEFAULT_RANGE};
use crate::rules::check_win;
use crate::{board::Board, Color, Coord, Difficulty};

/// Pattern scores for line evaluation, an order of magnitude apart so a
/// stronger shape always dominates any number of weaker ones.
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i32 = 1_000_000;
    /// Open four: _OOOO_ (unstoppable)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ (one way to extend); broken fours score the same
    pub const CLOSED_FOUR: i32 = 50_000;
    /// Open three: _OOO_ (becomes a four if unanswered)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_
    pub const CLOSED_THREE: i32 = 1_000;
    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 500;
    /// Closed two: XOO_
    pub const CLOSED_TWO: i32 = 50;

    /// Weight applied to blocking the opponent's best shape
    pub const DEFENSE_WEIGHT: f32 = 0.9;
}

/// How a run of stones ends in one direction.
#[derive(Debug, Clone, Copy)]
enum End {
    /// Edge of board or opposing stone
    Blocked,
    /// Empty point
    Open,
    /// Empty point followed by more same-color stones (broken shape)
    Gap(u8),
}

impl End {
    fn is_open(&self) -> bool {
        !matches!(self, End::Blocked)
    }
}

const AXES: [(i16, i16); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Pattern value of placing `color` at `coord`, summed over the four axes.
///
/// `coord` itself is treated as holding the stone whether or not it does,
/// so the same function scores hypothetical moves and existing stones.
pub fn line_score(board: &Board, coord: Coord, color: Color) -> i32 {
    AXES.iter()
        .map(|&(dx, dy)| axis_score(board, coord, color, dx, dy))
        .sum()
}

fn axis_score(board: &Board, coord: Coord, color: Color, dx: i16, dy: i16) -> i32 {
    let (fwd, fwd_end) = scan_run(board, coord, color, dx, dy);
    let (bwd, bwd_end) = scan_run(board, coord, color, -dx, -dy);
    let total = 1 + fwd + bwd;

    if total >= 5 {
        return PatternScore::FIVE;
    }

    let opens = fwd_end.is_open() as u8 + bwd_end.is_open() as u8;
    let mut value = match (total, opens) {
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::CLOSED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::CLOSED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::CLOSED_TWO,
        _ => 0,
    };

    // A run continuing after a one-point gap threatens a five through the
    // gap: score it like a closed four.
    for end in [fwd_end, bwd_end] {
        if let End::Gap(extra) = end {
            if total + extra as usize >= 4 {
                value = value.max(PatternScore::CLOSED_FOUR);
            }
        }
    }
    value
}

/// Count contiguous same-color stones from `coord` (exclusive) along one
/// direction, and classify how the run ends.
fn scan_run(board: &Board, coord: Coord, color: Color, dx: i16, dy: i16) -> (usize, End) {
    let size = board.size() as i16;
    let mut x = coord.x as i16 + dx;
    let mut y = coord.y as i16 + dy;
    let mut count = 0usize;

    while x >= 0 && y >= 0 && x < size && y < size {
        match board.get(Coord::new(x as u8, y as u8)) {
            Some(c) if c == color => count += 1,
            Some(_) => return (count, End::Blocked),
            None => {
                // Peek past the gap for a broken continuation
                let mut extra = 0u8;
                let mut gx = x + dx;
                let mut gy = y + dy;
                while gx >= 0
                    && gy >= 0
                    && gx < size
                    && gy < size
                    && board.get(Coord::new(gx as u8, gy as u8)) == Some(color)
                {
                    extra += 1;
                    gx += dx;
                    gy += dy;
                }
                return if extra > 0 {
                    (count, End::Gap(extra))
                } else {
                    (count, End::Open)
                };
            }
        }
        x += dx;
        y += dy;
    }
    (count, End::Blocked)
}

/// Attack-plus-weighted-defense heuristic with a deterministic center
/// tie-break, used for root scoring and per-ply move ordering.
fn move_heuristic(board: &Board, coord: Coord, color: Color) -> i32 {
    let attack = line_score(board, coord, color);
    let defense = line_score(board, coord, color.opposite());
    let combined = attack as f32 + PatternScore::DEFENSE_WEIGHT * defense as f32;

    let size = board.size() as i32;
    let center = (size - 1) / 2;
    let dist = (coord.x as i32 - center).abs() + (coord.y as i32 - center).abs();
    combined as i32 + (2 * size - dist)
}

fn search_params(difficulty: Difficulty) -> (usize, i8) {
    // (root candidates kept, search depth)
    match difficulty {
        Difficulty::Easy => (4, 2),
        Difficulty::Medium => (6, 3),
        Difficulty::Hard => (8, 4),
    }
}

/// Pick a move for `color`.
///
/// Pure with respect to the caller: the search mutates only an internal
/// scratch clone. On an empty or fully degenerate board the center point is
/// returned.
pub fn best_move(board: &Board, color: Color, difficulty: Difficulty) -> Coord {
    let center = {
        let mid = board.size() / 2;
        Coord::new(mid, mid)
    };

    let candidates = candidate_moves(board, DEFAULT_RANGE);
    if candidates.is_empty() {
        return center;
    }
    if board.stone_count() == 0 {
        return center;
    }

    // Stage 1: immediate win
    for &coord in &candidates {
        if line_score(board, coord, color) >= PatternScore::FIVE {
            return coord;
        }
    }

    // Stage 2: forced block of the opponent's five
    let opponent = color.opposite();
    for &coord in &candidates {
        if line_score(board, coord, opponent) >= PatternScore::FIVE {
            return coord;
        }
    }

    // Stage 3: minimax over the strongest candidates
    let (top_k, depth) = search_params(difficulty);
    let mut scored: Vec<(Coord, i32)> = candidates
        .iter()
        .map(|&c| (c, move_heuristic(board, c, color)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(top_k);

    let mut scratch = board.clone();
    let mut best = scored[0].0;
    let mut best_value = i32::MIN;
    let mut alpha = i32::MIN + 1;
    let beta = i32::MAX;

    for &(coord, _) in &scored {
        scratch.place(coord, color);
        let value = if check_win(&scratch, coord) {
            PatternScore::FIVE
        } else {
            minimax(&mut scratch, opponent, color, depth - 1, alpha, beta)
        };
        scratch.remove(coord);

        if value > best_value {
            best_value = value;
            best = coord;
        }
        alpha = alpha.max(value);
        if value >= PatternScore::FIVE {
            break;
        }
    }

    tracing::debug!(?best, best_value, ?difficulty, "gomoku search complete");
    best
}

/// Alpha-beta recursion over the scratch board; values are always from the
/// root mover's perspective.
fn minimax(
    scratch: &mut Board,
    to_move: Color,
    mover: Color,
    depth: i8,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if depth <= 0 {
        return leaf_value(scratch, to_move, mover);
    }

    let beam = if depth >= 3 { 12 } else { 8 };
    let mut moves: Vec<(Coord, i32)> = candidate_moves(scratch, DEFAULT_RANGE)
        .into_iter()
        .map(|c| (c, move_heuristic(scratch, c, to_move)))
        .collect();
    if moves.is_empty() {
        return leaf_value(scratch, to_move, mover);
    }
    moves.sort_by(|a, b| b.1.cmp(&a.1));
    moves.truncate(beam);

    let maximizing = to_move == mover;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for (coord, _) in moves {
        scratch.place(coord, to_move);
        let value = if check_win(scratch, coord) {
            // Completed five for whoever just moved
            if maximizing {
                PatternScore::FIVE
            } else {
                -PatternScore::FIVE
            }
        } else {
            minimax(scratch, to_move.opposite(), mover, depth - 1, alpha, beta)
        };
        scratch.remove(coord);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Threat differential at the horizon: the side to move's best pattern
/// against the opponent's, signed from the root mover's perspective.
fn leaf_value(scratch: &Board, to_move: Color, mover: Color) -> i32 {
    let candidates = candidate_moves(scratch, DEFAULT_RANGE);
    let mut own_best = 0;
    let mut opp_best = 0;
    for coord in candidates {
        own_best = own_best.max(line_score(scratch, coord, to_move));
        opp_best = opp_best.max(line_score(scratch, coord, to_move.opposite()));
    }
    let raw = own_best - (opp_best as f32 * PatternScore::DEFENSE_WEIGHT) as i32;
    if to_move == mover {
        raw
    } else {
        -raw
    }
}
