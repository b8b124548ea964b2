// SPDX-License-Identifier: MIT OR Apache-2.0

//! Go move selection: single-ply scored search with shallow reply lookahead
//!
//! Each legal candidate is scored in one ply (captures, ataris created,
//! own-group safety, shape, board position); Medium and Hard then subtract
//! the single best-scoring opponent reply. This is deliberately not a full
//! minimax: capture-aware Go search has a much fatter branching factor than
//! Gomoku's pattern search, so the lookahead stays one reply deep.

use crate::candidates::{candidate_moves, DEFAULT_RANGE};
use crate::evaluate::heuristic_scores;
use crate::groups::group_at;
use crate::rules::apply_move;
use crate::{board::Board, AiDecision, Color, Coord, Difficulty, RuleSet};
use rand::Rng;

const CAPTURE_BASE: f32 = 2000.0;
const CAPTURE_PER_STONE: f32 = 150.0;
const ATARI_BONUS: f32 = 800.0;
const SELF_ATARI_PENALTY: f32 = 800.0;
const SAFE_LIBERTIES_BONUS: f32 = 100.0;
const TIGER_MOUTH_BONUS: f32 = 15.0;
const CUTTING_POINT_BONUS: f32 = 10.0;
const REPLY_CAPTURE: f32 = 5000.0;
const REPLY_SELF_ATARI: f32 = 1200.0;

/// Choose a move for `color`, or pass, or resign.
///
/// `prev_fingerprint` is the position before the opponent's last move, used
/// for simple-ko legality exactly as in [`apply_move`].
pub fn choose_move(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    prev_fingerprint: Option<&str>,
) -> AiDecision {
    let fill = board.fill_ratio();

    if difficulty != Difficulty::Easy && fill > 0.3 && should_resign(board, color, fill) {
        tracing::debug!(?color, "resigning: heuristic deficit too large");
        return AiDecision::Resign;
    }

    let mut scored: Vec<(Coord, f32)> = Vec::new();
    let mut rng = rand::thread_rng();

    for coord in candidate_moves(board, DEFAULT_RANGE) {
        if is_own_eye(board, coord, color) {
            continue;
        }
        let placement = match apply_move(board, coord, color, RuleSet::Go, prev_fingerprint) {
            Ok(p) => p,
            Err(_) => continue,
        };

        let mut score = score_placement(board, &placement.board, coord, color, placement.captured);

        if difficulty != Difficulty::Easy {
            score -= best_opponent_reply(&placement.board, coord, color);
        }

        score += match difficulty {
            Difficulty::Easy => rng.gen_range(0.0..150.0),
            Difficulty::Medium => rng.gen_range(0.0..20.0),
            Difficulty::Hard => 0.0,
        };

        scored.push((coord, score));
    }

    if scored.is_empty() {
        return AiDecision::Pass;
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // Do not force a pointless move onto a nearly finished board.
    if scored[0].1 <= 0.0 && fill > 0.6 {
        return AiDecision::Pass;
    }

    let pick = if difficulty == Difficulty::Easy {
        // Intentional weakening: any of the top five
        let n = scored.len().min(5);
        scored[rng.gen_range(0..n)].0
    } else {
        scored[0].0
    };
    AiDecision::Play(pick)
}

fn should_resign(board: &Board, color: Color, fill: f32) -> bool {
    let (black, white) = heuristic_scores(board);
    let deficit = match color {
        Color::Black => white - black,
        Color::White => black - white,
    };
    deficit > 50.0 || (deficit > 35.0 && fill > 0.6)
}

/// Simple eye for `color`: every in-board orthogonal neighbor is own color
/// and at least three of the four diagonals are own color or off the board.
/// Filling such a point only ever hurts the owner.
fn is_own_eye(board: &Board, coord: Coord, color: Color) -> bool {
    if board.get(coord).is_some() {
        return false;
    }
    let orthogonals = board.neighbors(coord);
    if orthogonals.is_empty() || orthogonals.iter().any(|&n| board.get(n) != Some(color)) {
        return false;
    }

    let size = board.size() as i16;
    let mut friendly_diagonals = 0;
    for (dx, dy) in [(-1i16, -1i16), (1, -1), (-1, 1), (1, 1)] {
        let x = coord.x as i16 + dx;
        let y = coord.y as i16 + dy;
        if x < 0 || y < 0 || x >= size || y >= size {
            friendly_diagonals += 1;
        } else if board.get(Coord::new(x as u8, y as u8)) == Some(color) {
            friendly_diagonals += 1;
        }
    }
    friendly_diagonals >= 3
}

fn score_placement(before: &Board, after: &Board, coord: Coord, color: Color, captured: u16) -> f32 {
    let mut score = 0.0;

    if captured > 0 {
        score += CAPTURE_BASE + CAPTURE_PER_STONE * captured as f32;
    }

    // Ataris created against adjacent opponent groups
    let opponent = color.opposite();
    for neighbor in after.neighbors(coord) {
        if after.get(neighbor) != Some(opponent) {
            continue;
        }
        if let Some(group) = group_at(after, neighbor) {
            if group.liberty_count() == 1 {
                let had_before = group_at(before, neighbor)
                    .map(|g| g.liberty_count())
                    .unwrap_or(0);
                if had_before > 1 {
                    score += ATARI_BONUS;
                }
            }
        }
    }

    // Own group safety after the move
    if let Some(own) = group_at(after, coord) {
        match own.liberty_count() {
            1 => score -= SELF_ATARI_PENALTY,
            n if n >= 3 => score += SAFE_LIBERTIES_BONUS,
            _ => {}
        }
    }

    score += 2.0 * shape_bonus(before, coord, color);
    score += position_bonus(before.size(), coord);
    score
}

/// Local shape reading on the board before the move: diagonal connections
/// toward a tiger mouth, and cutting points between opponent stones.
fn shape_bonus(board: &Board, coord: Coord, color: Color) -> f32 {
    let size = board.size() as i16;
    let mut bonus = 0.0;

    let mut own_diagonals = 0;
    for (dx, dy) in [(-1i16, -1i16), (1, -1), (-1, 1), (1, 1)] {
        let x = coord.x as i16 + dx;
        let y = coord.y as i16 + dy;
        if x >= 0
            && y >= 0
            && x < size
            && y < size
            && board.get(Coord::new(x as u8, y as u8)) == Some(color)
        {
            own_diagonals += 1;
        }
    }
    if own_diagonals >= 2 {
        bonus += TIGER_MOUTH_BONUS;
    }

    let opponent = color.opposite();
    let adjacent_opponents = board
        .neighbors(coord)
        .iter()
        .filter(|&&n| board.get(n) == Some(opponent))
        .count();
    if adjacent_opponents >= 2 {
        bonus += CUTTING_POINT_BONUS;
    }

    bonus
}

/// Favor 3rd/4th-line points over the edge on boards of 13 and up.
fn position_bonus(size: u8, coord: Coord) -> f32 {
    if size < 13 {
        return 0.0;
    }
    let line = coord
        .x
        .min(coord.y)
        .min(size - 1 - coord.x)
        .min(size - 1 - coord.y);
    match line {
        0 => -40.0,
        1 => -20.0,
        2 | 3 => 40.0,
        _ => 10.0,
    }
}

/// Value of the opponent's single best reply to the move just played at
/// `coord`. One reply only, never recursed.
fn best_opponent_reply(after: &Board, coord: Coord, color: Color) -> f32 {
    let opponent = color.opposite();
    let mut best = 0.0f32;

    for reply in candidate_moves(after, DEFAULT_RANGE) {
        let placement = match apply_move(after, reply, opponent, RuleSet::Go, None) {
            Ok(p) => p,
            Err(_) => continue,
        };

        let mut value = 0.0;
        if placement.captured > 0 {
            value += REPLY_CAPTURE + CAPTURE_PER_STONE * placement.captured as f32;
        }
        // Does the reply put the group we just played into atari?
        if let Some(own) = group_at(&placement.board, coord) {
            if own.color == color && own.liberty_count() == 1 {
                value += REPLY_SELF_ATARI;
            }
        }
        best = best.max(value);
    }
    best
}
