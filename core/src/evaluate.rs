// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static position evaluation and live win-rate estimation
//!
//! A single O(stones) pass over the board: area score as the base, then
//! group-safety and center-influence adjustments, mapped through a logistic
//! whose steepness grows with board fill so early-game differentials barely
//! move the estimate. Cheap enough to call on every render frame.

use crate::groups::all_groups;
use crate::scoring::calculate_score;
use crate::{board::Board, Color, KOMI};

/// Heuristic point totals for both colors (area score plus adjustments).
pub fn heuristic_scores(board: &Board) -> (f32, f32) {
    let base = calculate_score(board, KOMI);
    let mut black = base.black;
    let mut white = base.white;

    for group in all_groups(board) {
        let adjust = match group.liberty_count() {
            1 => -1.5 * group.len() as f32,
            2 => -0.5 * group.len() as f32,
            n if n >= 5 => 2.0,
            _ => 0.0,
        };
        match group.color {
            Color::Black => black += adjust,
            Color::White => white += adjust,
        }
    }

    // Center influence: stones near the middle project more strength.
    let size = board.size() as f32;
    let center = (size - 1.0) / 2.0;
    for (coord, color) in board.stones() {
        let dist = ((coord.x as f32 - center).abs() + (coord.y as f32 - center).abs()) / size;
        if dist < 0.6 {
            match color {
                Color::Black => black += 0.2,
                Color::White => white += 0.2,
            }
        }
    }

    (black, white)
}

/// Estimated Black win probability in [0, 100].
///
/// Logistic over the heuristic score differential. The steepness scales
/// quadratically with fill ratio from 0.08 (empty) to 0.35 (full), so a
/// 10-point lead means little at move 10 and nearly everything at move 300.
pub fn win_rate(board: &Board) -> f32 {
    let (black, white) = heuristic_scores(board);
    let diff = black - white;
    let fill = board.fill_ratio();
    let k = 0.08 + 0.27 * fill * fill;
    100.0 / (1.0 + (-k * diff).exp())
}
