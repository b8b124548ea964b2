// SPDX-License-Identifier: MIT OR Apache-2.0

//! Area scoring for Go (Chinese counting)

use crate::{board::Board, Color, Coord};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Final point totals; White's total includes komi.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    /// Point margin from Black's perspective
    pub fn margin(&self) -> f32 {
        self.black - self.white
    }
}

/// Score a terminal board with area counting.
///
/// Every stone contributes one point to its color. Every maximal empty
/// region is flood-filled; a region bordered by exactly one color counts
/// wholly for that color, and regions touching both colors or no stones are
/// neutral. Komi is added to White.
pub fn calculate_score(board: &Board, komi: f32) -> Score {
    let size = board.size();
    let mut black = board.stone_count_for(Color::Black) as f32;
    let mut white = board.stone_count_for(Color::White) as f32;

    let mut seen = HashSet::<Coord>::new();
    for y in 0..size {
        for x in 0..size {
            let start = Coord::new(x, y);
            if board.get(start).is_some() || seen.contains(&start) {
                continue;
            }
            let (region, borders) = empty_region(board, start, &mut seen);
            if borders.len() == 1 {
                match borders.iter().next().copied() {
                    Some(Color::Black) => black += region as f32,
                    Some(Color::White) => white += region as f32,
                    None => {}
                }
            }
        }
    }

    Score {
        black,
        white: white + komi,
    }
}

/// BFS over one empty region; returns (region size, bordering stone colors)
fn empty_region(board: &Board, start: Coord, seen: &mut HashSet<Coord>) -> (usize, HashSet<Color>) {
    let mut queue = VecDeque::from([start]);
    let mut region = 1usize;
    let mut borders = HashSet::new();
    seen.insert(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in board.neighbors(current) {
            match board.get(neighbor) {
                Some(color) => {
                    borders.insert(color);
                }
                None => {
                    if seen.insert(neighbor) {
                        region += 1;
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }
    (region, borders)
}
