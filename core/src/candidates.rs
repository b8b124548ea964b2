// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate move generation
//!
//! Both AIs search only the contested region: empty points within a small
//! Chebyshev radius of existing stones. This bounds the branching factor on
//! large boards where searching every empty intersection is intractable.

use crate::{board::Board, Coord};

/// Default Chebyshev radius around existing stones.
pub const DEFAULT_RANGE: u8 = 2;

/// Canonical opening points for an empty board: the center, plus the four
/// 4-4 corner points on boards of size 9 and up.
pub fn opening_points(size: u8) -> Vec<Coord> {
    let mid = size / 2;
    let mut points = vec![Coord::new(mid, mid)];
    if size >= 9 {
        let near = 3;
        let far = size - 4;
        points.push(Coord::new(near, near));
        points.push(Coord::new(far, near));
        points.push(Coord::new(near, far));
        points.push(Coord::new(far, far));
    }
    points
}

/// Empty points within `range` (Chebyshev) of any stone, de-duplicated, in
/// row-major order.
///
/// An empty board yields the canonical opening points. If proximity marking
/// somehow produces nothing on a non-empty board, every empty point is
/// returned so the caller always has a legal candidate when one exists.
pub fn candidate_moves(board: &Board, range: u8) -> Vec<Coord> {
    if board.stone_count() == 0 {
        return opening_points(board.size());
    }

    let size = board.size() as usize;
    let mut marked = vec![false; size * size];
    let range = range as i16;

    for (stone, _) in board.stones() {
        for dy in -range..=range {
            for dx in -range..=range {
                let x = stone.x as i16 + dx;
                let y = stone.y as i16 + dy;
                if x < 0 || y < 0 || x >= size as i16 || y >= size as i16 {
                    continue;
                }
                let coord = Coord::new(x as u8, y as u8);
                if board.get(coord).is_none() {
                    marked[y as usize * size + x as usize] = true;
                }
            }
        }
    }

    let mut candidates: Vec<Coord> = marked
        .iter()
        .enumerate()
        .filter(|(_, m)| **m)
        .map(|(i, _)| Coord::new((i % size) as u8, (i / size) as u8))
        .collect();

    if candidates.is_empty() {
        candidates = board.empty_points();
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn empty_board_offers_opening_points() {
        let board = Board::new(19);
        let points = candidate_moves(&board, DEFAULT_RANGE);
        assert_eq!(points.len(), 5);
        assert!(points.contains(&Coord::new(9, 9)));
        assert!(points.contains(&Coord::new(3, 3)));
        assert!(points.contains(&Coord::new(15, 15)));
    }

    #[test]
    fn small_empty_board_offers_center_only() {
        let board = Board::new(5);
        assert_eq!(candidate_moves(&board, DEFAULT_RANGE), vec![Coord::new(2, 2)]);
    }

    #[test]
    fn candidates_hug_existing_stones() {
        let mut board = Board::new(19);
        board.place(Coord::new(9, 9), Color::Black);
        let points = candidate_moves(&board, 2);
        // 5x5 block around the stone minus the stone itself
        assert_eq!(points.len(), 24);
        assert!(points.contains(&Coord::new(7, 7)));
        assert!(!points.contains(&Coord::new(9, 9)));
        assert!(!points.contains(&Coord::new(12, 9)));
    }

    #[test]
    fn candidates_are_deduplicated() {
        let mut board = Board::new(9);
        board.place(Coord::new(4, 4), Color::Black);
        board.place(Coord::new(5, 4), Color::White);
        let points = candidate_moves(&board, 2);
        let mut unique = points.clone();
        unique.sort_by_key(|c| (c.y, c.x));
        unique.dedup();
        assert_eq!(points.len(), unique.len());
    }
}
