// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connected-group and liberty analysis
//!
//! Groups are derived on demand from the board, never cached across moves;
//! boards are small enough (at most 19x19) that the O(stones) traversal is
//! cheap to repeat.

use crate::{board::Board, Color, Coord};
use std::collections::HashSet;

/// A maximal 4-connected set of same-colored stones with its liberties.
#[derive(Debug, Clone)]
pub struct Group {
    /// Color of every stone in the group
    pub color: Color,
    /// Member stones
    pub stones: Vec<Coord>,
    /// Distinct empty intersections adjacent to the group
    pub liberties: HashSet<Coord>,
}

impl Group {
    /// Number of distinct liberties
    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    /// Number of stones in the group
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// True if the group holds no stones (never produced by `group_at`)
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// Find the group containing the stone at `start`.
///
/// Returns `None` when `start` is empty or out of bounds. Liberties are
/// collected into a set, so traversal order cannot affect the result.
pub fn group_at(board: &Board, start: Coord) -> Option<Group> {
    let color = board.get(start)?;

    let mut stones = Vec::new();
    let mut liberties = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue = vec![start];

    while let Some(current) = queue.pop() {
        if !visited.insert(current) {
            continue;
        }
        stones.push(current);

        for neighbor in board.neighbors(current) {
            match board.get(neighbor) {
                None => {
                    liberties.insert(neighbor);
                }
                Some(c) if c == color && !visited.contains(&neighbor) => {
                    queue.push(neighbor);
                }
                Some(_) => {}
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// Partition every stone on the board into its connected group.
///
/// The order of the returned groups is unspecified.
pub fn all_groups(board: &Board) -> Vec<Group> {
    let mut seen: HashSet<Coord> = HashSet::new();
    let mut groups = Vec::new();

    for (coord, _) in board.stones() {
        if seen.contains(&coord) {
            continue;
        }
        if let Some(group) = group_at(board, coord) {
            for stone in &group.stones {
                seen.insert(*stone);
            }
            groups.push(group);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point_has_no_group() {
        let board = Board::new(9);
        assert!(group_at(&board, Coord::new(4, 4)).is_none());
    }

    #[test]
    fn single_stone_center_liberties() {
        let mut board = Board::new(9);
        board.place(Coord::new(4, 4), Color::Black);
        let group = group_at(&board, Coord::new(4, 4)).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.liberty_count(), 4);
    }

    #[test]
    fn corner_stone_has_two_liberties() {
        let mut board = Board::new(9);
        board.place(Coord::new(0, 0), Color::White);
        let group = group_at(&board, Coord::new(0, 0)).unwrap();
        assert_eq!(group.liberty_count(), 2);
    }

    #[test]
    fn connected_stones_share_liberties() {
        let mut board = Board::new(9);
        // Two adjacent black stones: 6 distinct liberties, counted once each
        board.place(Coord::new(4, 4), Color::Black);
        board.place(Coord::new(5, 4), Color::Black);
        let group = group_at(&board, Coord::new(4, 4)).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.liberty_count(), 6);
    }

    #[test]
    fn groups_stop_at_opposing_stones() {
        let mut board = Board::new(9);
        board.place(Coord::new(4, 4), Color::Black);
        board.place(Coord::new(5, 4), Color::White);
        let group = group_at(&board, Coord::new(4, 4)).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.liberty_count(), 3);
    }

    #[test]
    fn all_groups_partitions_board() {
        let mut board = Board::new(9);
        board.place(Coord::new(0, 0), Color::Black);
        board.place(Coord::new(1, 0), Color::Black);
        board.place(Coord::new(5, 5), Color::White);
        board.place(Coord::new(8, 8), Color::Black);

        let groups = all_groups(&board);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(Group::len).sum();
        assert_eq!(total, 4);
    }
}
