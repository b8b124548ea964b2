// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and structural queries

use crate::{Color, Coord};

/// A square grid of intersections, each empty or holding a colored stone.
///
/// The board carries no game logic; mutation happens either through the move
/// engine (which clones first and returns a new board) or inside AI scratch
/// copies that are never exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Side length (typically 9, 13 or 19)
    size: u8,
    /// Row-major cells
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Self {
        let cells = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![None; cells],
        }
    }

    /// Rebuild a board from a row-major cell vector.
    ///
    /// Returns `None` if the vector length does not match `size * size`.
    pub fn from_cells(size: u8, cells: Vec<Option<Color>>) -> Option<Self> {
        if cells.len() != (size as usize) * (size as usize) {
            return None;
        }
        Some(Self { size, cells })
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get the stone at the specified coordinate
    pub fn get(&self, coord: Coord) -> Option<Color> {
        if !coord.is_valid(self.size) {
            return None;
        }
        self.cells[self.index(coord)]
    }

    /// Place a stone at the specified coordinate.
    ///
    /// Returns false when the coordinate is invalid or occupied.
    pub fn place(&mut self, coord: Coord, color: Color) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }
        let idx = self.index(coord);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(color);
        true
    }

    /// Remove a stone at the specified coordinate.
    ///
    /// Returns false when the coordinate is invalid or already empty.
    pub fn remove(&mut self, coord: Coord) -> bool {
        if !coord.is_valid(self.size) {
            return false;
        }
        let idx = self.index(coord);
        if self.cells[idx].is_none() {
            return false;
        }
        self.cells[idx] = None;
        true
    }

    /// Orthogonal neighbors of a coordinate on this board.
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        coord.neighbors(self.size)
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of stones of the given color
    pub fn stone_count_for(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Fraction of intersections occupied, in [0, 1]
    pub fn fill_ratio(&self) -> f32 {
        self.stone_count() as f32 / self.cells.len() as f32
    }

    /// All empty intersections in row-major order
    pub fn empty_points(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let c = Coord::new(x, y);
                if self.get(c).is_none() {
                    out.push(c);
                }
            }
        }
        out
    }

    /// Iterate every occupied intersection with its color.
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| {
                let x = (i % size as usize) as u8;
                let y = (i / size as usize) as u8;
                (Coord::new(x, y), color)
            })
        })
    }

    /// Canonical per-cell encoding of the position, one character per cell
    /// ('.', 'B', 'W') in row-major order.
    ///
    /// Stable across runs and independent of anything but cell colors, so it
    /// serves as the equality key for simple-ko detection and for snapshot
    /// cell grids.
    pub fn fingerprint(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                None => '.',
                Some(Color::Black) => 'B',
                Some(Color::White) => 'W',
            })
            .collect()
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.size as usize) + (coord.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_get_remove() {
        let mut board = Board::new(9);
        assert!(board.place(Coord::new(3, 4), Color::Black));
        assert_eq!(board.get(Coord::new(3, 4)), Some(Color::Black));
        assert!(!board.place(Coord::new(3, 4), Color::White));
        assert!(board.remove(Coord::new(3, 4)));
        assert_eq!(board.get(Coord::new(3, 4)), None);
        assert!(!board.remove(Coord::new(3, 4)));
    }

    #[test]
    fn fingerprint_is_canonical() {
        let mut a = Board::new(4);
        let mut b = Board::new(4);
        // Same position reached in different orders
        a.place(Coord::new(0, 0), Color::Black);
        a.place(Coord::new(1, 1), Color::White);
        b.place(Coord::new(1, 1), Color::White);
        b.place(Coord::new(0, 0), Color::Black);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
        assert!(a.fingerprint().starts_with('B'));
    }

    #[test]
    fn fill_ratio_and_counts() {
        let mut board = Board::new(4);
        assert_eq!(board.fill_ratio(), 0.0);
        board.place(Coord::new(0, 0), Color::Black);
        board.place(Coord::new(1, 0), Color::White);
        assert_eq!(board.stone_count(), 2);
        assert_eq!(board.stone_count_for(Color::Black), 1);
        assert!((board.fill_ratio() - 2.0 / 16.0).abs() < 1e-6);
        assert_eq!(board.empty_points().len(), 14);
    }

    #[test]
    fn from_cells_validates_length() {
        assert!(Board::from_cells(3, vec![None; 9]).is_some());
        assert!(Board::from_cells(3, vec![None; 8]).is_none());
    }
}
