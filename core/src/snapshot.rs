// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compact game-state snapshot codec
//!
//! A snapshot carries board cell colors, size, player to move, rule set and
//! capture counts through a reversible text encoding (base64 over JSON) for
//! out-of-band transfer. It round-trips board state losslessly but does NOT
//! carry move history.

use crate::{board::Board, Color, RuleSet};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

/// Transferable game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board rows, one string per row, cells '.', 'B' or 'W'
    pub board: Vec<String>,
    /// Board side length
    pub size: u8,
    /// Player to move
    pub turn: Color,
    /// Rule set in force
    pub rule_set: RuleSet,
    /// Stones captured by Black
    pub black_captures: u16,
    /// Stones captured by White
    pub white_captures: u16,
}

impl Snapshot {
    /// Capture a snapshot of the given position.
    pub fn from_state(
        board: &Board,
        turn: Color,
        rule_set: RuleSet,
        black_captures: u16,
        white_captures: u16,
    ) -> Self {
        let size = board.size();
        let fp = board.fingerprint();
        let rows = fp
            .as_bytes()
            .chunks(size as usize)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect();
        Self {
            board: rows,
            size,
            turn,
            rule_set,
            black_captures,
            white_captures,
        }
    }

    /// Rebuild the board grid. Fails if the cell grid is inconsistent.
    pub fn to_board(&self) -> Option<Board> {
        if self.board.len() != self.size as usize {
            return None;
        }
        let mut cells = Vec::with_capacity(self.size as usize * self.size as usize);
        for row in &self.board {
            if row.chars().count() != self.size as usize {
                return None;
            }
            for ch in row.chars() {
                cells.push(match ch {
                    '.' => None,
                    'B' => Some(Color::Black),
                    'W' => Some(Color::White),
                    _ => return None,
                });
            }
        }
        Board::from_cells(self.size, cells)
    }
}

/// Encode a snapshot to its transfer text.
pub fn encode(snapshot: &Snapshot) -> String {
    match serde_json::to_vec(snapshot) {
        Ok(bytes) => BASE64.encode(bytes),
        Err(err) => {
            tracing::error!("failed to serialize snapshot: {}", err);
            String::new()
        }
    }
}

/// Decode transfer text back into a snapshot.
///
/// Malformed base64, malformed JSON or an inconsistent cell grid all yield
/// `None`; this function never panics into the caller.
pub fn decode(text: &str) -> Option<Snapshot> {
    let bytes = match BASE64.decode(text.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("snapshot is not valid base64: {}", err);
            return None;
        }
    };
    let snapshot: Snapshot = match serde_json::from_slice(&bytes) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::error!("snapshot payload is not valid JSON: {}", err);
            return None;
        }
    };
    // Reject structurally inconsistent grids outright rather than handing
    // back a snapshot that cannot produce a board.
    snapshot.to_board()?;
    Some(snapshot)
}
