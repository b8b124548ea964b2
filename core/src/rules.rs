// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move validation and application for both rule sets
//!
//! The engine never mutates the caller's board: every successful move clones
//! the input, resolves captures on the clone and returns it.

use crate::groups::group_at;
use crate::{board::Board, Color, Coord, GameError, RuleSet};

/// Result of a successfully applied move.
#[derive(Debug, Clone)]
pub struct Placement {
    /// The board after the move, captures resolved
    pub board: Board,
    /// Number of opposing stones removed by the move
    pub captured: u16,
}

/// Validate and apply a move.
///
/// For Go this resolves captures before checking self-liberties (a move that
/// captures is never suicide), then rejects suicide and simple ko. The ko
/// check compares the resulting position's fingerprint against
/// `prev_fingerprint` only, so it rejects immediate single-move repetition
/// and nothing longer.
///
/// Gomoku places on any empty point; there is no capture, suicide or ko.
pub fn apply_move(
    board: &Board,
    coord: Coord,
    color: Color,
    rule_set: RuleSet,
    prev_fingerprint: Option<&str>,
) -> Result<Placement, GameError> {
    if !coord.is_valid(board.size()) {
        return Err(GameError::OutOfBounds);
    }
    if board.get(coord).is_some() {
        return Err(GameError::Occupied);
    }

    let mut next = board.clone();
    next.place(coord, color);

    if rule_set == RuleSet::Gomoku {
        return Ok(Placement {
            board: next,
            captured: 0,
        });
    }

    // Capture resolution first: adjacent opposing groups with no liberties
    // come off before the new stone's own liberties are judged.
    let opponent = color.opposite();
    let mut captured: u16 = 0;
    for neighbor in board.neighbors(coord) {
        if next.get(neighbor) != Some(opponent) {
            continue;
        }
        if let Some(group) = group_at(&next, neighbor) {
            if group.liberty_count() == 0 {
                captured += group.len() as u16;
                for stone in group.stones {
                    next.remove(stone);
                }
            }
        }
    }

    if captured == 0 {
        if let Some(own) = group_at(&next, coord) {
            if own.liberty_count() == 0 {
                tracing::debug!(?coord, "rejecting suicide move");
                return Err(GameError::Suicide);
            }
        }
    }

    if let Some(prev) = prev_fingerprint {
        if next.fingerprint() == prev {
            tracing::debug!(?coord, "rejecting ko repetition");
            return Err(GameError::KoRepetition);
        }
    }

    Ok(Placement {
        board: next,
        captured,
    })
}

/// Gomoku win detection: from the stone at `last_move`, count consecutive
/// same-color stones along the four axes (both directions, inclusive); any
/// run of five or more wins.
pub fn check_win(board: &Board, last_move: Coord) -> bool {
    let color = match board.get(last_move) {
        Some(color) => color,
        None => return false,
    };

    const AXES: [(i16, i16); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    for (dx, dy) in AXES {
        let mut run = 1;
        for dir in [1i16, -1] {
            let mut x = last_move.x as i16 + dx * dir;
            let mut y = last_move.y as i16 + dy * dir;
            while x >= 0
                && y >= 0
                && x < board.size() as i16
                && y < board.size() as i16
                && board.get(Coord::new(x as u8, y as u8)) == Some(color)
            {
                run += 1;
                x += dx * dir;
                y += dy * dir;
            }
        }
        if run >= 5 {
            return true;
        }
    }
    false
}
