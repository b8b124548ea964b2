// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tengen Core - Game Rules and AI
//!
//! This crate provides the core game functionality including:
//! - Board representation for Go and Gomoku
//! - Move validation (captures, suicide, simple ko) and win detection
//! - Territory scoring and a static win-rate evaluator
//! - Heuristic AIs for both rule sets
//! - Snapshot and SGF serialization of game state

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod candidates;
pub mod engine;
pub mod evaluate;
pub mod go_ai;
pub mod gomoku_ai;
pub mod groups;
pub mod rules;
pub mod scoring;
pub mod sgf;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default komi compensation added to White's score.
pub const KOMI: f32 = 7.5;

/// Player color (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Which legal-move regime governs the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSet {
    /// Capture, suicide prohibition, simple ko, area scoring.
    Go,
    /// Five-in-a-row; no captures, every empty point is legal.
    Gomoku,
}

/// AI strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Normalize a free-text difficulty label onto the three tiers.
    ///
    /// Accepts the plain tier names plus rank-style strings such as "18k",
    /// "5k" or "3d" coming from external configuration surfaces. Unknown
    /// labels fall back to Medium.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "easy" | "beginner" => return Difficulty::Easy,
            "medium" | "normal" => return Difficulty::Medium,
            "hard" | "expert" => return Difficulty::Hard,
            _ => {}
        }
        // Rank strings: 10 kyu and weaker map to Easy, single-digit kyu to
        // Medium, any dan rank to Hard.
        if let Some(num) = label.strip_suffix('k').and_then(|n| n.parse::<u32>().ok()) {
            return if num >= 10 {
                Difficulty::Easy
            } else {
                Difficulty::Medium
            };
        }
        if label
            .strip_suffix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .is_some()
        {
            return Difficulty::Hard;
        }
        Difficulty::Medium
    }
}

/// Board coordinate representing an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }

    /// Orthogonal neighbors clipped to a board of the given size.
    pub fn neighbors(&self, board_size: u8) -> Vec<Coord> {
        let mut out = Vec::with_capacity(4);
        if self.y > 0 {
            out.push(Coord::new(self.x, self.y - 1));
        }
        if self.y + 1 < board_size {
            out.push(Coord::new(self.x, self.y + 1));
        }
        if self.x > 0 {
            out.push(Coord::new(self.x - 1, self.y));
        }
        if self.x + 1 < board_size {
            out.push(Coord::new(self.x + 1, self.y));
        }
        out
    }
}

/// Represents a move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the specified coordinate
    Place(Coord),
    /// Pass the turn
    Pass,
    /// Resign the game
    Resign,
}

/// Outcome of an AI move request.
///
/// Resignation is a first-class decision, distinct from passing and from a
/// coordinate move; callers must branch on it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiDecision {
    /// Play a stone at the coordinate
    Play(Coord),
    /// Decline to move
    Pass,
    /// Concede the game
    Resign,
}

/// Errors that can occur when applying a move
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("coordinate is outside the board")]
    OutOfBounds,

    /// The intersection is already occupied
    #[error("intersection already occupied")]
    Occupied,

    /// The move would leave the mover's own group without liberties
    #[error("move would be suicide")]
    Suicide,

    /// The move would recreate the previous board position (simple ko)
    #[error("move violates the ko rule")]
    KoRepetition,
}
