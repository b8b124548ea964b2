// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game-state application layer
//!
//! Owns the board, turn order, capture counts and undo history, and funnels
//! every move (local, AI or remote) through the move engine so nothing is
//! ever applied unvalidated. The core stays synchronous: each call receives
//! its complete input and returns a new state, with no shared mutable state
//! between invocations.

use crate::rules::{apply_move, check_win};
use crate::scoring::{calculate_score, Score};
use crate::sgf::GameRecord;
use crate::{board::Board, evaluate, Color, Coord, GameError, Move, RuleSet, KOMI};
use serde::{Deserialize, Serialize};

/// Snapshot taken before each move, consumed by undo and review.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Board before the move that produced this entry
    pub board_before: Board,
    /// Player who was to move
    pub next_player: Color,
    /// (captured by Black, captured by White) at that point
    pub captures: (u16, u16),
    /// Last move coordinates at that point
    pub last_move: Option<Coord>,
    /// Consecutive passes at that point
    pub pass_count: u8,
    /// Ko reference position at that point
    prev_fingerprint: Option<String>,
}

/// Inbound events from the peer move channel.
///
/// The transport itself is an external collaborator; the application layer
/// only consumes its decoded events, and every `Move` is revalidated through
/// the engine rather than trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChannelEvent {
    /// The remote player placed a stone
    Move { x: u8, y: u8 },
    /// The remote player passed
    Pass,
    /// Game configuration from the remote side; starts a fresh game
    Sync {
        size: u8,
        rule_set: RuleSet,
        /// Color assigned to the local player
        local_color: Color,
    },
    /// Restart with the current configuration
    Restart,
}

/// A running game: board, turn, captures, pass tracking and history.
#[derive(Debug, Clone)]
pub struct GameState {
    pub rule_set: RuleSet,
    pub board: Board,
    pub current_player: Color,
    /// (captured by Black, captured by White)
    pub captures: (u16, u16),
    pub pass_count: u8,
    pub last_move: Option<Coord>,
    /// Color assigned to the local player in a remote game
    pub local_color: Color,
    /// Winner by five-in-a-row (Gomoku) or by resignation
    pub winner: Option<Color>,
    history: Vec<HistoryEntry>,
    /// Position before the previous move; ko reference for the next move
    prev_fingerprint: Option<String>,
}

impl GameState {
    /// Start a new empty game.
    pub fn new(size: u8, rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            board: Board::new(size),
            current_player: Color::Black,
            captures: (0, 0),
            pass_count: 0,
            last_move: None,
            local_color: Color::Black,
            winner: None,
            history: Vec::new(),
            prev_fingerprint: None,
        }
    }

    /// Place a stone for the current player.
    pub fn play(&mut self, coord: Coord) -> Result<(), GameError> {
        let entry = self.snapshot_entry();
        let fp_before = self.board.fingerprint();

        let placement = apply_move(
            &self.board,
            coord,
            self.current_player,
            self.rule_set,
            self.prev_fingerprint.as_deref(),
        )?;

        match self.current_player {
            Color::Black => self.captures.0 += placement.captured,
            Color::White => self.captures.1 += placement.captured,
        }
        self.board = placement.board;
        self.last_move = Some(coord);
        self.pass_count = 0;
        self.history.push(entry);
        self.prev_fingerprint = Some(fp_before);

        if self.rule_set == RuleSet::Gomoku && check_win(&self.board, coord) {
            self.winner = Some(self.current_player);
        }
        self.current_player = self.current_player.opposite();
        Ok(())
    }

    /// Pass the turn.
    pub fn pass(&mut self) {
        let entry = self.snapshot_entry();
        let fp_before = self.board.fingerprint();
        self.history.push(entry);
        self.prev_fingerprint = Some(fp_before);
        self.pass_count += 1;
        self.last_move = None;
        self.current_player = self.current_player.opposite();
    }

    /// Resign the game for the current player.
    pub fn resign(&mut self) {
        self.winner = Some(self.current_player.opposite());
    }

    /// Undo the most recent move or pass. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let entry = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        self.board = entry.board_before;
        self.current_player = entry.next_player;
        self.captures = entry.captures;
        self.last_move = entry.last_move;
        self.pass_count = entry.pass_count;
        self.prev_fingerprint = entry.prev_fingerprint;
        self.winner = None;
        true
    }

    /// Game over: two consecutive passes (Go), a five-in-a-row win (Gomoku)
    /// or a resignation.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || (self.rule_set == RuleSet::Go && self.pass_count >= 2)
    }

    /// Moves played so far (including passes)
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Area score of the current board (Go).
    pub fn score(&self) -> Score {
        calculate_score(&self.board, KOMI)
    }

    /// Live Black win-rate estimate in [0, 100].
    pub fn win_rate(&self) -> f32 {
        evaluate::win_rate(&self.board)
    }

    /// Ko reference position for the next move: the fingerprint of the board
    /// before the previous move, in the form [`apply_move`] expects. AI
    /// callers must thread this through or they will propose ko retakes the
    /// state layer then rejects.
    pub fn ko_fingerprint(&self) -> Option<&str> {
        self.prev_fingerprint.as_deref()
    }

    /// Apply an inbound peer event.
    ///
    /// Remote moves go through the same validation as local ones; an illegal
    /// remote move is rejected and the state left unchanged.
    pub fn apply_remote(&mut self, event: ChannelEvent) -> Result<(), GameError> {
        match event {
            ChannelEvent::Move { x, y } => self.play(Coord::new(x, y)),
            ChannelEvent::Pass => {
                self.pass();
                Ok(())
            }
            ChannelEvent::Sync {
                size,
                rule_set,
                local_color,
            } => {
                *self = GameState::new(size, rule_set);
                self.local_color = local_color;
                Ok(())
            }
            ChannelEvent::Restart => {
                let local_color = self.local_color;
                *self = GameState::new(self.board.size(), self.rule_set);
                self.local_color = local_color;
                Ok(())
            }
        }
    }

    /// Export the move history as a replayable game record.
    ///
    /// History entries store the player who was about to move, so the mover
    /// of each entry is recovered directly from `next_player`.
    pub fn to_record(&self) -> GameRecord {
        let mut record = GameRecord::new(self.board.size(), self.rule_set);
        for (i, entry) in self.history.iter().enumerate() {
            let mover = entry.next_player;
            // A pass left no stone behind; a placement is the coordinate the
            // following entry (or the live state) remembers as last_move.
            let mv = match self
                .history
                .get(i + 1)
                .map(|next| next.last_move)
                .unwrap_or(self.last_move)
            {
                Some(coord) => Move::Place(coord),
                None => Move::Pass,
            };
            record.moves.push((mover, mv));
        }
        record
    }

    fn snapshot_entry(&self) -> HistoryEntry {
        HistoryEntry {
            board_before: self.board.clone(),
            next_player: self.current_player,
            captures: self.captures,
            last_move: self.last_move,
            pass_count: self.pass_count,
            prev_fingerprint: self.prev_fingerprint.clone(),
        }
    }
}
