// SPDX-License-Identifier: MIT OR Apache-2.0

//! SGF (Smart Game Format) game-record export and import
//!
//! Export writes the standard header (FF/GM/SZ/KM/DT/PB/PW), setup stones
//! as AB/AW lists and one node per move, with empty brackets for passes.
//! Import parses the document, reads the header and setup, then replays
//! every move node through the move engine so captures and legality are
//! reconstructed rather than trusted. Unknown properties are ignored; a
//! structurally invalid document or an illegal replayed move yields `None`
//! so a partially-correct board can never escape.

use crate::rules::apply_move;
use crate::{board::Board, Color, Coord, GameError, Move, RuleSet, KOMI};
use anyhow::{anyhow, Result};
use std::iter::Peekable;
use std::str::Chars;

/// A full, replayable game record.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub size: u8,
    pub komi: f32,
    pub rule_set: RuleSet,
    pub black_player: String,
    pub white_player: String,
    /// Date in YYYY-MM-DD form (SGF DT property)
    pub date: String,
    /// Initial handicap / setup stones
    pub setup: Vec<(Color, Coord)>,
    /// Moves in play order, with the color that made each
    pub moves: Vec<(Color, Move)>,
}

impl GameRecord {
    /// A fresh record with product defaults and today's date.
    pub fn new(size: u8, rule_set: RuleSet) -> Self {
        Self {
            size,
            komi: KOMI,
            rule_set,
            black_player: "Black".to_string(),
            white_player: "White".to_string(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            setup: Vec::new(),
            moves: Vec::new(),
        }
    }
}

/// A record replayed to its terminal position.
#[derive(Debug, Clone)]
pub struct ImportedGame {
    pub record: GameRecord,
    /// Board after all setup stones and moves
    pub board: Board,
    /// Stones captured by Black
    pub black_captures: u16,
    /// Stones captured by White
    pub white_captures: u16,
    /// Consecutive passes at the end of the record
    pub pass_count: u8,
}

fn coord_to_sgf(coord: Coord) -> String {
    // Direct alphabet offset, no letter skipping
    format!(
        "{}{}",
        (b'a' + coord.x) as char,
        (b'a' + coord.y) as char
    )
}

fn sgf_to_coord(value: &str, size: u8) -> Option<Coord> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let x = bytes[0].checked_sub(b'a')?;
    let y = bytes[1].checked_sub(b'a')?;
    let coord = Coord::new(x, y);
    coord.is_valid(size).then_some(coord)
}

/// Generate the SGF text for a record.
pub fn to_sgf(record: &GameRecord) -> String {
    let mut out = String::new();
    out.push_str("(;FF[4]");
    match record.rule_set {
        RuleSet::Go => out.push_str("GM[1]"),
        RuleSet::Gomoku => out.push_str("GM[4]"),
    }
    out.push_str(&format!("SZ[{}]KM[{}]", record.size, record.komi));
    if !record.date.is_empty() {
        out.push_str(&format!("DT[{}]", record.date));
    }
    out.push_str(&format!(
        "PB[{}]PW[{}]AP[tengen]",
        record.black_player, record.white_player
    ));

    // Resignation goes on the root as a result property, not a move node
    if let Some((color, _)) = record
        .moves
        .iter()
        .find(|(_, mv)| matches!(mv, Move::Resign))
    {
        let result = match color {
            Color::Black => "W+Resign",
            Color::White => "B+Resign",
        };
        out.push_str(&format!("RE[{}]", result));
    }

    // The lowercase SGF alphabet stops at 26; nothing beyond it can be
    // written, so out-of-range coordinates are dropped (setup) or written as
    // passes (moves) instead of overflowing the encoder.
    let max = record.size.min(26);

    // Setup stones as AB/AW value lists on the root node
    for color in [Color::Black, Color::White] {
        let coords: Vec<&(Color, Coord)> = record
            .setup
            .iter()
            .filter(|(c, coord)| *c == color && coord.is_valid(max))
            .collect();
        if !coords.is_empty() {
            out.push_str(match color {
                Color::Black => "AB",
                Color::White => "AW",
            });
            for (_, coord) in coords {
                out.push_str(&format!("[{}]", coord_to_sgf(*coord)));
            }
        }
    }

    for (color, mv) in &record.moves {
        let id = match color {
            Color::Black => 'B',
            Color::White => 'W',
        };
        match mv {
            Move::Place(coord) if coord.is_valid(max) => {
                out.push_str(&format!(";{}[{}]", id, coord_to_sgf(*coord)));
            }
            Move::Place(_) | Move::Pass => out.push_str(&format!(";{}[]", id)),
            Move::Resign => {}
        }
    }

    out.push(')');
    out
}

/// Parse and replay an SGF document.
pub fn from_sgf(text: &str) -> Option<ImportedGame> {
    match parse_and_replay(text) {
        Ok(game) => Some(game),
        Err(err) => {
            tracing::error!("failed to import SGF: {}", err);
            None
        }
    }
}

fn parse_and_replay(text: &str) -> Result<ImportedGame> {
    let nodes = parse_document(text)?;
    let root = nodes
        .first()
        .ok_or_else(|| anyhow!("document has no nodes"))?;

    let size = match find_prop(root, "SZ") {
        Some(values) => values
            .first()
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|s| (2..=19).contains(s))
            .ok_or_else(|| anyhow!("invalid SZ property"))?,
        None => 19,
    };
    let komi = find_prop(root, "KM")
        .and_then(|v| v.first())
        .and_then(|v| v.parse::<f32>().ok())
        .unwrap_or(KOMI);
    let rule_set = match find_prop(root, "GM").and_then(|v| v.first().cloned()) {
        Some(gm) if gm == "4" => RuleSet::Gomoku,
        _ => RuleSet::Go,
    };

    let mut record = GameRecord::new(size, rule_set);
    record.komi = komi;
    if let Some(v) = find_prop(root, "PB").and_then(|v| v.first().cloned()) {
        record.black_player = v;
    }
    if let Some(v) = find_prop(root, "PW").and_then(|v| v.first().cloned()) {
        record.white_player = v;
    }
    record.date = find_prop(root, "DT")
        .and_then(|v| v.first().cloned())
        .unwrap_or_default();

    let mut board = Board::new(size);
    for (prop, color) in [("AB", Color::Black), ("AW", Color::White)] {
        if let Some(values) = find_prop(root, prop) {
            for value in values {
                let coord = sgf_to_coord(value, size)
                    .ok_or_else(|| anyhow!("setup stone out of bounds: {}", value))?;
                if !board.place(coord, color) {
                    return Err(anyhow!("setup stone on occupied point: {}", value));
                }
                record.setup.push((color, coord));
            }
        }
    }

    // Replay move nodes through the engine. `prev_fp` is the position before
    // the previous move, the reference point for simple-ko rejection.
    let mut black_captures = 0u16;
    let mut white_captures = 0u16;
    let mut pass_count = 0u8;
    let mut prev_fp: Option<String> = None;

    for node in &nodes {
        for (id, values) in node {
            let color = match id.as_str() {
                "B" => Color::Black,
                "W" => Color::White,
                _ => continue, // tolerate unrecognized properties
            };
            let coord = values.first().and_then(|v| sgf_to_coord(v, size));
            match coord {
                Some(coord) => {
                    let fp_now = board.fingerprint();
                    let placement =
                        apply_move(&board, coord, color, rule_set, prev_fp.as_deref())
                            .map_err(|e: GameError| {
                                anyhow!("illegal move at {:?} during replay: {}", coord, e)
                            })?;
                    match color {
                        Color::Black => black_captures += placement.captured,
                        Color::White => white_captures += placement.captured,
                    }
                    board = placement.board;
                    prev_fp = Some(fp_now);
                    pass_count = 0;
                    record.moves.push((color, Move::Place(coord)));
                }
                None => {
                    // Empty or unparsable coordinate is a pass
                    pass_count += 1;
                    record.moves.push((color, Move::Pass));
                }
            }
        }
    }

    // A resignation result on the root reads back as a terminal Resign move
    match find_prop(root, "RE").and_then(|v| v.first()).map(String::as_str) {
        Some("W+Resign") => record.moves.push((Color::Black, Move::Resign)),
        Some("B+Resign") => record.moves.push((Color::White, Move::Resign)),
        _ => {}
    }

    Ok(ImportedGame {
        record,
        board,
        black_captures,
        white_captures,
        pass_count,
    })
}

type SgfNode = Vec<(String, Vec<String>)>;

fn find_prop<'a>(node: &'a SgfNode, id: &str) -> Option<&'a Vec<String>> {
    node.iter()
        .find(|(prop_id, _)| prop_id == id)
        .map(|(_, values)| values)
}

/// Parse the main line of an SGF document into a flat node list.
fn parse_document(text: &str) -> Result<Vec<SgfNode>> {
    let mut chars = text.chars().peekable();
    skip_whitespace(&mut chars);
    if chars.next() != Some('(') {
        return Err(anyhow!("expected '(' at start of game tree"));
    }

    let mut nodes = Vec::new();
    collect_main_line(&mut chars, &mut nodes)?;
    Ok(nodes)
}

/// Collect nodes of the current sequence, then follow the first variation
/// (the main line); remaining variations are skipped.
fn collect_main_line(chars: &mut Peekable<Chars>, nodes: &mut Vec<SgfNode>) -> Result<()> {
    skip_whitespace(chars);
    while chars.peek() == Some(&';') {
        nodes.push(parse_node(chars)?);
        skip_whitespace(chars);
    }

    let mut first_variation = true;
    while chars.peek() == Some(&'(') {
        chars.next();
        if first_variation {
            collect_main_line(chars, nodes)?;
            first_variation = false;
        } else {
            let mut ignored = Vec::new();
            collect_main_line(chars, &mut ignored)?;
        }
        skip_whitespace(chars);
    }

    if chars.next() != Some(')') {
        return Err(anyhow!("expected ')' at end of game tree"));
    }
    Ok(())
}

fn parse_node(chars: &mut Peekable<Chars>) -> Result<SgfNode> {
    if chars.next() != Some(';') {
        return Err(anyhow!("expected ';' at start of node"));
    }
    let mut props = Vec::new();
    skip_whitespace(chars);
    while chars.peek().is_some_and(|c| c.is_ascii_uppercase()) {
        props.push(parse_property(chars)?);
        skip_whitespace(chars);
    }
    Ok(props)
}

fn parse_property(chars: &mut Peekable<Chars>) -> Result<(String, Vec<String>)> {
    let mut id = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_uppercase() {
            break;
        }
        id.push(c);
        chars.next();
    }
    skip_whitespace(chars);

    let mut values = Vec::new();
    while chars.peek() == Some(&'[') {
        values.push(parse_value(chars)?);
        skip_whitespace(chars);
    }
    if values.is_empty() {
        return Err(anyhow!("property {} has no value", id));
    }
    Ok((id, values))
}

fn parse_value(chars: &mut Peekable<Chars>) -> Result<String> {
    if chars.next() != Some('[') {
        return Err(anyhow!("expected '[' at start of property value"));
    }
    let mut value = String::new();
    let mut escaped = false;
    for c in chars.by_ref() {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ']' {
            return Ok(value);
        } else {
            value.push(c);
        }
    }
    Err(anyhow!("unterminated property value"))
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
