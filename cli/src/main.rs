// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless self-play harness
//!
//! Runs AI-vs-AI games without a UI: useful for exercising the engine,
//! eyeballing AI strength and producing SGF records. Also demonstrates the
//! snapshot codec round trip when asked.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tengen_core::engine::GameState;
use tengen_core::{go_ai, gomoku_ai, sgf, snapshot};
use tengen_core::{AiDecision, Color, Coord, Difficulty, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rules {
    Go,
    Gomoku,
}

impl From<Rules> for RuleSet {
    fn from(value: Rules) -> Self {
        match value {
            Rules::Go => RuleSet::Go,
            Rules::Gomoku => RuleSet::Gomoku,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "tengen", about = "Go/Gomoku engine self-play harness", version)]
struct Args {
    /// Rule set to play
    #[clap(short, long, value_enum, default_value = "go")]
    rules: Rules,

    /// Board size (9, 13 or 19 for Go; 15 is the usual Gomoku board)
    #[clap(short, long, default_value_t = 9)]
    size: u8,

    /// AI difficulty: easy/medium/hard, or a rank string like "5k"
    #[clap(short, long, default_value = "medium")]
    difficulty: String,

    /// Stop after this many moves even if the game is unfinished
    #[clap(short, long, default_value_t = 400)]
    max_moves: usize,

    /// Write the finished game as SGF to this path
    #[clap(long)]
    sgf_out: Option<std::path::PathBuf>,

    /// Print a snapshot of the final position and verify it round-trips
    #[clap(long)]
    snapshot: bool,

    /// Print the board after every move
    #[clap(long)]
    verbose_board: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.size < 5 || args.size > 19 {
        bail!("board size must be between 5 and 19");
    }
    let rule_set: RuleSet = args.rules.into();
    let difficulty = Difficulty::from_label(&args.difficulty);

    tracing::info!(?rule_set, size = args.size, ?difficulty, "starting self-play");
    let mut game = GameState::new(args.size, rule_set);

    while !game.is_over() && game.move_count() < args.max_moves {
        let mover = game.current_player;
        match next_decision(&game, difficulty) {
            AiDecision::Play(coord) => {
                game.play(coord)
                    .with_context(|| format!("AI produced an illegal move at {:?}", coord))?;
                tracing::debug!(?mover, ?coord, "played");
            }
            AiDecision::Pass => {
                tracing::debug!(?mover, "passes");
                game.pass();
            }
            AiDecision::Resign => {
                tracing::info!(?mover, "resigns");
                game.resign();
            }
        }
        if args.verbose_board {
            print_board(&game);
        }
    }

    print_board(&game);
    report(&game);

    if let Some(path) = &args.sgf_out {
        let text = sgf::to_sgf(&game.to_record());
        std::fs::write(path, &text)
            .with_context(|| format!("failed to write SGF to {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if args.snapshot {
        demo_snapshot(&game)?;
    }
    Ok(())
}

fn next_decision(game: &GameState, difficulty: Difficulty) -> AiDecision {
    match game.rule_set {
        RuleSet::Go => go_ai::choose_move(
            &game.board,
            game.current_player,
            difficulty,
            game.ko_fingerprint(),
        ),
        RuleSet::Gomoku => {
            AiDecision::Play(gomoku_ai::best_move(&game.board, game.current_player, difficulty))
        }
    }
}

fn print_board(game: &GameState) {
    let size = game.board.size();
    for y in 0..size {
        let mut row = String::with_capacity(size as usize * 2);
        for x in 0..size {
            row.push(match game.board.get(Coord::new(x, y)) {
                None => '.',
                Some(Color::Black) => 'X',
                Some(Color::White) => 'O',
            });
            row.push(' ');
        }
        println!("{}", row);
    }
    println!();
}

fn report(game: &GameState) {
    match game.rule_set {
        RuleSet::Go => {
            let score = game.score();
            println!(
                "score: black {:.1} / white {:.1} (black win-rate estimate {:.1}%)",
                score.black,
                score.white,
                game.win_rate()
            );
            if let Some(winner) = game.winner {
                println!("winner by resignation: {:?}", winner);
            }
        }
        RuleSet::Gomoku => match game.winner {
            Some(winner) => println!("five in a row: {:?} wins", winner),
            None => println!("no five in a row after {} moves", game.move_count()),
        },
    }
}

fn demo_snapshot(game: &GameState) -> Result<()> {
    let snap = snapshot::Snapshot::from_state(
        &game.board,
        game.current_player,
        game.rule_set,
        game.captures.0,
        game.captures.1,
    );
    let encoded = snapshot::encode(&snap);
    println!("snapshot ({} chars): {}", encoded.len(), encoded);

    let decoded = snapshot::decode(&encoded).context("snapshot failed to round-trip")?;
    if decoded != snap {
        bail!("snapshot round trip mismatch");
    }
    println!("snapshot round trip OK");
    Ok(())
}
