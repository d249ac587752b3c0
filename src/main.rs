//! Tile chess command line front end.
//!
//! - `tile_chess play` - run an engine-vs-engine match on two player threads
//! - `tile_chess perft` - count move paths from a position

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use tile_chess::engines::engine_random::RandomEngine;
use tile_chess::engines::engine_search::SearchEngine;
use tile_chess::engines::engine_trait::Engine;
use tile_chess::game_state::chess_errors::ChessResult;
use tile_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use tile_chess::game_state::chess_types::Color;
use tile_chess::game_state::game_manager::GameManager;
use tile_chess::move_generation::perft::{perft, perft_divide};
use tile_chess::search::search_state::{SearchAlgorithm, SearchConfig};
use tile_chess::session::shared_game::SharedGame;
use tile_chess::session::turn_scheduler::{EnginePlayer, MatchConfig, Player, TurnScheduler};
use tile_chess::utils::render_game_state::render_board;

/// Chess rules engine with minimax and alpha-beta look-ahead
#[derive(Parser)]
#[command(name = "tile_chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match between two engines
    Play {
        #[arg(long, value_enum, default_value_t = EngineKind::Random)]
        white: EngineKind,
        #[arg(long, value_enum, default_value_t = EngineKind::Alphabeta)]
        black: EngineKind,
        /// Look-ahead depth in plies for search engines
        #[arg(long, default_value_t = SearchConfig::default().depth)]
        depth: u8,
        #[arg(long, default_value_t = MatchConfig::default().max_plies)]
        max_plies: u16,
        /// Seed for random engines; each side derives its own stream
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },
    /// Count leaf positions below a position, split by root move
    Perft {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Random,
    Minimax,
    Alphabeta,
}

fn build_engine(kind: EngineKind, depth: u8, seed: Option<u64>) -> Box<dyn Engine> {
    let search = |algorithm| -> Box<dyn Engine> {
        Box::new(SearchEngine::new(SearchConfig { depth, algorithm }))
    };
    match kind {
        EngineKind::Random => match seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
        EngineKind::Minimax => search(SearchAlgorithm::Minimax),
        EngineKind::Alphabeta => search(SearchAlgorithm::AlphaBeta),
    }
}

fn run_play(
    white: EngineKind,
    black: EngineKind,
    depth: u8,
    max_plies: u16,
    seed: Option<u64>,
    fen: &str,
) -> ChessResult<()> {
    let game = SharedGame::new(GameManager::from_fen(fen)?);
    let seats: [Box<dyn Player>; 2] = [
        Box::new(EnginePlayer::new(Color::Light, build_engine(white, depth, seed))),
        Box::new(EnginePlayer::new(
            Color::Dark,
            build_engine(black, depth, seed.map(|s| s.wrapping_add(1))),
        )),
    ];
    let [white_seat, black_seat] = seats;

    let config = MatchConfig {
        max_plies,
        ..MatchConfig::default()
    };
    let report = TurnScheduler::new(game.clone(), config).run_match(white_seat, black_seat)?;

    println!("{}", render_board(&game.draw_snapshot().board));
    let moves: Vec<String> = report.moves.iter().map(ToString::to_string).collect();
    println!("moves: {}", moves.join(" "));
    println!("plies: {} status: {:?}", report.plies, report.status);
    Ok(())
}

fn run_perft(depth: u8, fen: &str) -> ChessResult<()> {
    let mut manager = GameManager::from_fen(fen)?;
    println!("{}", render_board(manager.board()));

    for (lan, nodes) in perft_divide(&mut manager, depth)? {
        println!("{lan}: {nodes}");
    }
    let counts = perft(&mut manager, depth)?;
    println!(
        "nodes={} captures={} en_passant={} castles={} promotions={} checks={} checkmates={}",
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play {
            white,
            black,
            depth,
            max_plies,
            seed,
            fen,
        } => run_play(white, black, depth, max_plies, seed, &fen),
        Commands::Perft { depth, fen } => run_perft(depth, &fen),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, recoverable = err.is_recoverable(), "command failed");
            ExitCode::FAILURE
        }
    }
}
