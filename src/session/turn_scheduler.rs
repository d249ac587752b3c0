//! Strict turn alternation between two player threads.
//!
//! Each seat owns one wake channel. A seat blocks until it receives
//! `YourTurn`, plays exactly one move on the shared game, then wakes its
//! opponent. Only the seat holding the turn ever calls `push_move`. When the
//! game is decided or the ply limit is hit, the seat reports back to the
//! scheduler instead of waking the opponent, and the scheduler stops both.

use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{info, warn};

use crate::engines::engine_trait::Engine;
use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::metrics::GameStatus;
use crate::moves::chess_move::ChessMove;
use crate::session::human_player::HumanPlayer;
use crate::session::shared_game::SharedGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Stop after this many plies even if the game is undecided.
    pub max_plies: u16,
    /// Edge length of one tile in pixels, for click mapping.
    pub tile_size: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            tile_size: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSignal {
    YourTurn,
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub status: GameStatus,
    pub plies: usize,
    pub moves: Vec<ChessMove>,
}

/// One side of a match.
pub trait Player: Send {
    fn color(&self) -> Color;

    /// Play one move on `game`, or return `None` when no move can be made.
    fn take_turn(&mut self, game: &SharedGame) -> ChessResult<Option<ChessMove>>;
}

/// A seat driven by an engine.
pub struct EnginePlayer {
    color: Color,
    engine: Box<dyn Engine>,
}

impl EnginePlayer {
    pub fn new(color: Color, engine: Box<dyn Engine>) -> Self {
        Self { color, engine }
    }
}

impl Player for EnginePlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn take_turn(&mut self, game: &SharedGame) -> ChessResult<Option<ChessMove>> {
        let output = self.engine.choose_move(game)?;
        let Some(mv) = output.best_move else {
            return Ok(None);
        };
        game.push_move(mv)?;
        info!(
            engine = self.engine.name(),
            color = %self.color,
            %mv,
            score = ?output.score,
            nodes = output.nodes,
            "engine move"
        );
        Ok(Some(mv))
    }
}

impl Player for HumanPlayer {
    fn color(&self) -> Color {
        HumanPlayer::color(self)
    }

    fn take_turn(&mut self, game: &SharedGame) -> ChessResult<Option<ChessMove>> {
        self.play_turn(game)
    }
}

pub struct TurnScheduler {
    game: SharedGame,
    config: MatchConfig,
}

impl TurnScheduler {
    pub fn new(game: SharedGame, config: MatchConfig) -> Self {
        Self { game, config }
    }

    /// Run a full match on the scheduler's game and report how it ended.
    pub fn run_match(&self, white: Box<dyn Player>, black: Box<dyn Player>) -> ChessResult<MatchReport> {
        if white.color() != Color::Light || black.color() != Color::Dark {
            return Err(ChessErrors::TurnHandOff(
                "players must be seated as white and black".to_owned(),
            ));
        }

        if !self.is_finished() {
            self.play(white, black)?;
        }

        let status = self.game.status();
        let moves = self.game.history();
        info!(?status, plies = moves.len(), "match finished");
        Ok(MatchReport {
            status,
            plies: moves.len(),
            moves,
        })
    }

    fn is_finished(&self) -> bool {
        self.game.is_game_over() || self.game.ply_count() >= usize::from(self.config.max_plies)
    }

    fn play(&self, white: Box<dyn Player>, black: Box<dyn Player>) -> ChessResult<()> {
        let (white_tx, white_rx) = unbounded();
        let (black_tx, black_rx) = unbounded();
        let (done_tx, done_rx) = unbounded();

        let white_seat = Seat {
            player: white,
            inbox: white_rx,
            opponent: black_tx.clone(),
            done: done_tx.clone(),
            game: self.game.clone(),
            max_plies: self.config.max_plies,
        };
        let black_seat = Seat {
            player: black,
            inbox: black_rx,
            opponent: white_tx.clone(),
            done: done_tx,
            game: self.game.clone(),
            max_plies: self.config.max_plies,
        };

        let handles = [
            thread::spawn(move || white_seat.run()),
            thread::spawn(move || black_seat.run()),
        ];

        let first = match self.game.side_to_move() {
            Color::Light => &white_tx,
            Color::Dark => &black_tx,
        };
        let outcome = first
            .send(TurnSignal::YourTurn)
            .map_err(|_| ChessErrors::TurnHandOff("first player is gone".to_owned()))
            .and_then(|()| {
                done_rx
                    .recv()
                    .map_err(|_| ChessErrors::TurnHandOff("both players exited".to_owned()))?
            });

        // A seat that already left has dropped its inbox; that is fine here.
        let _ = white_tx.send(TurnSignal::Stop);
        let _ = black_tx.send(TurnSignal::Stop);
        for handle in handles {
            handle
                .join()
                .map_err(|_| ChessErrors::TurnHandOff("player thread panicked".to_owned()))?;
        }
        outcome
    }
}

struct Seat {
    player: Box<dyn Player>,
    inbox: Receiver<TurnSignal>,
    opponent: Sender<TurnSignal>,
    done: Sender<ChessResult<()>>,
    game: SharedGame,
    max_plies: u16,
}

impl Seat {
    fn run(mut self) {
        let color = self.player.color();
        loop {
            match self.inbox.recv() {
                Ok(TurnSignal::YourTurn) => {
                    if let Some(report) = self.play_one_turn() {
                        let _ = self.done.send(report);
                    }
                }
                Ok(TurnSignal::Stop) => break,
                Err(_) => {
                    warn!(%color, "turn channel closed, player exiting");
                    break;
                }
            }
        }
    }

    /// Returns the match outcome once the match should end, `None` after a
    /// successful hand-off to the opponent.
    fn play_one_turn(&mut self) -> Option<ChessResult<()>> {
        match self.player.take_turn(&self.game) {
            Err(err) => return Some(Err(err)),
            Ok(None) => return Some(Ok(())),
            Ok(Some(_)) => {}
        }

        let finished = self.game.is_game_over()
            || self.game.ply_count() >= usize::from(self.max_plies);
        if finished {
            return Some(Ok(()));
        }

        if self.opponent.send(TurnSignal::YourTurn).is_err() {
            warn!(color = %self.player.color(), "opponent channel closed");
            return Some(Err(ChessErrors::TurnHandOff(
                "opponent channel closed".to_owned(),
            )));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::chess_types::TilePos;
    use crate::game_state::game_manager::GameManager;
    use crate::session::human_player::ClickInput;

    fn random_seat(color: Color, seed: u64) -> Box<dyn Player> {
        Box::new(EnginePlayer::new(color, Box::new(RandomEngine::with_seed(seed))))
    }

    #[test]
    fn random_match_stops_at_ply_limit_or_result() {
        let game = SharedGame::new_game().expect("new game");
        let scheduler = TurnScheduler::new(
            game.clone(),
            MatchConfig {
                max_plies: 30,
                ..MatchConfig::default()
            },
        );
        let report = scheduler
            .run_match(random_seat(Color::Light, 3), random_seat(Color::Dark, 4))
            .expect("match");

        assert!(report.plies <= 30);
        assert!(report.plies == 30 || report.status.is_terminal());
        assert_eq!(report.moves, game.history());
        for (ply, mv) in report.moves.iter().enumerate() {
            let mover = if ply % 2 == 0 { Color::Light } else { Color::Dark };
            assert_eq!(mv.piece().color, mover);
        }
    }

    #[test]
    fn decided_game_returns_immediately() {
        let game = SharedGame::new(
            GameManager::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen"),
        );
        let report = TurnScheduler::new(game, MatchConfig::default())
            .run_match(random_seat(Color::Light, 1), random_seat(Color::Dark, 2))
            .expect("match");
        assert_eq!(report.status, GameStatus::Stalemate);
        assert_eq!(report.plies, 0);
    }

    #[test]
    fn seats_must_match_colors() {
        let game = SharedGame::new_game().expect("new game");
        let result = TurnScheduler::new(game, MatchConfig::default())
            .run_match(random_seat(Color::Dark, 1), random_seat(Color::Light, 2));
        assert!(matches!(result, Err(ChessErrors::TurnHandOff(_))));
    }

    #[test]
    fn human_seat_plays_from_queued_clicks() {
        let game = SharedGame::new_game().expect("new game");
        let (tx, rx) = unbounded();
        let tile = MatchConfig::default().tile_size;
        let click = |pos: TilePos| ClickInput::Pixel {
            x: pos.col as u32 * tile + 1,
            y: pos.row as u32 * tile + 1,
        };
        for pos in [TilePos::new(6, 4), TilePos::new(4, 4)] {
            tx.send(click(pos)).expect("send");
        }

        let report = TurnScheduler::new(
            game,
            MatchConfig {
                max_plies: 2,
                ..MatchConfig::default()
            },
        )
        .run_match(
            Box::new(HumanPlayer::with_clicks(Color::Light, tile, rx)),
            random_seat(Color::Dark, 9),
        )
        .expect("match");

        assert_eq!(report.plies, 2);
        assert_eq!(report.moves[0].to_string(), "Pe2-e4");
    }
}
