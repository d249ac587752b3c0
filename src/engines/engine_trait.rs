//! Engine abstraction shared by automated players.
//!
//! An engine inspects a shared game and proposes one move for the side to
//! move. It may push and pop speculatively, but must leave the game exactly as
//! it found it; the caller pushes the chosen move.

use crate::game_state::chess_errors::ChessResult;
use crate::moves::chess_move::ChessMove;
use crate::session::shared_game::SharedGame;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub score: Option<f64>,
    pub nodes: u64,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, game: &SharedGame) -> ChessResult<EngineOutput>;
}
