//! Search configuration, results, and the state seam search runs against.

use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_manager::GameManager;
use crate::game_state::metrics::GameStatus;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::BoardScorer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead. Zero evaluates the current position only.
    pub depth: u8,
    pub algorithm: SearchAlgorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            algorithm: SearchAlgorithm::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// First move reaching the best score, `None` when no legal move exists
    /// or the depth is zero.
    pub best_move: Option<ChessMove>,
    pub score: f64,
    pub nodes: u64,
}

/// Positions search can walk with push/pop.
///
/// Implemented by the manager itself and by the lock-wrapped shared game, so
/// the same search code runs single-threaded or against a live session.
pub trait SearchState {
    fn side_to_move(&self) -> Color;
    fn status(&self) -> GameStatus;
    fn legal_moves(&self) -> Vec<ChessMove>;
    fn evaluate<S: BoardScorer + ?Sized>(&self, scorer: &S) -> f64;
    fn push_move(&mut self, mv: ChessMove) -> ChessResult<()>;
    fn pop_move(&mut self) -> ChessResult<ChessMove>;
}

impl SearchState for GameManager {
    #[inline]
    fn side_to_move(&self) -> Color {
        GameManager::side_to_move(self)
    }

    #[inline]
    fn status(&self) -> GameStatus {
        GameManager::status(self)
    }

    fn legal_moves(&self) -> Vec<ChessMove> {
        GameManager::legal_moves(self).to_vec()
    }

    #[inline]
    fn evaluate<S: BoardScorer + ?Sized>(&self, scorer: &S) -> f64 {
        scorer.score(self)
    }

    #[inline]
    fn push_move(&mut self, mv: ChessMove) -> ChessResult<()> {
        GameManager::push_move(self, mv)
    }

    #[inline]
    fn pop_move(&mut self) -> ChessResult<ChessMove> {
        GameManager::pop_move(self)
    }
}

/// Dark maximizes, Light minimizes.
#[inline]
pub(crate) fn is_maximizing(color: Color) -> bool {
    color == Color::Dark
}
