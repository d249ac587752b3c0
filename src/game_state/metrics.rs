//! Cached per-position metrics and the terminal-state classification.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, TileSet};
use crate::moves::chess_move::ChessMove;

/// Everything derived from the position on top of the history stack.
///
/// A copy is stacked on every push and popped back on every pop, so undoing
/// a move never recomputes anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMetrics {
    /// `[color]`: tiles that color could capture on right now.
    pub attacked_by: [TileSet; 2],
    pub in_check: [bool; 2],
    /// Legal moves for the side to move.
    pub legal_moves: Vec<ChessMove>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }

    /// Classify a position from its legal-move count and the mover's check flag.
    pub fn classify(side_to_move: Color, legal_move_count: usize, in_check: bool) -> Self {
        match (legal_move_count, in_check) {
            (0, true) => GameStatus::Checkmate {
                winner: side_to_move.opposite(),
            },
            (0, false) => GameStatus::Stalemate,
            _ => GameStatus::Active,
        }
    }
}

/// Deep copy of the drawable state, held while search mutates the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedBoard {
    pub board: Board,
    pub in_check: [bool; 2],
}
