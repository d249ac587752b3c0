//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type across the crate. Variants fall into
//! three families:
//! - internal consistency violations (a move found the board in an unexpected
//!   state, an empty history was popped, a king is missing). These are logic
//!   defects and callers should propagate them rather than recover;
//! - bounds errors for tiles outside the 8x8 grid, which callers may treat as
//!   "nothing there";
//! - setup and session errors (bad FEN input, a player channel closed).
//!
//! Failures of speculative trial moves during legality filtering never reach
//! callers; the generator discards the candidate instead.

use crate::game_state::chess_types::{Color, PieceKind, TilePos};

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessErrors {
    /// A tile position outside `0..=7` on either axis was accessed.
    #[error("tile {0} is outside the board")]
    OutOfBounds(TilePos),

    /// `execute` found the board not in the move's expected pre-state.
    #[error("cannot execute move {0}")]
    CannotExecuteMove(String),

    /// `undo` found the board not in the move's expected post-state.
    #[error("cannot undo move {0}")]
    CannotUndoMove(String),

    /// `pop_move` was called with an empty history.
    #[error("no move to pop")]
    NoMoveToPop,

    /// The board holds no king for a color.
    #[error("board does not contain a {0} king")]
    PieceRegisterDoesNotContainAKing(Color),

    /// A destination tile grouped a number of moves other than one or four.
    #[error("invalid number of selectable moves for one tile: {0}")]
    InvalidSelectionGroup(usize),

    /// Promotion selection asked for a replacement kind with no matching move.
    #[error("no promotion move to {0:?}")]
    PromotionMoveNotFound(PieceKind),

    /// Found an unexpected character while parsing a FEN placement.
    #[error("invalid FEN token '{0}'")]
    InvalidFENtoken(char),

    /// FEN string had malformed structure.
    #[error("invalid FEN string: {0}")]
    InvalidFENstringForm(String),

    /// A coordinate such as `e4` could not be parsed.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraicString(String),

    /// A player could not hand the turn to its opponent.
    #[error("turn hand-off failed: {0}")]
    TurnHandOff(String),
}

impl ChessErrors {
    /// Whether a caller can continue after this error. Internal consistency
    /// violations return `false`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ChessErrors::OutOfBounds(_)
                | ChessErrors::InvalidFENtoken(_)
                | ChessErrors::InvalidFENstringForm(_)
                | ChessErrors::InvalidAlgebraicString(_)
                | ChessErrors::TurnHandOff(_)
        )
    }
}

pub type ChessResult<T> = Result<T, ChessErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_errors_are_recoverable_but_consistency_errors_are_not() {
        assert!(ChessErrors::OutOfBounds(TilePos::new(8, 0)).is_recoverable());
        assert!(!ChessErrors::NoMoveToPop.is_recoverable());
        assert!(!ChessErrors::CannotExecuteMove("Pe2-e4".to_owned()).is_recoverable());
    }

    #[test]
    fn messages_name_the_offending_tile() {
        let err = ChessErrors::OutOfBounds(TilePos::new(3, 9));
        assert_eq!(err.to_string(), "tile (3, 9) is outside the board");
    }
}
