//! Attacked-position scans and the trial-move legality oracle.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::{Color, TileSet};
use crate::move_generation::legal_move_generator::generate_pseudo_moves;
use crate::moves::chess_move::ChessMove;

/// Tiles `attacker` could capture on, ignoring its own king's safety.
///
/// Built from the unfiltered generator and its capture moves only.
pub fn attacked_positions(
    board: &Board,
    attacker: Color,
    last_move: Option<&ChessMove>,
) -> ChessResult<TileSet> {
    Ok(generate_pseudo_moves(board, attacker, last_move)?
        .iter()
        .filter_map(ChessMove::attack_pos)
        .collect())
}

pub fn is_in_check(board: &Board, color: Color, last_move: Option<&ChessMove>) -> ChessResult<bool> {
    let king = board.king_position(color)?;
    Ok(attacked_positions(board, color.opposite(), last_move)?.contains(king))
}

/// Trial-execute `mv`, test whether the mover's king is attacked, and undo.
///
/// A candidate that cannot even be applied is reported unsafe rather than
/// as an error. A failing undo is a consistency violation and propagates.
pub fn leaves_king_safe(board: &mut Board, mv: &ChessMove) -> ChessResult<bool> {
    if let Err(err) = mv.execute(board) {
        trace!(%mv, %err, "discarding candidate that cannot be applied");
        return Ok(false);
    }

    let attacked = is_in_check(board, mv.piece().color, Some(mv));
    mv.undo(board)?;
    Ok(!attacked?)
}
