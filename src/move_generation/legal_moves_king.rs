use crate::game_state::board::Board;
use crate::game_state::castling_record::CastlingRecord;
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_checks::leaves_king_safe;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_descriptions::{castling_squares, CASTLE_SIDES};

/// Castling candidates for `color`.
///
/// Both pieces must stand on their home tiles with zero recorded moves, the
/// tiles between them must be empty, and every tile the king steps over or
/// onto must be safe. The final landing tile is re-checked by the regular
/// legality filter.
pub fn generate_castling_moves(
    board: &mut Board,
    color: Color,
    castling: &CastlingRecord,
    in_check: bool,
) -> ChessResult<Vec<ChessMove>> {
    // Cannot castle out of check.
    if in_check {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for side in CASTLE_SIDES {
        let squares = castling_squares(color, side);

        let Some(king) = board.piece_at(squares.king_from)? else {
            continue;
        };
        let Some(rook) = board.piece_at(squares.rook_from)? else {
            continue;
        };
        if king.color != color
            || king.kind != PieceKind::King
            || rook.color != color
            || rook.kind != PieceKind::Rook
            || !castling.is_unmoved(king.id)
            || !castling.is_unmoved(rook.id)
        {
            continue;
        }

        let mut blocked = false;
        for pos in squares.between() {
            if board.piece_at(pos)?.is_some() {
                blocked = true;
                break;
            }
        }
        if blocked {
            continue;
        }

        let mut path_safe = true;
        for step in squares.king_path() {
            let trial = ChessMove::Normal {
                from: squares.king_from,
                to: step,
                piece: king,
            };
            if !leaves_king_safe(board, &trial)? {
                path_safe = false;
                break;
            }
        }
        if path_safe {
            out.push(ChessMove::Castling { side, king, rook });
        }
    }
    Ok(out)
}
