use crate::game_state::board::Board;
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::{TilePos, PROMOTION_KINDS};
use crate::game_state::piece::Piece;
use crate::move_generation::legal_move_generator::walk_basis;
use crate::moves::chess_move::ChessMove;

/// Pawn candidates: advances, double steps, captures, promotions and en passant.
///
/// Reaching the promotion row yields four sibling moves sharing source and
/// destination, one per replacement kind.
pub fn generate_pawn_moves(
    board: &Board,
    from: TilePos,
    pawn: Piece,
    last_move: Option<&ChessMove>,
) -> ChessResult<Vec<ChessMove>> {
    let promotion_row = pawn.color.promotion_row();
    let mut out = Vec::new();

    for basis in pawn.movement_bases(from) {
        for step in walk_basis(board, from, pawn, &basis)? {
            let to = step.to;
            match step.occupant {
                None if to.row == promotion_row => {
                    for kind in PROMOTION_KINDS {
                        out.push(ChessMove::PawnTransform {
                            from,
                            to,
                            piece: pawn,
                            replacement: pawn.promoted(kind),
                        });
                    }
                }
                None if step.steps == 2 => out.push(ChessMove::PawnDoubleStep {
                    from,
                    to,
                    piece: pawn,
                }),
                None => out.push(ChessMove::Normal {
                    from,
                    to,
                    piece: pawn,
                }),
                Some(captured) if to.row == promotion_row => {
                    for kind in PROMOTION_KINDS {
                        out.push(ChessMove::PawnTransformKill {
                            from,
                            to,
                            piece: pawn,
                            captured,
                            replacement: pawn.promoted(kind),
                        });
                    }
                }
                Some(captured) => out.push(ChessMove::Kill {
                    from,
                    to,
                    piece: pawn,
                    captured,
                }),
            }
        }
    }

    if let Some(mv) = en_passant(board, from, pawn, last_move)? {
        out.push(mv);
    }

    Ok(out)
}

/// En passant is available only right after an enemy double step that landed
/// beside this pawn. The pawn moves onto the stepped-over tile.
fn en_passant(
    board: &Board,
    from: TilePos,
    pawn: Piece,
    last_move: Option<&ChessMove>,
) -> ChessResult<Option<ChessMove>> {
    let Some(&ChessMove::PawnDoubleStep {
        to: landed,
        piece: victim,
        ..
    }) = last_move
    else {
        return Ok(None);
    };

    if victim.color == pawn.color || landed.row != from.row || (landed.col - from.col).abs() != 1 {
        return Ok(None);
    }
    if board.piece_at(landed)? != Some(victim) {
        return Ok(None);
    }

    let to = TilePos::new(from.row + pawn.color.forward(), landed.col);
    if board.piece_at(to)?.is_some() {
        return Ok(None);
    }

    Ok(Some(ChessMove::EnPassant {
        from,
        to,
        capture_at: landed,
        piece: pawn,
        captured: victim,
    }))
}
