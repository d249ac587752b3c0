//! Full legal move generation pipeline.
//!
//! Walks every movement basis of every friendly piece to build candidates,
//! adds castling, then keeps only candidates that survive a trial
//! execute / king-safety scan / undo cycle. The unfiltered walk is also what
//! attacked-position scans are built on, so it must never depend on legality.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::castling_record::CastlingRecord;
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::game_state::piece::{CaptureRule, MovementBasis, Piece};
use crate::move_generation::legal_move_checks::{is_in_check, leaves_king_safe};
use crate::move_generation::legal_moves_king::generate_castling_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::moves::chess_move::ChessMove;

/// One reachable tile along a basis: step count, destination and its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayStep {
    pub steps: u8,
    pub to: TilePos,
    pub occupant: Option<Piece>,
}

/// Walk `basis` from `from`. The walk stops at the board edge and at the
/// first occupied tile, which is included only when it holds an enemy and
/// the basis allows capturing. Must-capture bases skip empty tiles and stop.
pub fn walk_basis(
    board: &Board,
    from: TilePos,
    piece: Piece,
    basis: &MovementBasis,
) -> ChessResult<Vec<RayStep>> {
    let mut out = Vec::new();
    let (d_row, d_col) = basis.direction;

    for steps in 1..=basis.max_steps {
        let to = from.offset(d_row * steps as i8, d_col * steps as i8);
        if !board.is_pos_valid(to) {
            break;
        }

        let occupant = board.piece_at(to)?;
        match occupant {
            None if basis.capture == CaptureRule::Must => break,
            Some(other) if other.color == piece.color || !basis.capture.allows_capture() => break,
            _ => {}
        }

        out.push(RayStep {
            steps,
            to,
            occupant,
        });

        if occupant.is_some() {
            break;
        }
    }

    Ok(out)
}

/// Unfiltered candidates for the piece on `from`, without castling.
///
/// `last_move` is the move on top of the history, needed for en passant.
pub fn generate_pseudo_moves_from(
    board: &Board,
    from: TilePos,
    last_move: Option<&ChessMove>,
) -> ChessResult<Vec<ChessMove>> {
    let Some(piece) = board.piece_at(from)? else {
        return Ok(Vec::new());
    };

    if piece.kind == PieceKind::Pawn {
        return generate_pawn_moves(board, from, piece, last_move);
    }

    let mut out = Vec::new();
    for basis in piece.movement_bases(from) {
        for step in walk_basis(board, from, piece, &basis)? {
            out.push(match step.occupant {
                None => ChessMove::Normal {
                    from,
                    to: step.to,
                    piece,
                },
                Some(captured) => ChessMove::Kill {
                    from,
                    to: step.to,
                    piece,
                    captured,
                },
            });
        }
    }
    Ok(out)
}

/// Unfiltered candidates for every piece of `color`, in row-major tile order.
pub fn generate_pseudo_moves(
    board: &Board,
    color: Color,
    last_move: Option<&ChessMove>,
) -> ChessResult<Vec<ChessMove>> {
    let mut out = Vec::with_capacity(64);
    let origins: Vec<TilePos> = board
        .pieces()
        .filter(|(_, p)| p.color == color)
        .map(|(pos, _)| pos)
        .collect();
    for from in origins {
        out.extend(generate_pseudo_moves_from(board, from, last_move)?);
    }
    Ok(out)
}

/// Fully legal moves for `color` in the position on `board`.
///
/// The board is mutated by trial moves and restored before returning.
pub fn generate_legal_moves(
    board: &mut Board,
    color: Color,
    last_move: Option<&ChessMove>,
    castling: &CastlingRecord,
) -> ChessResult<Vec<ChessMove>> {
    let in_check = is_in_check(board, color, last_move)?;

    let mut candidates = generate_pseudo_moves(board, color, last_move)?;
    candidates.extend(generate_castling_moves(board, color, castling, in_check)?);

    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if leaves_king_safe(board, &mv)? {
            legal.push(mv);
        } else {
            trace!(%mv, "candidate leaves own king attacked");
        }
    }
    Ok(legal)
}
