//! Reversible board transitions.
//!
//! `ChessMove` is a closed set of seven variants. Each carries exactly the
//! tiles and piece values it needs to check the board's pre-state, apply the
//! transition, and revert it. `execute` followed by `undo` restores the
//! piece-to-tile mapping exactly.
//!
//! Both operations validate the whole expected state before touching the
//! board, so a rejected move leaves the board unchanged.

use std::fmt;

use crate::game_state::board::{Board, Highlight};
use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::TilePos;
use crate::game_state::piece::Piece;
use crate::moves::move_descriptions::{castling_squares, CastleSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChessMove {
    /// Quiet move onto an empty tile.
    Normal { from: TilePos, to: TilePos, piece: Piece },
    /// Capture on the destination tile.
    Kill {
        from: TilePos,
        to: TilePos,
        piece: Piece,
        captured: Piece,
    },
    /// Pawn capture where the captured pawn stands beside the source, not on `to`.
    EnPassant {
        from: TilePos,
        to: TilePos,
        capture_at: TilePos,
        piece: Piece,
        captured: Piece,
    },
    /// Two-tile pawn advance from its starting row.
    PawnDoubleStep { from: TilePos, to: TilePos, piece: Piece },
    /// Quiet pawn advance onto the last row, replaced by `replacement`.
    PawnTransform {
        from: TilePos,
        to: TilePos,
        piece: Piece,
        replacement: Piece,
    },
    /// Pawn capture onto the last row, replaced by `replacement`.
    PawnTransformKill {
        from: TilePos,
        to: TilePos,
        piece: Piece,
        captured: Piece,
        replacement: Piece,
    },
    /// King and rook move together.
    Castling {
        side: CastleSide,
        king: Piece,
        rook: Piece,
    },
}

impl ChessMove {
    /// The piece the player picks up: the pawn for promotions, the king for castling.
    pub fn piece(&self) -> Piece {
        match *self {
            ChessMove::Normal { piece, .. }
            | ChessMove::Kill { piece, .. }
            | ChessMove::EnPassant { piece, .. }
            | ChessMove::PawnDoubleStep { piece, .. }
            | ChessMove::PawnTransform { piece, .. }
            | ChessMove::PawnTransformKill { piece, .. } => piece,
            ChessMove::Castling { king, .. } => king,
        }
    }

    pub fn source(&self) -> TilePos {
        match *self {
            ChessMove::Normal { from, .. }
            | ChessMove::Kill { from, .. }
            | ChessMove::EnPassant { from, .. }
            | ChessMove::PawnDoubleStep { from, .. }
            | ChessMove::PawnTransform { from, .. }
            | ChessMove::PawnTransformKill { from, .. } => from,
            ChessMove::Castling { side, king, .. } => castling_squares(king.color, side).king_from,
        }
    }

    /// Tile the player clicks to choose this move.
    pub fn activation_pos(&self) -> TilePos {
        match *self {
            ChessMove::Normal { to, .. }
            | ChessMove::Kill { to, .. }
            | ChessMove::EnPassant { to, .. }
            | ChessMove::PawnDoubleStep { to, .. }
            | ChessMove::PawnTransform { to, .. }
            | ChessMove::PawnTransformKill { to, .. } => to,
            ChessMove::Castling { side, king, .. } => castling_squares(king.color, side).king_to,
        }
    }

    /// Tile whose occupant this move removes, if it captures.
    pub fn attack_pos(&self) -> Option<TilePos> {
        match *self {
            ChessMove::Kill { to, .. } | ChessMove::PawnTransformKill { to, .. } => Some(to),
            ChessMove::EnPassant { capture_at, .. } => Some(capture_at),
            _ => None,
        }
    }

    pub fn captured(&self) -> Option<Piece> {
        match *self {
            ChessMove::Kill { captured, .. }
            | ChessMove::EnPassant { captured, .. }
            | ChessMove::PawnTransformKill { captured, .. } => Some(captured),
            _ => None,
        }
    }

    pub fn replacement(&self) -> Option<Piece> {
        match *self {
            ChessMove::PawnTransform { replacement, .. }
            | ChessMove::PawnTransformKill { replacement, .. } => Some(replacement),
            _ => None,
        }
    }

    /// Every piece that changes tile: the mover, plus the rook when castling.
    pub fn moved_pieces(&self) -> impl Iterator<Item = Piece> {
        let rook = match *self {
            ChessMove::Castling { rook, .. } => Some(rook),
            _ => None,
        };
        std::iter::once(self.piece()).chain(rook)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.attack_pos().is_some()
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        matches!(self, ChessMove::Castling { .. })
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self, ChessMove::EnPassant { .. })
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.replacement().is_some()
    }

    /// Highlight applied to the activation tile when the move is offered.
    pub fn highlight(&self) -> Highlight {
        match self {
            ChessMove::Normal { .. } | ChessMove::PawnDoubleStep { .. } => Highlight::Movable,
            ChessMove::Kill { .. } => Highlight::Killable,
            ChessMove::EnPassant { .. }
            | ChessMove::PawnTransform { .. }
            | ChessMove::PawnTransformKill { .. }
            | ChessMove::Castling { .. } => Highlight::Special,
        }
    }

    pub fn execute(&self, board: &mut Board) -> ChessResult<()> {
        if !self.matches_pre_state(board)? {
            return Err(ChessErrors::CannotExecuteMove(self.to_string()));
        }

        match *self {
            ChessMove::Normal { from, to, piece } | ChessMove::PawnDoubleStep { from, to, piece } => {
                board.put_piece(from, None)?;
                board.put_piece(to, Some(piece))?;
            }
            ChessMove::Kill { from, to, piece, .. } => {
                board.put_piece(from, None)?;
                board.put_piece(to, Some(piece))?;
            }
            ChessMove::EnPassant {
                from,
                to,
                capture_at,
                piece,
                ..
            } => {
                board.put_piece(from, None)?;
                board.put_piece(capture_at, None)?;
                board.put_piece(to, Some(piece))?;
            }
            ChessMove::PawnTransform {
                from,
                to,
                replacement,
                ..
            }
            | ChessMove::PawnTransformKill {
                from,
                to,
                replacement,
                ..
            } => {
                board.put_piece(from, None)?;
                board.put_piece(to, Some(replacement))?;
            }
            ChessMove::Castling { side, king, rook } => {
                let squares = castling_squares(king.color, side);
                board.put_piece(squares.king_from, None)?;
                board.put_piece(squares.rook_from, None)?;
                board.put_piece(squares.king_to, Some(king))?;
                board.put_piece(squares.rook_to, Some(rook))?;
            }
        }
        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> ChessResult<()> {
        if !self.matches_post_state(board)? {
            return Err(ChessErrors::CannotUndoMove(self.to_string()));
        }

        match *self {
            ChessMove::Normal { from, to, piece }
            | ChessMove::PawnDoubleStep { from, to, piece }
            | ChessMove::PawnTransform { from, to, piece, .. } => {
                board.put_piece(to, None)?;
                board.put_piece(from, Some(piece))?;
            }
            ChessMove::Kill {
                from,
                to,
                piece,
                captured,
            }
            | ChessMove::PawnTransformKill {
                from,
                to,
                piece,
                captured,
                ..
            } => {
                board.put_piece(to, Some(captured))?;
                board.put_piece(from, Some(piece))?;
            }
            ChessMove::EnPassant {
                from,
                to,
                capture_at,
                piece,
                captured,
            } => {
                board.put_piece(to, None)?;
                board.put_piece(capture_at, Some(captured))?;
                board.put_piece(from, Some(piece))?;
            }
            ChessMove::Castling { side, king, rook } => {
                let squares = castling_squares(king.color, side);
                board.put_piece(squares.king_to, None)?;
                board.put_piece(squares.rook_to, None)?;
                board.put_piece(squares.king_from, Some(king))?;
                board.put_piece(squares.rook_from, Some(rook))?;
            }
        }
        Ok(())
    }

    fn matches_pre_state(&self, board: &Board) -> ChessResult<bool> {
        Ok(match *self {
            ChessMove::Normal { from, to, piece }
            | ChessMove::PawnDoubleStep { from, to, piece }
            | ChessMove::PawnTransform { from, to, piece, .. } => {
                holds(board, from, Some(piece))? && holds(board, to, None)?
            }
            ChessMove::Kill {
                from,
                to,
                piece,
                captured,
            }
            | ChessMove::PawnTransformKill {
                from,
                to,
                piece,
                captured,
                ..
            } => holds(board, from, Some(piece))? && holds(board, to, Some(captured))?,
            ChessMove::EnPassant {
                from,
                to,
                capture_at,
                piece,
                captured,
            } => {
                to != capture_at
                    && holds(board, from, Some(piece))?
                    && holds(board, capture_at, Some(captured))?
                    && holds(board, to, None)?
            }
            ChessMove::Castling { side, king, rook } => {
                let squares = castling_squares(king.color, side);
                holds(board, squares.king_from, Some(king))?
                    && holds(board, squares.rook_from, Some(rook))?
                    && holds(board, squares.king_to, None)?
                    && holds(board, squares.rook_to, None)?
            }
        })
    }

    fn matches_post_state(&self, board: &Board) -> ChessResult<bool> {
        Ok(match *self {
            ChessMove::Normal { from, to, piece }
            | ChessMove::PawnDoubleStep { from, to, piece }
            | ChessMove::Kill { from, to, piece, .. } => {
                holds(board, to, Some(piece))? && holds(board, from, None)?
            }
            ChessMove::PawnTransform {
                from,
                to,
                replacement,
                ..
            }
            | ChessMove::PawnTransformKill {
                from,
                to,
                replacement,
                ..
            } => holds(board, to, Some(replacement))? && holds(board, from, None)?,
            ChessMove::EnPassant {
                from,
                to,
                capture_at,
                piece,
                ..
            } => {
                holds(board, to, Some(piece))?
                    && holds(board, from, None)?
                    && holds(board, capture_at, None)?
            }
            ChessMove::Castling { side, king, rook } => {
                let squares = castling_squares(king.color, side);
                holds(board, squares.king_to, Some(king))?
                    && holds(board, squares.rook_to, Some(rook))?
                    && holds(board, squares.king_from, None)?
                    && holds(board, squares.rook_from, None)?
            }
        })
    }
}

#[inline]
fn holds(board: &Board, pos: TilePos, expected: Option<Piece>) -> ChessResult<bool> {
    Ok(board.piece_at(pos)? == expected)
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChessMove::Normal { from, to, piece } | ChessMove::PawnDoubleStep { from, to, piece } => {
                write!(f, "{}{from}-{to}", piece.kind.letter())
            }
            ChessMove::Kill { from, to, piece, .. } | ChessMove::EnPassant { from, to, piece, .. } => {
                write!(f, "{}{from}-x{to}", piece.kind.letter())
            }
            ChessMove::PawnTransform {
                from,
                to,
                piece,
                replacement,
            } => write!(
                f,
                "{}{from}-{to}:{}",
                piece.kind.letter(),
                replacement.kind.letter()
            ),
            ChessMove::PawnTransformKill {
                from,
                to,
                piece,
                replacement,
                ..
            } => write!(
                f,
                "{}{from}-x{to}:{}",
                piece.kind.letter(),
                replacement.kind.letter()
            ),
            ChessMove::Castling { side, .. } => match side {
                CastleSide::KingSide => write!(f, "0-0"),
                CastleSide::QueenSide => write!(f, "0-0-0"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::piece::PieceId;

    fn piece(id: u16, color: Color, kind: PieceKind) -> Piece {
        Piece::new(PieceId(id), color, kind)
    }

    fn assert_round_trip(board: &mut Board, mv: ChessMove) {
        let before = board.clone();
        mv.execute(board).expect("move should execute");
        assert_ne!(*board, before);
        mv.undo(board).expect("move should undo");
        assert_eq!(*board, before);
    }

    #[test]
    fn normal_move_round_trips_and_rejects_wrong_pre_state() {
        let mut board = Board::standard();
        let pawn = board
            .piece_at(TilePos::new(6, 4))
            .expect("on board")
            .expect("pawn on e2");
        let mv = ChessMove::PawnDoubleStep {
            from: TilePos::new(6, 4),
            to: TilePos::new(4, 4),
            piece: pawn,
        };
        assert_round_trip(&mut board, mv);

        mv.execute(&mut board).expect("first execute succeeds");
        let before = board.clone();
        assert_eq!(
            mv.execute(&mut board),
            Err(ChessErrors::CannotExecuteMove("Pe2-e4".to_owned()))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn undo_requires_exact_post_state() {
        let mut board = Board::standard();
        let knight = board
            .piece_at(TilePos::new(7, 1))
            .expect("on board")
            .expect("knight on b1");
        let mv = ChessMove::Normal {
            from: TilePos::new(7, 1),
            to: TilePos::new(5, 2),
            piece: knight,
        };
        assert_eq!(
            mv.undo(&mut board),
            Err(ChessErrors::CannotUndoMove("Nb1-c3".to_owned()))
        );
    }

    #[test]
    fn en_passant_clears_the_pawn_beside_the_destination() {
        let mut board = Board::new_empty();
        let white = piece(30, Color::Light, PieceKind::Pawn);
        let black = piece(11, Color::Dark, PieceKind::Pawn);
        board.put_piece(TilePos::new(3, 4), Some(white)).expect("on board");
        board.put_piece(TilePos::new(3, 3), Some(black)).expect("on board");

        let mv = ChessMove::EnPassant {
            from: TilePos::new(3, 4),
            to: TilePos::new(2, 3),
            capture_at: TilePos::new(3, 3),
            piece: white,
            captured: black,
        };
        assert_round_trip(&mut board, mv);

        mv.execute(&mut board).expect("execute");
        assert_eq!(board.piece_at(TilePos::new(3, 3)), Ok(None));
        assert_eq!(board.piece_at(TilePos::new(2, 3)), Ok(Some(white)));
        assert_eq!(mv.attack_pos(), Some(TilePos::new(3, 3)));
        assert_eq!(mv.activation_pos(), TilePos::new(2, 3));
    }

    #[test]
    fn promotion_kill_restores_pawn_and_victim() {
        let mut board = Board::new_empty();
        let pawn = piece(25, Color::Light, PieceKind::Pawn);
        let rook = piece(0, Color::Dark, PieceKind::Rook);
        board.put_piece(TilePos::new(1, 1), Some(pawn)).expect("on board");
        board.put_piece(TilePos::new(0, 0), Some(rook)).expect("on board");

        let replacement = pawn.promoted(PieceKind::Knight);
        let mv = ChessMove::PawnTransformKill {
            from: TilePos::new(1, 1),
            to: TilePos::new(0, 0),
            piece: pawn,
            captured: rook,
            replacement,
        };
        assert_round_trip(&mut board, mv);
        assert_eq!(mv.to_string(), "Pb7-xa8:N");
    }

    #[test]
    fn castling_moves_both_pieces_and_restores_both() {
        let mut board = Board::new_empty();
        let king = piece(20, Color::Light, PieceKind::King);
        let rook = piece(23, Color::Light, PieceKind::Rook);
        board.put_piece(TilePos::new(7, 4), Some(king)).expect("on board");
        board.put_piece(TilePos::new(7, 7), Some(rook)).expect("on board");

        let mv = ChessMove::Castling {
            side: CastleSide::KingSide,
            king,
            rook,
        };
        assert_round_trip(&mut board, mv);

        mv.execute(&mut board).expect("execute");
        assert_eq!(board.piece_at(TilePos::new(7, 6)), Ok(Some(king)));
        assert_eq!(board.piece_at(TilePos::new(7, 5)), Ok(Some(rook)));
        assert_eq!(mv.moved_pieces().count(), 2);
        assert_eq!(mv.highlight(), Highlight::Special);
    }
}
