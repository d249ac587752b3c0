//! Static move geometry and coordinate-notation helpers.
//!
//! Castling tile layouts per color and side, plus conversion between moves
//! and long algebraic strings such as `e2e4` or `e7e8q`, used by tests,
//! diagnostics and the command line front end.

use crate::game_state::chess_rules::{
    KING_HOME_COL, KING_SIDE_ROOK_COL, QUEEN_SIDE_ROOK_COL,
};
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::tile_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

pub const CASTLE_SIDES: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

/// Tiles touched by one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: TilePos,
    pub king_to: TilePos,
    pub rook_from: TilePos,
    pub rook_to: TilePos,
}

impl CastlingSquares {
    /// Tiles strictly between king and rook; all must be empty to castle.
    pub fn between(&self) -> Vec<TilePos> {
        let row = self.king_from.row;
        let (lo, hi) = if self.king_from.col < self.rook_from.col {
            (self.king_from.col, self.rook_from.col)
        } else {
            (self.rook_from.col, self.king_from.col)
        };
        (lo + 1..hi).map(|col| TilePos::new(row, col)).collect()
    }

    /// Tiles the king steps onto, in order, ending on its destination.
    pub fn king_path(&self) -> Vec<TilePos> {
        let row = self.king_from.row;
        let step = (self.king_to.col - self.king_from.col).signum();
        let mut path = Vec::new();
        let mut col = self.king_from.col;
        while col != self.king_to.col {
            col += step;
            path.push(TilePos::new(row, col));
        }
        path
    }
}

pub const fn castling_squares(color: Color, side: CastleSide) -> CastlingSquares {
    let row = color.back_row();
    match side {
        CastleSide::KingSide => CastlingSquares {
            king_from: TilePos::new(row, KING_HOME_COL),
            king_to: TilePos::new(row, KING_HOME_COL + 2),
            rook_from: TilePos::new(row, KING_SIDE_ROOK_COL),
            rook_to: TilePos::new(row, KING_HOME_COL + 1),
        },
        CastleSide::QueenSide => CastlingSquares {
            king_from: TilePos::new(row, KING_HOME_COL),
            king_to: TilePos::new(row, KING_HOME_COL - 2),
            rook_from: TilePos::new(row, QUEEN_SIDE_ROOK_COL),
            rook_to: TilePos::new(row, KING_HOME_COL - 1),
        },
    }
}

/// Long algebraic form: source, activation tile, and a lowercase promotion letter.
pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    let mut out = format!(
        "{}{}",
        tile_to_algebraic(mv.source()),
        tile_to_algebraic(mv.activation_pos())
    );
    if let Some(replacement) = mv.replacement() {
        out.push(replacement.kind.letter().to_ascii_lowercase());
    }
    out
}

/// Find the move in `moves` whose long algebraic form is `lan`.
///
/// A promotion without an explicit letter resolves to the queen.
pub fn find_long_algebraic<'a>(moves: &'a [ChessMove], lan: &str) -> Option<&'a ChessMove> {
    let wanted = lan.trim().to_ascii_lowercase();
    moves
        .iter()
        .find(|mv| move_to_long_algebraic(mv) == wanted)
        .or_else(|| {
            moves.iter().find(|mv| {
                mv.replacement().map(|r| r.kind) == Some(PieceKind::Queen)
                    && move_to_long_algebraic(mv).trim_end_matches('q') == wanted
            })
        })
}
