//! Terminal-oriented Unicode board renderer.
//!
//! Row 0 (rank 8) is printed first so the board reads from White's side.
//! Highlighted empty tiles show a marker instead of the empty dot.

use crate::game_state::board::{Board, Highlight};
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::game_state::piece::Piece;

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8i8 {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for col in 0..8i8 {
            let tile = board.get_tile(TilePos::new(row, col)).ok().copied().unwrap_or_default();
            out.push(match tile.piece {
                Some(piece) => piece_to_unicode(piece),
                None => empty_tile_marker(tile.highlight),
            });

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn empty_tile_marker(highlight: Highlight) -> char {
    match highlight {
        Highlight::Movable | Highlight::Special => '○',
        Highlight::Killable | Highlight::Check | Highlight::Selected => '×',
        Highlight::Default => '·',
    }
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
