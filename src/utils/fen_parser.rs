//! FEN position setup.
//!
//! Reads the placement, side-to-move and castling fields of a
//! Forsyth-Edwards Notation string into a board, a turn color and a castling
//! record. The en-passant and clock fields are accepted and ignored.

use crate::game_state::board::Board;
use crate::game_state::castling_record::CastlingRecord;
use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::game_state::piece::{Piece, PieceId};
use crate::moves::move_descriptions::CastleSide;

/// Everything a `GameManager` needs to start from an arbitrary position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSetup {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRecord,
}

pub fn parse_fen(fen: &str) -> ChessResult<PositionSetup> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidFENstringForm("missing board layout".to_owned()))?;
    let side_part = parts.next().unwrap_or("w");
    let castling_part = parts.next().unwrap_or("-");

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let rights = parse_castling_rights(castling_part)?;
    let castling = CastlingRecord::from_board(&board, |color, side| {
        rights.contains(&(color, side))
    });

    Ok(PositionSetup {
        board,
        side_to_move,
        castling,
    })
}

/// Pieces get ids in reading order, which for the standard layout matches
/// `Board::standard`.
fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFENstringForm(format!(
            "board layout has {} ranks",
            ranks.len()
        )));
    }

    let mut board = Board::new_empty();
    let mut next_id = 0u16;

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0i8;
        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFENtoken(ch));
                }
                if i32::from(col) + empty_count as i32 > 8 {
                    return Err(ChessErrors::InvalidFENstringForm(format!(
                        "rank '{rank_str}' has too many files"
                    )));
                }
                col += empty_count as i8;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFENtoken(ch))?;
            if col >= 8 {
                return Err(ChessErrors::InvalidFENstringForm(format!(
                    "rank '{rank_str}' has too many files"
                )));
            }

            board.put_piece(
                TilePos::new(row as i8, col),
                Some(Piece::new(PieceId(next_id), color, kind)),
            )?;
            next_id += 1;
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFENstringForm(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessErrors::InvalidFENstringForm(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<Vec<(Color, CastleSide)>> {
    if castling_part == "-" {
        return Ok(Vec::new());
    }

    castling_part
        .chars()
        .map(|ch| match ch {
            'K' => Ok((Color::Light, CastleSide::KingSide)),
            'Q' => Ok((Color::Light, CastleSide::QueenSide)),
            'k' => Ok((Color::Dark, CastleSide::KingSide)),
            'q' => Ok((Color::Dark, CastleSide::QueenSide)),
            _ => Err(ChessErrors::InvalidFENtoken(ch)),
        })
        .collect()
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
