//! Tile conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and tile
//! positions. Row 0 is rank 8, column 0 is file a.

use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::TilePos;

/// Convert algebraic notation (for example: "e4") to a tile position.
pub fn algebraic_to_tile(square: &str) -> ChessResult<TilePos> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }

    let col = (file - b'a') as i8;
    let row = 7 - (rank - b'1') as i8;
    Ok(TilePos::new(row, col))
}

/// Convert a tile position to algebraic notation (for example: "e4").
#[inline]
pub fn tile_to_algebraic(pos: TilePos) -> String {
    pos.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a8", TilePos::new(0, 0); "top left")]
    #[test_case("h1", TilePos::new(7, 7); "bottom right")]
    #[test_case("e2", TilePos::new(6, 4); "white king pawn")]
    #[test_case("D5", TilePos::new(3, 3); "upper case file")]
    fn parses_coordinates(text: &str, expected: TilePos) {
        assert_eq!(algebraic_to_tile(text), Ok(expected));
    }

    #[test_case("i1"; "file past h")]
    #[test_case("a9"; "rank past 8")]
    #[test_case("e"; "too short")]
    #[test_case("e44"; "too long")]
    fn rejects_malformed_coordinates(text: &str) {
        assert_eq!(
            algebraic_to_tile(text),
            Err(ChessErrors::InvalidAlgebraicString(text.to_owned()))
        );
    }
}
