//! The 8x8 tile grid.
//!
//! Each tile holds at most one piece and one highlight state for drawing.
//! The board is the sole owner of piece placement: moves transfer pieces
//! between tiles with `take_piece` / `put_piece`, never duplicate them.

use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::BACK_ROW_LAYOUT;
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::game_state::piece::{Piece, PieceId};

/// Visual state of a tile, set by the selection logic and read by renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Default,
    Selected,
    Movable,
    Killable,
    Special,
    Check,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub piece: Option<Piece>,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Board {
    pub fn new_empty() -> Self {
        Self {
            tiles: [Tile::default(); 64],
        }
    }

    /// Standard 32-piece setup. Ids are assigned in row-major order, so a8 is 0
    /// and h1 is 31, matching the order a FEN placement is read in.
    pub fn standard() -> Self {
        let mut board = Self::new_empty();
        let mut next_id = 0u16;
        for pos in TilePos::all() {
            let kind = match pos.row {
                0 | 7 => BACK_ROW_LAYOUT[pos.col as usize],
                1 | 6 => PieceKind::Pawn,
                _ => continue,
            };
            let color = if pos.row < 4 { Color::Dark } else { Color::Light };
            board.tiles[pos.index()].piece = Some(Piece::new(PieceId(next_id), color, kind));
            next_id += 1;
        }
        board
    }

    #[inline]
    pub fn is_pos_valid(&self, pos: TilePos) -> bool {
        pos.is_valid()
    }

    pub fn get_tile(&self, pos: TilePos) -> ChessResult<&Tile> {
        if !pos.is_valid() {
            return Err(ChessErrors::OutOfBounds(pos));
        }
        Ok(&self.tiles[pos.index()])
    }

    pub fn get_tile_mut(&mut self, pos: TilePos) -> ChessResult<&mut Tile> {
        if !pos.is_valid() {
            return Err(ChessErrors::OutOfBounds(pos));
        }
        Ok(&mut self.tiles[pos.index()])
    }

    #[inline]
    pub fn piece_at(&self, pos: TilePos) -> ChessResult<Option<Piece>> {
        Ok(self.get_tile(pos)?.piece)
    }

    /// Remove and return whatever stands on `pos`.
    #[inline]
    pub fn take_piece(&mut self, pos: TilePos) -> ChessResult<Option<Piece>> {
        Ok(self.get_tile_mut(pos)?.piece.take())
    }

    /// Place `piece` on `pos`, replacing the previous occupant.
    #[inline]
    pub fn put_piece(&mut self, pos: TilePos, piece: Option<Piece>) -> ChessResult<()> {
        self.get_tile_mut(pos)?.piece = piece;
        Ok(())
    }

    /// All pieces with their tiles, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (TilePos, Piece)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(index, tile)| tile.piece.map(|p| (TilePos::from_index(index), p)))
    }

    /// Piece-to-tile mapping without highlight state.
    pub fn placement(&self) -> [Option<Piece>; 64] {
        let mut out = [None; 64];
        for (slot, tile) in out.iter_mut().zip(self.tiles.iter()) {
            *slot = tile.piece;
        }
        out
    }

    pub fn king_position(&self, color: Color) -> ChessResult<TilePos> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(pos, _)| pos)
            .ok_or(ChessErrors::PieceRegisterDoesNotContainAKing(color))
    }

    pub fn set_highlight(&mut self, pos: TilePos, highlight: Highlight) -> ChessResult<()> {
        self.get_tile_mut(pos)?.highlight = highlight;
        Ok(())
    }

    pub fn change_all_to_default(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.highlight = Highlight::Default;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_tile_rejects_positions_off_the_grid() {
        let board = Board::standard();
        for pos in [
            TilePos::new(-1, 0),
            TilePos::new(0, -1),
            TilePos::new(8, 0),
            TilePos::new(0, 8),
        ] {
            assert_eq!(board.get_tile(pos), Err(ChessErrors::OutOfBounds(pos)));
        }
        assert!(board.get_tile(TilePos::new(7, 7)).is_ok());
    }

    #[test]
    fn standard_setup_has_32_uniquely_identified_pieces() {
        let board = Board::standard();
        let mut ids: Vec<u16> = board.pieces().map(|(_, p)| p.id.0).collect();
        assert_eq!(ids.len(), 32);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);

        assert_eq!(board.king_position(Color::Light), Ok(TilePos::new(7, 4)));
        assert_eq!(board.king_position(Color::Dark), Ok(TilePos::new(0, 4)));
    }

    #[test]
    fn missing_king_is_reported() {
        let board = Board::new_empty();
        assert_eq!(
            board.king_position(Color::Dark),
            Err(ChessErrors::PieceRegisterDoesNotContainAKing(Color::Dark))
        );
    }

    #[test]
    fn highlights_do_not_touch_placement() {
        let mut board = Board::standard();
        let before = board.placement();
        board
            .set_highlight(TilePos::new(4, 4), Highlight::Movable)
            .expect("tile on board");
        assert_eq!(board.placement(), before);
        board.change_all_to_default();
        assert_eq!(board, Board::standard());
    }
}
