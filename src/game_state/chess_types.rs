//! Primitive value types shared by every subsystem.
//!
//! Colors, piece kinds, tile coordinates and the small tile bitset used for
//! attacked-position caches live here so that board, move and search code can
//! agree on one vocabulary.

use std::fmt;

/// Side color. `Light` moves first and starts on rows 6 and 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a pawn advance for this color.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row holding this color's king and rooks at game start.
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Row holding this color's pawns at game start.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.opposite().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "white"),
            Color::Dark => write!(f, "black"),
        }
    }
}

/// Piece kind (color is stored separately on the piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Letter used in move notation. Pawns use `P`.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Kinds a pawn may be replaced with, in the order promotion candidates are emitted.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A tile coordinate. Valid tiles have `row` and `col` in `0..=7`; row 0 is
/// rank 8 (Dark's back rank) and col 0 is file a.
///
/// Out-of-board values are representable so that ray walks and pixel mapping
/// can produce them; `Board::get_tile` rejects them with a bounds error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub row: i8,
    pub col: i8,
}

impl TilePos {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        0 <= self.row && self.row <= 7 && 0 <= self.col && self.col <= 7
    }

    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Linear index `row * 8 + col`. Only meaningful for valid tiles.
    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 8) as i8,
            col: (index % 8) as i8,
        }
    }

    /// Iterate all 64 tiles in row-major order.
    pub fn all() -> impl Iterator<Item = TilePos> {
        (0..64).map(TilePos::from_index)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            let file = char::from(b'a' + self.col as u8);
            let rank = 8 - self.row;
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Set of tiles packed into a `u64`, bit `row * 8 + col`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileSet(u64);

impl TileSet {
    pub const EMPTY: TileSet = TileSet(0);

    #[inline]
    pub fn insert(&mut self, pos: TilePos) {
        if pos.is_valid() {
            self.0 |= 1u64 << pos.index();
        }
    }

    #[inline]
    pub fn contains(self, pos: TilePos) -> bool {
        pos.is_valid() && (self.0 >> pos.index()) & 1 == 1
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TilePos> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(TilePos::from_index(index))
        })
    }
}

impl FromIterator<TilePos> for TileSet {
    fn from_iter<I: IntoIterator<Item = TilePos>>(iter: I) -> Self {
        let mut set = TileSet::EMPTY;
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_display_uses_rank_eight_at_row_zero() {
        assert_eq!(TilePos::new(0, 0).to_string(), "a8");
        assert_eq!(TilePos::new(7, 4).to_string(), "e1");
        assert_eq!(TilePos::new(4, 4).to_string(), "e4");
        assert_eq!(TilePos::new(8, 0).to_string(), "(8, 0)");
    }

    #[test]
    fn tile_set_ignores_out_of_board_tiles() {
        let mut set = TileSet::EMPTY;
        set.insert(TilePos::new(-1, 3));
        set.insert(TilePos::new(3, 8));
        set.insert(TilePos::new(3, 3));
        assert_eq!(set.len(), 1);
        assert!(set.contains(TilePos::new(3, 3)));
        assert!(!set.contains(TilePos::new(-1, 3)));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![TilePos::new(3, 3)]);
    }

    #[test]
    fn promotion_row_is_opponent_back_row() {
        assert_eq!(Color::Light.promotion_row(), 0);
        assert_eq!(Color::Dark.promotion_row(), 7);
    }
}
