//! Piece model: identity, color, kind and movement bases.

use std::fmt;

use crate::game_state::chess_rules::{MAX_SLIDE, PROMOTED_ID_BASE};
use crate::game_state::chess_types::{Color, PieceKind, TilePos, PROMOTION_KINDS};

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (-2, -1),
    (-2, 1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Stable identity of one physical piece, independent of the tile it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u16);

/// Whether a movement basis may end on an enemy piece.
///
/// Numerically this is the kill level: 0 never, 1 may, 2 must.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRule {
    Never,
    May,
    Must,
}

impl CaptureRule {
    #[inline]
    pub const fn kill_level(self) -> u8 {
        match self {
            CaptureRule::Never => 0,
            CaptureRule::May => 1,
            CaptureRule::Must => 2,
        }
    }

    #[inline]
    pub const fn allows_capture(self) -> bool {
        self.kill_level() >= 1
    }
}

/// One line of possible motion: a direction, a maximum step count and a capture rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementBasis {
    pub direction: (i8, i8),
    pub max_steps: u8,
    pub capture: CaptureRule,
}

impl MovementBasis {
    #[inline]
    pub const fn new(direction: (i8, i8), max_steps: u8, capture: CaptureRule) -> Self {
        Self {
            direction,
            max_steps,
            capture,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(id: PieceId, color: Color, kind: PieceKind) -> Self {
        Self { id, color, kind }
    }

    /// Movement bases of this piece when standing on `pos`.
    ///
    /// Pawns advance two tiles from their starting row, otherwise one, and
    /// capture only along the two forward diagonals.
    pub fn movement_bases(&self, pos: TilePos) -> Vec<MovementBasis> {
        match self.kind {
            PieceKind::King => ORTHOGONALS
                .iter()
                .chain(DIAGONALS.iter())
                .map(|&d| MovementBasis::new(d, 1, CaptureRule::May))
                .collect(),
            PieceKind::Queen => ORTHOGONALS
                .iter()
                .chain(DIAGONALS.iter())
                .map(|&d| MovementBasis::new(d, MAX_SLIDE, CaptureRule::May))
                .collect(),
            PieceKind::Rook => ORTHOGONALS
                .iter()
                .map(|&d| MovementBasis::new(d, MAX_SLIDE, CaptureRule::May))
                .collect(),
            PieceKind::Bishop => DIAGONALS
                .iter()
                .map(|&d| MovementBasis::new(d, MAX_SLIDE, CaptureRule::May))
                .collect(),
            PieceKind::Knight => KNIGHT_JUMPS
                .iter()
                .map(|&d| MovementBasis::new(d, 1, CaptureRule::May))
                .collect(),
            PieceKind::Pawn => {
                let forward = self.color.forward();
                let reach = if pos.row == self.color.pawn_row() { 2 } else { 1 };
                vec![
                    MovementBasis::new((forward, 0), reach, CaptureRule::Never),
                    MovementBasis::new((forward, 1), 1, CaptureRule::Must),
                    MovementBasis::new((forward, -1), 1, CaptureRule::Must),
                ]
            }
        }
    }

    /// Replacement piece this pawn turns into when promoting to `kind`.
    ///
    /// The id is derived from the pawn's id and the kind, so every generation
    /// pass builds an identical replacement.
    pub fn promoted(&self, kind: PieceKind) -> Piece {
        let slot = PROMOTION_KINDS
            .iter()
            .position(|&k| k == kind)
            .unwrap_or(0) as u16;
        Piece::new(
            PieceId(PROMOTED_ID_BASE + self.id.0 * PROMOTION_KINDS.len() as u16 + slot),
            self.color,
            kind,
        )
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.color {
            Color::Light => write!(f, "{letter}"),
            Color::Dark => write!(f, "{}", letter.to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_on_start_row_reaches_two_tiles() {
        let pawn = Piece::new(PieceId(8), Color::Light, PieceKind::Pawn);
        let bases = pawn.movement_bases(TilePos::new(6, 3));
        assert_eq!(bases[0], MovementBasis::new((-1, 0), 2, CaptureRule::Never));
        assert_eq!(bases[1].capture, CaptureRule::Must);
        assert_eq!(bases[2].capture, CaptureRule::Must);

        let advanced = pawn.movement_bases(TilePos::new(5, 3));
        assert_eq!(advanced[0].max_steps, 1);
    }

    #[test]
    fn dark_pawns_move_down_the_rows() {
        let pawn = Piece::new(PieceId(24), Color::Dark, PieceKind::Pawn);
        let bases = pawn.movement_bases(TilePos::new(1, 0));
        assert_eq!(bases[0].direction, (1, 0));
        assert_eq!(bases[0].max_steps, 2);
    }

    #[test]
    fn promotion_ids_are_distinct_per_kind_and_stable() {
        let pawn = Piece::new(PieceId(9), Color::Light, PieceKind::Pawn);
        let ids: Vec<PieceId> = PROMOTION_KINDS.iter().map(|&k| pawn.promoted(k).id).collect();
        assert_eq!(ids.len(), 4);
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(pawn.promoted(PieceKind::Queen), pawn.promoted(PieceKind::Queen));
    }

    #[test]
    fn sliders_have_full_reach() {
        let queen = Piece::new(PieceId(3), Color::Dark, PieceKind::Queen);
        let bases = queen.movement_bases(TilePos::new(0, 3));
        assert_eq!(bases.len(), 8);
        assert!(bases.iter().all(|b| b.max_steps == MAX_SLIDE));
    }
}
