//! Pluggable board evaluation.
//!
//! Scores are absolute rather than side-relative: positive values favor Dark,
//! the maximizing color in search.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::game_state::game_manager::GameManager;
use crate::game_state::metrics::GameStatus;

pub trait BoardScorer: Send + Sync {
    fn score(&self, manager: &GameManager) -> f64;
}

/// Sign applied to a color's contributions.
#[inline]
pub fn color_sign(color: Color) -> f64 {
    match color {
        Color::Dark => 1.0,
        Color::Light => -1.0,
    }
}

/// Score of a decided game: infinite in favor of the mating side, `None` otherwise.
#[inline]
pub fn terminal_score(status: GameStatus) -> Option<f64> {
    match status {
        GameStatus::Checkmate { winner } => Some(color_sign(winner) * f64::INFINITY),
        GameStatus::Stalemate | GameStatus::Active => None,
    }
}

/// Plain material balance. Kings carry no material value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> f64 {
        match kind {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight => 3.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 0.0,
        }
    }

    pub fn material_balance(board: &Board) -> f64 {
        board
            .pieces()
            .map(|(_, p)| color_sign(p.color) * Self::piece_value(p.kind))
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, manager: &GameManager) -> f64 {
        terminal_score(manager.status())
            .unwrap_or_else(|| Self::material_balance(manager.board()))
    }
}

/// Material scaled by closeness to the board center.
///
/// Each piece is worth `value * (1 + 0.02 * (5 - d))`, where `d` is the
/// Euclidean distance of its tile from the center point (3.5, 3.5).
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralityMaterialScorer;

impl CentralityMaterialScorer {
    pub const CENTER: f64 = 3.5;
    pub const CENTRALITY_WEIGHT: f64 = 0.02;
    pub const CENTRALITY_PIVOT: f64 = 5.0;

    #[inline]
    pub fn distance_to_center(pos: TilePos) -> f64 {
        let dr = f64::from(pos.row) - Self::CENTER;
        let dc = f64::from(pos.col) - Self::CENTER;
        (dr * dr + dc * dc).sqrt()
    }

    #[inline]
    pub fn centrality_factor(pos: TilePos) -> f64 {
        1.0 + Self::CENTRALITY_WEIGHT * (Self::CENTRALITY_PIVOT - Self::distance_to_center(pos))
    }

    pub fn board_fitness(board: &Board) -> f64 {
        board
            .pieces()
            .map(|(pos, p)| {
                color_sign(p.color) * MaterialScorer::piece_value(p.kind) * Self::centrality_factor(pos)
            })
            .sum()
    }
}

impl BoardScorer for CentralityMaterialScorer {
    fn score(&self, manager: &GameManager) -> f64 {
        terminal_score(manager.status()).unwrap_or_else(|| Self::board_fitness(manager.board()))
    }
}
