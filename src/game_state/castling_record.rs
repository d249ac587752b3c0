//! Per-piece move counters for castling rights.
//!
//! Only the king and the two rooks of each color that start on their home
//! tiles are tracked. Counters are keyed by piece id, so a rook that leaves
//! and returns to its corner still counts as moved, and a different rook
//! arriving on the corner is never tracked at all.

use std::collections::HashMap;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::piece::PieceId;
use crate::moves::move_descriptions::{castling_squares, CastleSide, CASTLE_SIDES};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastlingRecord {
    counts: HashMap<PieceId, u32>,
}

impl CastlingRecord {
    /// Track every home-tile king and rook on `board`. Pieces whose right is
    /// withheld by `has_right` start with one recorded move.
    pub fn from_board<F>(board: &Board, has_right: F) -> Self
    where
        F: Fn(Color, CastleSide) -> bool,
    {
        let mut record = Self::default();
        for color in [Color::Light, Color::Dark] {
            let mut any_right = false;
            for side in CASTLE_SIDES {
                let squares = castling_squares(color, side);
                let right = has_right(color, side);
                any_right |= right;
                if let Ok(Some(rook)) = board.piece_at(squares.rook_from) {
                    if rook.color == color && rook.kind == PieceKind::Rook {
                        record.track(rook.id, u32::from(!right));
                    }
                }
            }

            let king_home = castling_squares(color, CastleSide::KingSide).king_from;
            if let Ok(Some(king)) = board.piece_at(king_home) {
                if king.color == color && king.kind == PieceKind::King {
                    record.track(king.id, u32::from(!any_right));
                }
            }
        }
        record
    }

    pub fn track(&mut self, id: PieceId, initial: u32) {
        self.counts.insert(id, initial);
    }

    #[inline]
    pub fn count(&self, id: PieceId) -> Option<u32> {
        self.counts.get(&id).copied()
    }

    /// Tracked and never moved.
    #[inline]
    pub fn is_unmoved(&self, id: PieceId) -> bool {
        self.count(id) == Some(0)
    }

    pub fn increment(&mut self, id: PieceId) {
        if let Some(count) = self.counts.get_mut(&id) {
            *count += 1;
        }
    }

    pub fn decrement(&mut self, id: PieceId) {
        if let Some(count) = self.counts.get_mut(&id) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::TilePos;

    #[test]
    fn standard_board_tracks_six_pieces() {
        let board = Board::standard();
        let record = CastlingRecord::from_board(&board, |_, _| true);
        let tracked: Vec<PieceId> = board
            .pieces()
            .filter(|(_, p)| record.count(p.id).is_some())
            .map(|(_, p)| p.id)
            .collect();
        assert_eq!(tracked.len(), 6);
        assert!(tracked.iter().all(|id| record.is_unmoved(*id)));
    }

    #[test]
    fn withheld_right_marks_rook_as_moved() {
        let board = Board::standard();
        let record = CastlingRecord::from_board(&board, |color, side| {
            !(color == Color::Light && side == CastleSide::QueenSide)
        });
        let a1_rook = board
            .piece_at(TilePos::new(7, 0))
            .expect("on board")
            .expect("rook on a1");
        let h1_rook = board
            .piece_at(TilePos::new(7, 7))
            .expect("on board")
            .expect("rook on h1");
        assert_eq!(record.count(a1_rook.id), Some(1));
        assert!(record.is_unmoved(h1_rook.id));
    }

    #[test]
    fn untracked_pieces_are_ignored() {
        let mut record = CastlingRecord::default();
        record.increment(PieceId(5));
        assert_eq!(record.count(PieceId(5)), None);
        assert!(!record.is_unmoved(PieceId(5)));
    }
}
