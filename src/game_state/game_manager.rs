//! Game state manager.
//!
//! Owns the board, the move history and the cached metrics of the position on
//! top of the history. `push_move` recomputes the metrics after applying a
//! move and stacks the previous ones; `pop_move` reverts the move and restores
//! the stacked metrics without recomputing anything. Search reuses one
//! manager across the whole tree through this pair.

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, info, trace};

use crate::game_state::board::{Board, Highlight};
use crate::game_state::castling_record::CastlingRecord;
use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Color, TilePos, TileSet};
use crate::game_state::metrics::{GameStatus, PositionMetrics, PreservedBoard};
use crate::game_state::piece::PieceId;
use crate::move_generation::legal_move_checks::attacked_positions;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::fen_parser::{parse_fen, PositionSetup};

#[derive(Debug, Clone)]
pub struct GameManager {
    board: Board,
    history: Vec<ChessMove>,
    metrics: PositionMetrics,
    metrics_stack: Vec<PositionMetrics>,
    castling: CastlingRecord,
    side_to_move: Color,
    status: GameStatus,
    preserved: Option<PreservedBoard>,
}

impl GameManager {
    /// Standard starting position, white to move.
    pub fn new_game() -> ChessResult<Self> {
        let board = Board::standard();
        let castling = CastlingRecord::from_board(&board, |_, _| true);
        Self::from_setup(PositionSetup {
            board,
            side_to_move: Color::Light,
            castling,
        })
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::from_setup(parse_fen(fen)?)
    }

    /// Start from an arbitrary position. Both kings must be present.
    pub fn from_setup(setup: PositionSetup) -> ChessResult<Self> {
        let mut manager = Self {
            board: setup.board,
            history: Vec::new(),
            metrics: PositionMetrics::default(),
            metrics_stack: Vec::new(),
            castling: setup.castling,
            side_to_move: setup.side_to_move,
            status: GameStatus::Active,
            preserved: None,
        };
        manager.recompute_metrics()?;
        Ok(manager)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Turn indicator for the drawing side.
    #[inline]
    pub fn black_turn(&self) -> bool {
        self.side_to_move == Color::Dark
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Cached legal moves for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> &[ChessMove] {
        &self.metrics.legal_moves
    }

    #[inline]
    pub fn metrics(&self) -> &PositionMetrics {
        &self.metrics
    }

    /// Legal moves of the piece on `pos`. Empty for empty tiles, enemy pieces
    /// and positions off the board.
    pub fn generate_moves(&self, pos: TilePos) -> Vec<ChessMove> {
        self.metrics
            .legal_moves
            .iter()
            .filter(|mv| mv.source() == pos)
            .copied()
            .collect()
    }

    /// Legal moves of the piece on `pos`, grouped by the tile that activates
    /// them. A promotion destination groups its four siblings.
    pub fn moves_by_destination(&self, pos: TilePos) -> BTreeMap<TilePos, Vec<ChessMove>> {
        let mut groups: BTreeMap<TilePos, Vec<ChessMove>> = BTreeMap::new();
        for mv in self.generate_moves(pos) {
            groups.entry(mv.activation_pos()).or_default().push(mv);
        }
        groups
    }

    /// Fresh legal-move generation for `color`, independent of the cache.
    ///
    /// For the side to move this equals `legal_moves()`.
    pub fn generate_all_moves(&mut self, color: Color) -> ChessResult<Vec<ChessMove>> {
        let last = self.history.last().copied();
        generate_legal_moves(&mut self.board, color, last.as_ref(), &self.castling)
    }

    /// Apply `mv`, which the caller guarantees is legal in the current position.
    pub fn push_move(&mut self, mv: ChessMove) -> ChessResult<()> {
        mv.execute(&mut self.board)?;
        trace!(%mv, "push");

        self.history.push(mv);
        self.metrics_stack.push(mem::take(&mut self.metrics));
        self.side_to_move = self.side_to_move.opposite();
        for piece in mv.moved_pieces() {
            self.castling.increment(piece.id);
        }

        self.recompute_metrics()?;
        match self.status {
            GameStatus::Checkmate { winner } => info!(%winner, plies = self.history.len(), "checkmate"),
            GameStatus::Stalemate => info!(plies = self.history.len(), "stalemate"),
            GameStatus::Active => {}
        }
        Ok(())
    }

    /// Revert the last pushed move and restore the metrics cached before it.
    pub fn pop_move(&mut self) -> ChessResult<ChessMove> {
        let mv = self.history.pop().ok_or(ChessErrors::NoMoveToPop)?;
        if let Err(err) = mv.undo(&mut self.board) {
            self.history.push(mv);
            return Err(err);
        }
        trace!(%mv, "pop");

        self.side_to_move = self.side_to_move.opposite();
        for piece in mv.moved_pieces() {
            self.castling.decrement(piece.id);
        }
        self.metrics = self.metrics_stack.pop().ok_or(ChessErrors::NoMoveToPop)?;
        self.status = GameStatus::Active;
        Ok(mv)
    }

    /// Tiles `color` could capture on in the current position.
    #[inline]
    pub fn attacked_positions(&self, color: Color) -> TileSet {
        self.metrics.attacked_by[color.index()]
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.metrics.in_check[color.index()]
    }

    pub fn get_king_position(&self, color: Color) -> ChessResult<TilePos> {
        self.board.king_position(color)
    }

    #[inline]
    pub fn history(&self) -> &[ChessMove] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&ChessMove> {
        self.history.last()
    }

    /// Recorded moves of a castling-tracked piece, `None` for untracked pieces.
    #[inline]
    pub fn castling_counter(&self, id: PieceId) -> Option<u32> {
        self.castling.count(id)
    }

    /// Snapshot the board and check flags for drawing while search runs.
    pub fn preserve_board(&mut self) {
        self.preserved = Some(PreservedBoard {
            board: self.board.clone(),
            in_check: self.metrics.in_check,
        });
    }

    pub fn release_preserved_board(&mut self) {
        self.preserved = None;
    }

    #[inline]
    pub fn is_board_preserved(&self) -> bool {
        self.preserved.is_some()
    }

    /// The preserved snapshot if one is held, else the live board.
    pub fn board_for_drawing(&self) -> &Board {
        self.preserved
            .as_ref()
            .map_or(&self.board, |snapshot| &snapshot.board)
    }

    pub fn in_check_for_drawing(&self) -> [bool; 2] {
        self.preserved
            .as_ref()
            .map_or(self.metrics.in_check, |snapshot| snapshot.in_check)
    }

    /// Clear every highlight and mark any king in check.
    pub fn reset_board_highlights(&mut self) -> ChessResult<()> {
        self.board.change_all_to_default();
        for color in [Color::Light, Color::Dark] {
            if self.metrics.in_check[color.index()] {
                let king = self.board.king_position(color)?;
                self.board.set_highlight(king, Highlight::Check)?;
            }
        }
        Ok(())
    }

    pub fn set_highlight(&mut self, pos: TilePos, highlight: Highlight) -> ChessResult<()> {
        self.board.set_highlight(pos, highlight)
    }

    fn recompute_metrics(&mut self) -> ChessResult<()> {
        let last = self.history.last().copied();
        let last = last.as_ref();

        let mut attacked_by = [TileSet::EMPTY; 2];
        let mut in_check = [false; 2];
        for color in [Color::Light, Color::Dark] {
            attacked_by[color.index()] = attacked_positions(&self.board, color, last)?;
        }
        for color in [Color::Light, Color::Dark] {
            let king = self.board.king_position(color)?;
            in_check[color.index()] = attacked_by[color.opposite().index()].contains(king);
        }

        let legal_moves =
            generate_legal_moves(&mut self.board, self.side_to_move, last, &self.castling)?;
        debug!(
            side = %self.side_to_move,
            count = legal_moves.len(),
            "legal moves recomputed"
        );

        self.status = GameStatus::classify(
            self.side_to_move,
            legal_moves.len(),
            in_check[self.side_to_move.index()],
        );
        self.metrics = PositionMetrics {
            attacked_by,
            in_check,
            legal_moves,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;
    use crate::moves::move_descriptions::find_long_algebraic;

    fn play(manager: &mut GameManager, lan: &str) -> ChessMove {
        let mv = *find_long_algebraic(manager.legal_moves(), lan)
            .unwrap_or_else(|| panic!("{lan} should be legal"));
        manager.push_move(mv).expect("push");
        mv
    }

    #[test]
    fn new_game_starts_active_with_twenty_moves() {
        let manager = GameManager::new_game().expect("new game");
        assert_eq!(manager.status(), GameStatus::Active);
        assert_eq!(manager.legal_moves().len(), 20);
        assert!(!manager.black_turn());
        assert_eq!(manager.get_king_position(Color::Dark), Ok(TilePos::new(0, 4)));
    }

    #[test]
    fn push_then_pop_restores_metrics_exactly() {
        let mut manager = GameManager::new_game().expect("new game");
        let board_before = manager.board().clone();
        let metrics_before = manager.metrics().clone();

        let mv = play(&mut manager, "e2e4");
        assert!(manager.black_turn());
        assert_eq!(manager.last_move(), Some(&mv));

        assert_eq!(manager.pop_move(), Ok(mv));
        assert_eq!(manager.board(), &board_before);
        assert_eq!(manager.metrics(), &metrics_before);
        assert!(!manager.black_turn());
        assert!(manager.history().is_empty());
    }

    #[test]
    fn pop_on_empty_history_fails() {
        let mut manager = GameManager::new_game().expect("new game");
        assert_eq!(manager.pop_move(), Err(ChessErrors::NoMoveToPop));
    }

    #[test]
    fn fools_mate_is_checkmate_and_pop_reactivates() {
        let mut manager = GameManager::new_game().expect("new game");
        for lan in ["f2f3", "e7e5", "g2g4"] {
            play(&mut manager, lan);
        }
        play(&mut manager, "d8h4");

        assert_eq!(
            manager.status(),
            GameStatus::Checkmate {
                winner: Color::Dark
            }
        );
        assert!(manager.is_game_over());
        assert!(manager.is_in_check(Color::Light));

        manager.pop_move().expect("pop");
        assert_eq!(manager.status(), GameStatus::Active);
        assert!(!manager.is_in_check(Color::Light));
    }

    #[test]
    fn stalemate_is_detected() {
        let manager = GameManager::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        assert_eq!(manager.status(), GameStatus::Stalemate);
        assert!(manager.legal_moves().is_empty());
    }

    #[test]
    fn moves_are_grouped_by_destination() {
        let manager = GameManager::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        let groups = manager.moves_by_destination(TilePos::new(1, 1));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&TilePos::new(0, 1)].len(), 4);
        assert!(manager.generate_moves(TilePos::new(4, 4)).is_empty());
        assert!(manager.generate_moves(TilePos::new(9, 9)).is_empty());
    }

    #[test]
    fn rook_round_trip_keeps_castling_disabled() {
        let mut manager =
            GameManager::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
        let rook = manager
            .board()
            .piece_at(TilePos::new(7, 7))
            .expect("on board")
            .expect("rook on h1");

        for lan in ["h1h2", "a8a7", "h2h1", "a7a8"] {
            play(&mut manager, lan);
        }
        assert_eq!(manager.castling_counter(rook.id), Some(2));
        assert!(find_long_algebraic(manager.legal_moves(), "e1g1").is_none());
        assert!(find_long_algebraic(manager.legal_moves(), "e1c1").is_some());
    }

    #[test]
    fn castling_increments_king_and_rook_then_pop_decrements_both() {
        let mut manager =
            GameManager::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
        let king = manager
            .board()
            .piece_at(TilePos::new(7, 4))
            .expect("on board")
            .expect("white king");
        let rook = manager
            .board()
            .piece_at(TilePos::new(7, 7))
            .expect("on board")
            .expect("rook on h1");

        let castle = play(&mut manager, "e1g1");
        assert!(castle.is_castling());
        assert_eq!(manager.castling_counter(king.id), Some(1));
        assert_eq!(manager.castling_counter(rook.id), Some(1));

        manager.pop_move().expect("pop");
        assert_eq!(manager.castling_counter(king.id), Some(0));
        assert_eq!(manager.castling_counter(rook.id), Some(0));
    }

    #[test]
    fn preserved_board_survives_live_mutation() {
        let mut manager = GameManager::new_game().expect("new game");
        manager.preserve_board();
        play(&mut manager, "d2d4");

        let snapshot = manager.board_for_drawing();
        assert!(snapshot
            .piece_at(TilePos::new(6, 3))
            .expect("on board")
            .is_some_and(|p| p.kind == PieceKind::Pawn));
        assert_ne!(manager.board_for_drawing(), manager.board());

        manager.release_preserved_board();
        assert_eq!(manager.board_for_drawing(), manager.board());
    }

    #[test]
    fn check_highlight_marks_the_attacked_king() {
        let mut manager = GameManager::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("fen");
        assert!(manager.is_in_check(Color::Light));
        manager.reset_board_highlights().expect("highlights");
        let tile = manager.board().get_tile(TilePos::new(7, 4)).expect("on board");
        assert_eq!(tile.highlight, Highlight::Check);
    }
}
