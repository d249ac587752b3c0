//! Thread-shared handle to one game.
//!
//! Every call takes the reentrant lock for the duration of a single manager
//! operation. Search recursion and the click handler may re-enter the lock on
//! the thread that already holds it; other threads wait at most one
//! generation, push or pop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::game_state::board::{Board, Highlight};
use crate::game_state::chess_errors::ChessResult;
use crate::game_state::chess_types::{Color, TilePos};
use crate::game_state::game_manager::GameManager;
use crate::game_state::metrics::GameStatus;
use crate::game_state::piece::Piece;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::BoardScorer;
use crate::search::search_state::SearchState;

#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<ReentrantMutex<RefCell<GameManager>>>,
}

/// Board and check flags copied out for a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSnapshot {
    pub board: Board,
    pub in_check: [bool; 2],
    pub black_turn: bool,
}

impl SharedGame {
    pub fn new(manager: GameManager) -> Self {
        Self {
            inner: Arc::new(ReentrantMutex::new(RefCell::new(manager))),
        }
    }

    pub fn new_game() -> ChessResult<Self> {
        Ok(Self::new(GameManager::new_game()?))
    }

    /// Read access for one operation.
    pub fn with<R>(&self, f: impl FnOnce(&GameManager) -> R) -> R {
        let guard = self.inner.lock();
        let manager = guard.borrow();
        f(&manager)
    }

    /// Write access for one operation. `f` must not call back into this handle.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut GameManager) -> R) -> R {
        let guard = self.inner.lock();
        let mut manager = guard.borrow_mut();
        f(&mut manager)
    }

    /// Hold the lock across several calls on this handle.
    ///
    /// Other threads are excluded until `f` returns; calls made by `f` on the
    /// same thread re-enter the lock.
    pub fn transaction<R>(&self, f: impl FnOnce(&SharedGame) -> R) -> R {
        let _guard = self.inner.lock();
        f(self)
    }

    pub fn side_to_move(&self) -> Color {
        self.with(GameManager::side_to_move)
    }

    pub fn black_turn(&self) -> bool {
        self.with(GameManager::black_turn)
    }

    pub fn status(&self) -> GameStatus {
        self.with(GameManager::status)
    }

    pub fn is_game_over(&self) -> bool {
        self.with(GameManager::is_game_over)
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        self.with(|m| m.legal_moves().to_vec())
    }

    pub fn generate_moves(&self, pos: TilePos) -> Vec<ChessMove> {
        self.with(|m| m.generate_moves(pos))
    }

    pub fn moves_by_destination(&self, pos: TilePos) -> BTreeMap<TilePos, Vec<ChessMove>> {
        self.with(|m| m.moves_by_destination(pos))
    }

    pub fn push_move(&self, mv: ChessMove) -> ChessResult<()> {
        self.with_mut(|m| m.push_move(mv))
    }

    pub fn pop_move(&self) -> ChessResult<ChessMove> {
        self.with_mut(GameManager::pop_move)
    }

    pub fn get_king_position(&self, color: Color) -> ChessResult<TilePos> {
        self.with(|m| m.get_king_position(color))
    }

    pub fn history(&self) -> Vec<ChessMove> {
        self.with(|m| m.history().to_vec())
    }

    pub fn ply_count(&self) -> usize {
        self.with(|m| m.history().len())
    }

    pub fn piece_at(&self, pos: TilePos) -> ChessResult<Option<Piece>> {
        self.with(|m| m.board().piece_at(pos))
    }

    pub fn preserve_board(&self) {
        self.with_mut(GameManager::preserve_board);
    }

    pub fn release_preserved_board(&self) {
        self.with_mut(GameManager::release_preserved_board);
    }

    /// Stable copy of what should be drawn, preferring a preserved board.
    pub fn draw_snapshot(&self) -> DrawSnapshot {
        self.with(|m| DrawSnapshot {
            board: m.board_for_drawing().clone(),
            in_check: m.in_check_for_drawing(),
            black_turn: m.black_turn(),
        })
    }

    pub fn reset_board_highlights(&self) -> ChessResult<()> {
        self.with_mut(GameManager::reset_board_highlights)
    }

    pub fn set_highlight(&self, pos: TilePos, highlight: Highlight) -> ChessResult<()> {
        self.with_mut(|m| m.set_highlight(pos, highlight))
    }
}

impl SearchState for SharedGame {
    fn side_to_move(&self) -> Color {
        SharedGame::side_to_move(self)
    }

    fn status(&self) -> GameStatus {
        SharedGame::status(self)
    }

    fn legal_moves(&self) -> Vec<ChessMove> {
        SharedGame::legal_moves(self)
    }

    fn evaluate<S: BoardScorer + ?Sized>(&self, scorer: &S) -> f64 {
        self.with(|m| scorer.score(m))
    }

    fn push_move(&mut self, mv: ChessMove) -> ChessResult<()> {
        SharedGame::push_move(self, mv)
    }

    fn pop_move(&mut self) -> ChessResult<ChessMove> {
        SharedGame::pop_move(self)
    }
}
