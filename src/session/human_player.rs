//! Click-driven move selection for a human seat.
//!
//! A click on one of the player's pieces selects it and highlights every
//! destination. A following click on a destination with a single move plays
//! it; a destination holding the four promotion siblings switches to
//! promotion selection, completed by choosing a replacement kind. Any other
//! click drops the selection.

use std::collections::BTreeMap;

use crossbeam_channel::Receiver;
use tracing::debug;

use crate::game_state::board::Highlight;
use crate::game_state::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Color, PieceKind, TilePos};
use crate::moves::chess_move::ChessMove;
use crate::session::shared_game::SharedGame;

/// Tile under a pixel coordinate, `x` to the right and `y` downwards.
///
/// The result may lie outside the board for pixels beyond it.
pub fn pixel_to_tile(x: u32, y: u32, tile_size: u32) -> TilePos {
    let tile_size = tile_size.max(1);
    let clamp = |v: u32| i8::try_from(v / tile_size).unwrap_or(i8::MAX);
    TilePos::new(clamp(y), clamp(x))
}

/// Input delivered to a human seat by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickInput {
    Pixel { x: u32, y: u32 },
    Promote(PieceKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not this player's turn, the game is over, or the click had no effect.
    Ignored,
    Selected { from: TilePos, destinations: usize },
    Deselected,
    AwaitingPromotion { to: TilePos },
    Moved(ChessMove),
}

#[derive(Debug, Clone, Default)]
enum Selection {
    #[default]
    Idle,
    Piece {
        groups: BTreeMap<TilePos, Vec<ChessMove>>,
    },
    Promotion {
        moves: Vec<ChessMove>,
    },
}

#[derive(Debug)]
pub struct HumanPlayer {
    color: Color,
    tile_size: u32,
    selection: Selection,
    clicks: Option<Receiver<ClickInput>>,
}

impl HumanPlayer {
    pub fn new(color: Color, tile_size: u32) -> Self {
        Self {
            color,
            tile_size,
            selection: Selection::Idle,
            clicks: None,
        }
    }

    /// Seat fed by a channel of clicks, for use under a turn scheduler.
    pub fn with_clicks(color: Color, tile_size: u32, clicks: Receiver<ClickInput>) -> Self {
        Self {
            clicks: Some(clicks),
            ..Self::new(color, tile_size)
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn is_selecting_promotion(&self) -> bool {
        matches!(self.selection, Selection::Promotion { .. })
    }

    fn is_my_turn(&self, game: &SharedGame) -> bool {
        !game.is_game_over() && game.side_to_move() == self.color
    }

    /// Handle a click at pixel `(x, y)`.
    pub fn on_click(&mut self, game: &SharedGame, x: u32, y: u32) -> ChessResult<ClickOutcome> {
        let pos = pixel_to_tile(x, y, self.tile_size);
        game.transaction(|g| self.on_tile_clicked(g, pos))
    }

    /// Handle a click on `pos`. Positions off the board count as empty tiles.
    pub fn on_tile_clicked(&mut self, game: &SharedGame, pos: TilePos) -> ChessResult<ClickOutcome> {
        game.transaction(|g| {
            if !self.is_my_turn(g) {
                return Ok(ClickOutcome::Ignored);
            }

            match std::mem::take(&mut self.selection) {
                // Board clicks wait until a replacement kind is chosen.
                pending @ Selection::Promotion { .. } => {
                    self.selection = pending;
                    Ok(ClickOutcome::Ignored)
                }
                Selection::Piece { mut groups } => {
                    g.reset_board_highlights()?;
                    match groups.remove(&pos) {
                        None => Ok(ClickOutcome::Deselected),
                        Some(mut moves) if moves.len() == 1 => {
                            let mv = moves.remove(0);
                            g.push_move(mv)?;
                            debug!(%mv, "human move");
                            Ok(ClickOutcome::Moved(mv))
                        }
                        Some(moves) if moves.len() == 4 => {
                            self.selection = Selection::Promotion { moves };
                            Ok(ClickOutcome::AwaitingPromotion { to: pos })
                        }
                        Some(moves) => Err(ChessErrors::InvalidSelectionGroup(moves.len())),
                    }
                }
                Selection::Idle => {
                    g.reset_board_highlights()?;
                    self.select(g, pos)
                }
            }
        })
    }

    fn select(&mut self, game: &SharedGame, pos: TilePos) -> ChessResult<ClickOutcome> {
        let own_piece = game
            .piece_at(pos)
            .ok()
            .flatten()
            .is_some_and(|p| p.color == self.color);
        if !own_piece {
            return Ok(ClickOutcome::Ignored);
        }

        let groups = game.moves_by_destination(pos);
        game.set_highlight(pos, Highlight::Selected)?;
        for (to, moves) in &groups {
            if let Some(first) = moves.first() {
                game.set_highlight(*to, first.highlight())?;
            }
        }

        let destinations = groups.len();
        self.selection = Selection::Piece { groups };
        Ok(ClickOutcome::Selected {
            from: pos,
            destinations,
        })
    }

    /// Complete a pending promotion with the replacement `kind`.
    pub fn choose_promotion(&mut self, game: &SharedGame, kind: PieceKind) -> ChessResult<ClickOutcome> {
        game.transaction(|g| {
            let Selection::Promotion { moves } = &self.selection else {
                return Ok(ClickOutcome::Ignored);
            };
            if !self.is_my_turn(g) {
                return Ok(ClickOutcome::Ignored);
            }

            let mv = *moves
                .iter()
                .find(|m| m.replacement().is_some_and(|r| r.kind == kind))
                .ok_or(ChessErrors::PromotionMoveNotFound(kind))?;
            self.selection = Selection::Idle;
            g.reset_board_highlights()?;
            g.push_move(mv)?;
            debug!(%mv, "human promotion");
            Ok(ClickOutcome::Moved(mv))
        })
    }

    /// Consume clicks from the seat's channel until a move is played.
    ///
    /// Returns `None` when the game is already decided.
    pub fn play_turn(&mut self, game: &SharedGame) -> ChessResult<Option<ChessMove>> {
        let clicks = self
            .clicks
            .clone()
            .ok_or_else(|| ChessErrors::TurnHandOff("human seat has no click source".to_owned()))?;

        while self.is_my_turn(game) {
            let input = clicks
                .recv()
                .map_err(|_| ChessErrors::TurnHandOff("click channel closed".to_owned()))?;
            let outcome = match input {
                ClickInput::Pixel { x, y } => self.on_click(game, x, y)?,
                ClickInput::Promote(kind) => self.choose_promotion(game, kind)?,
            };
            if let ClickOutcome::Moved(mv) = outcome {
                return Ok(Some(mv));
            }
        }
        Ok(None)
    }
}
