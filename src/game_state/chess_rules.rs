//! Canonical chess-rule constants.
//!
//! Standard starting layout, castling geometry and the deterministic id scheme
//! for pieces created during the game.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-row layout from file a to file h.
pub const BACK_ROW_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_COL: i8 = 4;
pub const QUEEN_SIDE_ROOK_COL: i8 = 0;
pub const KING_SIDE_ROOK_COL: i8 = 7;

/// Ids at or above this value belong to promotion replacements.
pub const PROMOTED_ID_BASE: u16 = 64;

/// Maximum reach of sliding pieces on an 8x8 board.
pub const MAX_SLIDE: u8 = 7;
