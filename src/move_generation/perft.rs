//! Move-path enumeration for rules regression.
//!
//! Walks the game tree purely through `push_move` / `pop_move`, so every count
//! also exercises the metrics cache stack.

use crate::game_state::chess_errors::ChessResult;
use crate::game_state::game_manager::GameManager;
use crate::game_state::metrics::GameStatus;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_descriptions::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &ChessMove, manager: &GameManager) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castling() {
            self.castles += 1;
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }
        if manager.is_in_check(manager.side_to_move()) {
            self.checks += 1;
        }
        if matches!(manager.status(), GameStatus::Checkmate { .. }) {
            self.checkmates += 1;
        }
    }
}

/// Count leaf positions `depth` plies below the current one.
///
/// The manager is returned to its starting position on success.
pub fn perft(manager: &mut GameManager, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    let moves = manager.legal_moves().to_vec();
    for mv in moves {
        perft_recurse(manager, mv, depth, &mut total)?;
    }
    Ok(total)
}

/// Node counts below each root move, keyed by its long algebraic form.
pub fn perft_divide(manager: &mut GameManager, depth: u8) -> ChessResult<Vec<(String, usize)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    let moves = manager.legal_moves().to_vec();
    for mv in moves {
        let mut local = PerftCounts::default();
        perft_recurse(manager, mv, depth, &mut local)?;
        out.push((move_to_long_algebraic(&mv), local.nodes));
    }
    Ok(out)
}

fn perft_recurse(
    manager: &mut GameManager,
    mv: ChessMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    manager.push_move(mv)?;

    if remaining == 1 {
        counts.record_leaf(&mv, manager);
    } else {
        let mut local = PerftCounts::default();
        let children = manager.legal_moves().to_vec();
        for child in children {
            perft_recurse(manager, child, remaining - 1, &mut local)?;
        }
        counts.merge(local);
    }

    manager.pop_move()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use test_case::test_case;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const PROMOTIONS: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    const SYMMETRIC: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    #[test_case(STARTING_POSITION_FEN, 1, 20; "start depth 1")]
    #[test_case(STARTING_POSITION_FEN, 2, 400; "start depth 2")]
    #[test_case(STARTING_POSITION_FEN, 3, 8_902; "start depth 3")]
    #[test_case(KIWIPETE, 1, 48; "kiwipete depth 1")]
    #[test_case(KIWIPETE, 2, 2_039; "kiwipete depth 2")]
    #[test_case(ENDGAME, 1, 14; "endgame depth 1")]
    #[test_case(ENDGAME, 2, 191; "endgame depth 2")]
    #[test_case(ENDGAME, 3, 2_812; "endgame depth 3")]
    #[test_case(PROMOTIONS, 1, 6; "promotions depth 1")]
    #[test_case(PROMOTIONS, 2, 264; "promotions depth 2")]
    #[test_case(TALKCHESS, 1, 44; "talkchess depth 1")]
    #[test_case(TALKCHESS, 2, 1_486; "talkchess depth 2")]
    #[test_case(SYMMETRIC, 1, 46; "symmetric depth 1")]
    #[test_case(SYMMETRIC, 2, 2_079; "symmetric depth 2")]
    fn node_counts_match_published_values(fen: &str, depth: u8, nodes: usize) {
        let mut manager = GameManager::from_fen(fen).expect("fen should parse");
        let counts = perft(&mut manager, depth).expect("perft");
        assert_eq!(counts.nodes, nodes);
        assert!(manager.history().is_empty());
    }

    #[test]
    fn kiwipete_depth_two_breakdown() {
        let mut manager = GameManager::from_fen(KIWIPETE).expect("fen should parse");
        let counts = perft(&mut manager, 2).expect("perft");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn endgame_depth_three_breakdown() {
        let mut manager = GameManager::from_fen(ENDGAME).expect("fen should parse");
        let counts = perft(&mut manager, 3).expect("perft");
        assert_eq!(counts.captures, 209);
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.checks, 267);
    }

    #[test]
    fn start_depth_three_breakdown() {
        let mut manager = GameManager::new_game().expect("new game");
        let counts = perft(&mut manager, 3).expect("perft");
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut manager = GameManager::new_game().expect("new game");
        let divide = perft_divide(&mut manager, 2).expect("divide");
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }

    #[test]
    fn depth_zero_counts_the_root() {
        let mut manager = GameManager::new_game().expect("new game");
        assert_eq!(perft(&mut manager, 0).expect("perft").nodes, 1);
    }
}
