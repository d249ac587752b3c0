//! Exhaustive fixed-depth minimax over push/pop.

use tracing::debug;

use crate::game_state::chess_errors::ChessResult;
use crate::search::board_scoring::BoardScorer;
use crate::search::search_state::{is_maximizing, SearchResult, SearchState};

/// Best move for the side to move, searching `depth` plies.
///
/// Ties keep the earliest move in generation order.
pub fn minimax_search<T, S>(state: &mut T, scorer: &S, depth: u8) -> ChessResult<SearchResult>
where
    T: SearchState,
    S: BoardScorer + ?Sized,
{
    let mut nodes = 1u64;
    if depth == 0 || state.status().is_terminal() {
        return Ok(SearchResult {
            best_move: None,
            score: state.evaluate(scorer),
            nodes,
        });
    }

    let maximizing = is_maximizing(state.side_to_move());
    let mut best_move = None;
    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in state.legal_moves() {
        state.push_move(mv)?;
        let score = minimax(state, scorer, depth - 1, &mut nodes);
        state.pop_move()?;
        let score = score?;

        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if best_move.is_none() || improves {
            best_move = Some(mv);
            best_score = score;
        }
    }

    debug!(depth, score = best_score, nodes, best = ?best_move.map(|m| m.to_string()), "minimax finished");
    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes,
    })
}

fn minimax<T, S>(state: &mut T, scorer: &S, depth: u8, nodes: &mut u64) -> ChessResult<f64>
where
    T: SearchState,
    S: BoardScorer + ?Sized,
{
    *nodes += 1;
    if depth == 0 || state.status().is_terminal() {
        return Ok(state.evaluate(scorer));
    }

    let maximizing = is_maximizing(state.side_to_move());
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in state.legal_moves() {
        state.push_move(mv)?;
        let score = minimax(state, scorer, depth - 1, nodes);
        state.pop_move()?;
        let score = score?;
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_manager::GameManager;
    use crate::moves::move_descriptions::move_to_long_algebraic;
    use crate::search::board_scoring::{CentralityMaterialScorer, MaterialScorer};
    use test_case::test_case;

    #[test]
    fn depth_zero_only_evaluates() {
        let mut manager = GameManager::new_game().expect("new game");
        let result = minimax_search(&mut manager, &MaterialScorer, 0).expect("search");
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
        assert_eq!(result.score, 0.0);
    }

    #[test_case(1; "depth 1")]
    #[test_case(2; "depth 2")]
    fn equal_scores_keep_the_first_generated_move(depth: u8) {
        let mut manager = GameManager::new_game().expect("new game");
        let first = manager.legal_moves()[0];
        let result = minimax_search(&mut manager, &MaterialScorer, depth).expect("search");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.best_move, Some(first));
    }

    #[test]
    fn takes_a_hanging_queen() {
        let mut manager = GameManager::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("fen");
        let result = minimax_search(&mut manager, &MaterialScorer, 1).expect("search");
        let best = result.best_move.expect("a move");
        assert_eq!(move_to_long_algebraic(&best), "d2d5");
        assert_eq!(result.score, -5.0);
    }

    #[test]
    fn finds_mate_in_one_for_dark() {
        let mut manager =
            GameManager::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .expect("fen");
        let history_before = manager.history().len();
        let result = minimax_search(&mut manager, &CentralityMaterialScorer, 1).expect("search");
        assert_eq!(result.score, f64::INFINITY);
        assert_eq!(
            result.best_move.map(|m| move_to_long_algebraic(&m)),
            Some("d8h4".to_owned())
        );
        assert_eq!(manager.history().len(), history_before);
    }
}
