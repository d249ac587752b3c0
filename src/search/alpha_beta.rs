//! Fixed-depth alpha-beta over push/pop.
//!
//! Returns the same score and move as `minimax_search` at equal depth; only
//! the number of visited nodes differs.

use tracing::debug;

use crate::game_state::chess_errors::ChessResult;
use crate::search::board_scoring::BoardScorer;
use crate::search::search_state::{is_maximizing, SearchResult, SearchState};

pub fn alpha_beta_search<T, S>(state: &mut T, scorer: &S, depth: u8) -> ChessResult<SearchResult>
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
    let mut alpha = f64::NEG_INFINITY;
    let mut beta = f64::INFINITY;
    let mut best_move = None;
    let mut best_score = if maximizing { alpha } else { beta };

    for mv in state.legal_moves() {
        state.push_move(mv)?;
        let score = alpha_beta(state, scorer, depth - 1, alpha, beta, &mut nodes);
        state.pop_move()?;
        let score = score?;

        // Later moves are searched against the current best as a bound, so a
        // tie comes back as a bound equal to it and is never preferred.
        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if best_move.is_none() || improves {
            best_move = Some(mv);
            best_score = score;
        }

        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
        if alpha >= beta {
            break;
        }
    }

    debug!(depth, score = best_score, nodes, best = ?best_move.map(|m| m.to_string()), "alpha-beta finished");
    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes,
    })
}

fn alpha_beta<T, S>(
    state: &mut T,
    scorer: &S,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    nodes: &mut u64,
) -> ChessResult<f64>
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
        let score = alpha_beta(state, scorer, depth - 1, alpha, beta, nodes);
        state.pop_move()?;
        let score = score?;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    Ok(best)
}
