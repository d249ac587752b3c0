//! Look-ahead engine over the shared game.
//!
//! Runs minimax or alpha-beta directly on the live game through push/pop,
//! locking once per operation. The board is preserved for drawing while the
//! search mutates it and released afterwards, whether or not search succeeds.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_errors::ChessResult;
use crate::search::alpha_beta::alpha_beta_search;
use crate::search::board_scoring::{BoardScorer, CentralityMaterialScorer};
use crate::search::minimax::minimax_search;
use crate::search::search_state::{SearchAlgorithm, SearchConfig, SearchResult, SearchState};
use crate::session::shared_game::SharedGame;

/// Dispatch on the configured algorithm.
pub fn run_search<T, S>(state: &mut T, scorer: &S, config: SearchConfig) -> ChessResult<SearchResult>
where
    T: SearchState,
    S: BoardScorer + ?Sized,
{
    match config.algorithm {
        SearchAlgorithm::Minimax => minimax_search(state, scorer, config.depth),
        SearchAlgorithm::AlphaBeta => alpha_beta_search(state, scorer, config.depth),
    }
}

pub struct SearchEngine<S: BoardScorer = CentralityMaterialScorer> {
    config: SearchConfig,
    scorer: S,
}

impl SearchEngine<CentralityMaterialScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, CentralityMaterialScorer)
    }
}

impl Default for SearchEngine<CentralityMaterialScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl<S: BoardScorer> Engine for SearchEngine<S> {
    fn name(&self) -> &str {
        match self.config.algorithm {
            SearchAlgorithm::Minimax => "minimax",
            SearchAlgorithm::AlphaBeta => "alphabeta",
        }
    }

    fn choose_move(&mut self, game: &SharedGame) -> ChessResult<EngineOutput> {
        let mut state = game.clone();
        game.preserve_board();
        let result = run_search(&mut state, &self.scorer, self.config);
        game.release_preserved_board();
        let result = result?;

        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.score),
            nodes: result.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_manager::GameManager;
    use crate::moves::move_descriptions::move_to_long_algebraic;

    #[test]
    fn finds_mate_in_one_through_the_shared_game() {
        let game = SharedGame::new(
            GameManager::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .expect("fen"),
        );
        let mut engine = SearchEngine::new(SearchConfig {
            depth: 2,
            algorithm: SearchAlgorithm::AlphaBeta,
        });

        let out = engine.choose_move(&game).expect("search");
        assert_eq!(
            out.best_move.map(|m| move_to_long_algebraic(&m)),
            Some("d8h4".to_owned())
        );
        assert_eq!(out.score, Some(f64::INFINITY));
        assert_eq!(game.ply_count(), 0);
        assert!(!game.with(GameManager::is_board_preserved));
    }

    #[test]
    fn shared_and_direct_search_agree() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut direct = GameManager::from_fen(fen).expect("fen");
        let mut shared = SharedGame::new(GameManager::from_fen(fen).expect("fen"));
        let config = SearchConfig::default();

        let a = run_search(&mut direct, &CentralityMaterialScorer, config).expect("direct");
        let b = run_search(&mut shared, &CentralityMaterialScorer, config).expect("shared");
        assert_eq!(a, b);
    }
}
