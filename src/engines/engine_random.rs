//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used for diagnostics, match smoke
//! tests and as the weakest opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_errors::ChessResult;
use crate::session::shared_game::SharedGame;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible move choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, game: &SharedGame) -> ChessResult<EngineOutput> {
        let legal_moves = game.legal_moves();
        Ok(EngineOutput {
            best_move: legal_moves.as_slice().choose(&mut self.rng).copied(),
            score: None,
            nodes: legal_moves.len() as u64,
        })
    }
}
