use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::game::GameState;

use super::search::SearchEngine;

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column for `state.current_player()`.
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Agent backed by the minimax search engine. Its depth is the engine's
/// `max_depth`, so moves and breadth-first estimates share one horizon.
pub struct SearchAgent {
    engine: SearchEngine,
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        SearchAgent {
            engine: SearchEngine::new(config),
        }
    }

    pub fn depth(&self) -> usize {
        self.engine.config().max_depth
    }

    /// Change the search depth used by later moves.
    pub fn set_depth(&mut self, depth: usize) {
        self.engine.set_max_depth(depth);
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl Agent for SearchAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::EmptyMoveSet);
        }
        self.engine
            .choose_move(&state.position(), state.current_player(), self.depth())
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
