//! The search engine: win/draw detection, position evaluation, successor
//! generation, minimax with alpha-beta pruning and a bounded breadth-first
//! estimator, plus the agents built on top of it.

mod agent;
pub mod detect;
pub mod heuristic;
pub mod movegen;
mod random;
pub mod search;

pub use agent::{Agent, SearchAgent};
pub use heuristic::{Heuristic, WindowHeuristic, WIN_SCORE};
pub use random::RandomAgent;
pub use search::{column_bias, BfsReport, Decision, SearchEngine, SearchOutcome};
