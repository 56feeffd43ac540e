//! Core Connect Four game logic: board representation, player types, the
//! immutable search snapshot, and the live game state machine.

mod board;
mod player;
mod position;
mod state;

pub use board::{Board, Cell, CENTER_COL, COLS, ROWS};
pub use player::Player;
pub use position::{LastMove, Position};
pub use state::{GameOutcome, GameState};
