use crate::game::{Board, Player, Position, COLS, ROWS};

use super::detect::{is_draw, is_win};

/// Score of a decided game, from the winner's side.
pub const WIN_SCORE: i32 = 1000;

/// Per-window multiplier applied to the squared mark count.
const WINDOW_WEIGHT: i32 = 10;

/// Trait for evaluating a position from a player's perspective.
///
/// Positive scores favour `player`, negative scores favour the opponent.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, position: &Position, player: Player) -> i32;
}

/// Default heuristic: scans every 4-cell window and rewards windows held by
/// a single side with `count² × 10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: i32, opp: i32) -> i32 {
        match (own, opp) {
            (own, 0) if own > 0 => own * own * WINDOW_WEIGHT,
            (0, opp) if opp > 0 => -(opp * opp * WINDOW_WEIGHT),
            _ => 0,
        }
    }

    /// Sum of all window contributions, ignoring terminal status.
    pub fn window_score(board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();

        let window = |cells: [(usize, usize); 4]| {
            let mut own = 0;
            let mut opp = 0;
            for (row, col) in cells {
                match board.get(row, col) {
                    c if c == own_cell => own += 1,
                    c if c == opp_cell => opp += 1,
                    _ => {}
                }
            }
            Self::score_window(own, opp)
        };

        let mut score = 0;

        // Horizontal
        for row in 0..ROWS {
            for col in 0..=COLS - 4 {
                score += window([(row, col), (row, col + 1), (row, col + 2), (row, col + 3)]);
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..=ROWS - 4 {
                score += window([(row, col), (row + 1, col), (row + 2, col), (row + 3, col)]);
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in 0..=ROWS - 4 {
            for col in 0..=COLS - 4 {
                score += window([
                    (row, col),
                    (row + 1, col + 1),
                    (row + 2, col + 2),
                    (row + 3, col + 3),
                ]);
            }
        }

        // Diagonal (top-right to bottom-left)
        for row in 0..=ROWS - 4 {
            for col in 3..COLS {
                score += window([
                    (row, col),
                    (row + 1, col - 1),
                    (row + 2, col - 2),
                    (row + 3, col - 3),
                ]);
            }
        }

        score
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, position: &Position, player: Player) -> i32 {
        if is_win(position) {
            return match position.last_player() {
                Some(winner) if winner == player => WIN_SCORE,
                _ => -WIN_SCORE,
            };
        }
        if is_draw(position) {
            return 0;
        }
        Self::window_score(position.board(), player)
    }
}
