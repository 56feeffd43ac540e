//! Win and draw tests over search positions.

use crate::game::{Cell, Position, COLS};

/// True if the mark at (row, col) belongs to a run of four or more. Off-board
/// coordinates answer `false`.
pub fn check_win(position: &Position, row: usize, col: usize) -> bool {
    position.board().check_win(row, col)
}

/// True if the last placed mark completed a run of four. A root position,
/// which carries no last move, is never a win.
pub fn is_win(position: &Position) -> bool {
    position
        .last_move()
        .is_some_and(|m| check_win(position, m.row, m.col))
}

/// True when the top row is full and the position is not a win.
pub fn is_draw(position: &Position) -> bool {
    let top_full = (0..COLS).all(|col| position.board().get(0, col) != Cell::Empty);
    top_full && !is_win(position)
}

/// Win or draw.
pub fn is_terminal(position: &Position) -> bool {
    is_win(position) || is_draw(position)
}
