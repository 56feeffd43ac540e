//! Successor generation. Every successor is a fresh `Position`; the parent is
//! never touched.

use crate::error::MoveError;
use crate::game::{LastMove, Player, Position, COLS};

/// A column is playable when it exists and its top cell is empty.
pub fn is_valid_move(position: &Position, col: usize) -> bool {
    !position.board().is_column_full(col)
}

/// Playable columns in ascending order.
pub fn legal_moves(position: &Position) -> Vec<usize> {
    (0..COLS).filter(|&col| is_valid_move(position, col)).collect()
}

/// Drop `player`'s mark into `col`, returning the successor with `ply + 1`.
pub fn apply_move(position: &Position, col: usize, player: Player) -> Result<Position, MoveError> {
    let mut board = *position.board();
    let row = board.drop_piece(col, player.to_cell())?;
    Ok(Position::child(
        board,
        LastMove { row, col, player },
        position.ply() + 1,
    ))
}

/// One successor per legal column, in column order.
pub fn next_states(position: &Position, player: Player) -> Vec<Position> {
    legal_moves(position)
        .into_iter()
        .filter_map(|col| apply_move(position, col, player).ok())
        .collect()
}
