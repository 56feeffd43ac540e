use std::hash::{Hash, Hasher};

use super::{Board, Player};

/// Coordinates and owner of the most recently placed mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// Immutable snapshot handed to the search engine.
///
/// `ply` counts marks placed since the search root, not since the start of
/// the game. Equality and hashing look at the grid only, so two positions
/// with the same layout are the same state however they were reached.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    board: Board,
    last_move: Option<LastMove>,
    ply: usize,
}

impl Position {
    /// Seed a search from a live board. The root carries no last move.
    pub fn root(board: Board) -> Self {
        Position {
            board,
            last_move: None,
            ply: 0,
        }
    }

    /// Successor constructor used by the move generator.
    pub(crate) fn child(board: Board, last_move: LastMove, ply: usize) -> Self {
        Position {
            board,
            last_move: Some(last_move),
            ply,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Side whose mark was placed last, if any.
    pub fn last_player(&self) -> Option<Player> {
        self.last_move.map(|m| m.player)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

impl From<Board> for Position {
    fn from(board: Board) -> Self {
        Position::root(board)
    }
}
